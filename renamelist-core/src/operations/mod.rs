//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core logic for each renamelist command,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod files;
pub mod history;
pub mod names;
pub mod plan;
pub mod preview;
pub mod rename;
pub mod status;
pub mod undo;

pub use files::{
    file_delete_operation, file_rename_operation, files_operation, locate_operation,
    open_operation, FilesAction,
};
pub use history::{clear_history_operation, history_operation};
pub use names::{names_operation, NamesAction};
pub use plan::{plan_operation, RenameInputs};
pub use preview::preview_operation;
pub use rename::rename_operation;
pub use status::status_operation;
pub use undo::undo_operation;
