#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod history;
pub mod manifest;
pub mod names;
pub mod operations;
pub mod output;
pub mod preview;
pub mod session;

pub use config::Config;
pub use engine::{
    apply_plan, plan_renames, split_extension, undo_last, PairFailure, PlannedRename, RenamePlan,
    RenameReport, UndoReport,
};
pub use error::{RenameError, Result};
pub use files::{parse_extensions, FolderListing};
pub use history::{default_history_path, OperationLog, RenameBatch, RenamePair};
pub use manifest::{remove_manifest, write_manifest, MANIFEST_FILE_NAME};
pub use names::{NameList, DEFAULT_DELIMITER};
pub use operations::{
    clear_history_operation, file_delete_operation, file_rename_operation, files_operation,
    history_operation, locate_operation, names_operation, open_operation, plan_operation,
    preview_operation, rename_operation, status_operation, undo_operation, FilesAction,
    NamesAction, RenameInputs,
};
pub use output::{
    ClearResult, FileAction, FileActionResult, FilesResult, HistoryItem, HistoryResult,
    NamesResult, OutputFormat, OutputFormatter, PlanResult, PreviewResult, RenameResult,
    StatusResult, UndoResult, VersionResult,
};
pub use preview::{
    preview_file, render_plan, ContentPreview, Preview, PreviewKind, PreviewOptions,
};
pub use session::{Command, Event, Session};
