pub mod args;
pub mod types;

pub use args::{Cli, Commands, FilesCommand, NamesCommand};
pub use types::{OutputFormat, PreviewArg};
