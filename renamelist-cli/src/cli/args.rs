use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename the files of a folder from a list of names
#[derive(Parser, Debug)]
#[command(name = "renamelist")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Rename history file (defaults to the per-user data directory)
    #[arg(long, global = true, env = "RENAMELIST_HISTORY", value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "RENAMELIST_YES")]
    pub yes: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// The name file and folder a rename pass pairs up
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Delimited text file with one new name per row (first column is used)
    pub names_file: PathBuf,

    /// Folder whose files get renamed
    pub folder: PathBuf,

    /// Only rename files with these extensions (comma-separated, e.g. "jpg,png")
    #[arg(long, value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Field delimiter of the name file
    #[arg(long)]
    pub delimiter: Option<char>,
}

#[derive(Args, Debug, Clone)]
pub struct NameFileArgs {
    /// Delimited text file with one name per row
    pub names_file: PathBuf,

    /// Field delimiter of the name file
    #[arg(long)]
    pub delimiter: Option<char>,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which file gets which name, without renaming anything
    Plan {
        #[command(flatten)]
        source: SourceArgs,

        /// Preview format for the plan
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths instead of adapting to the terminal
        #[arg(long)]
        fixed_table_width: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rename every file that has a name in the list
    Rename {
        #[command(flatten)]
        source: SourceArgs,

        /// Preview format shown before asking for confirmation
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Show what would be renamed without renaming
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Undo the most recent rename
    Undo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show rename history, most recent first
    History {
        /// Limit number of entries
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show what the next undo would reverse
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Forget every recorded rename
    ClearHistory {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show or edit a name file
    Names {
        #[command(subcommand)]
        command: NamesCommand,
    },

    /// Show or act on the files of a folder
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },

    /// Preview the content of a file
    Preview {
        /// File to preview
        file: PathBuf,

        /// Save the scaled image here (images only)
        #[arg(long, value_name = "PATH")]
        thumbnail_out: Option<PathBuf>,

        /// Largest preview width for images
        #[arg(long)]
        max_width: Option<u32>,

        /// Largest preview height for images
        #[arg(long)]
        max_height: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Directory to write the completion file into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show version information
    Version {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Rows are numbered from 1, as `names list` shows them
#[derive(Subcommand, Debug)]
pub enum NamesCommand {
    /// List every name
    List {
        #[command(flatten)]
        file: NameFileArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List names containing TEXT (case-insensitive)
    Filter {
        #[command(flatten)]
        file: NameFileArgs,

        text: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Remove rows and save the file
    Remove {
        #[command(flatten)]
        file: NameFileArgs,

        /// Row numbers to remove
        #[arg(required = true, value_parser = parse_row)]
        rows: Vec<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Swap two rows and save the file
    Move {
        #[command(flatten)]
        file: NameFileArgs,

        #[arg(value_parser = parse_row)]
        row: usize,

        #[arg(value_parser = parse_row)]
        other: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn parse_row(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{}' is not a row number (rows start at 1)", s)),
        Ok(row) => Ok(row),
    }
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// List the files a rename pass would see
    List {
        folder: PathBuf,

        /// Only list files with these extensions
        #[arg(long, value_delimiter = ',')]
        ext: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List files containing TEXT (case-insensitive)
    Filter {
        folder: PathBuf,

        text: String,

        /// Only list files with these extensions
        #[arg(long, value_delimiter = ',')]
        ext: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rename a single file (never overwrites)
    Rename {
        folder: PathBuf,
        old_name: String,
        new_name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete a single file
    Delete {
        folder: PathBuf,
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a file in the file manager
    Locate {
        folder: PathBuf,
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Open a file with its default application
    Open {
        folder: PathBuf,
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}
