use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use renamelist_core::{
    default_history_path, parse_extensions, Config, OutputFormatter, Preview, VersionResult,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod files;
mod history;
mod names;
mod plan;
mod preview;
mod rename;
mod status;
mod undo;

use cli::{Cli, Commands, OutputFormat, PreviewArg};

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn setup_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .with(filter)
        .init();
}

/// Settings shared by every command, resolved from flags, then config, then defaults
pub struct Settings {
    pub history_path: PathBuf,
    pub delimiter: char,
    pub extensions: Vec<String>,
    pub preview_format: Preview,
    pub use_color: bool,
    pub yes: bool,
    pub quiet: bool,
}

fn run(cli: Cli) -> Result<()> {
    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))?;
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("{e:#}; using default settings");
        Config::default()
    });

    let use_color = !cli.no_color
        && config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());

    let ctx = Settings {
        history_path: cli
            .history
            .clone()
            .or_else(|| config.history.path.clone())
            .unwrap_or_else(default_history_path),
        delimiter: config.delimiter()?,
        extensions: config.extensions(),
        preview_format: Preview::from_str(&config.defaults.preview_format)
            .unwrap_or(Preview::Table),
        use_color,
        yes: cli.yes,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Plan {
            source,
            preview,
            fixed_table_width,
            output,
        } => plan::handle_plan(
            &ctx,
            &source,
            preview,
            fixed_table_width,
            output.output,
        ),

        Commands::Rename {
            source,
            preview,
            dry_run,
            output,
        } => rename::handle_rename(&ctx, &source, preview, dry_run, output.output),

        Commands::Undo { output } => undo::handle_undo(&ctx, output.output),

        Commands::History { limit, output } => {
            history::handle_history(&ctx, limit, output.output)
        },

        Commands::Status { output } => status::handle_status(&ctx, output.output),

        Commands::ClearHistory { output } => history::handle_clear_history(&ctx, output.output),

        Commands::Names { command } => names::handle_names(&ctx, command),

        Commands::Files { command } => files::handle_files(&ctx, command),

        Commands::Preview {
            file,
            thumbnail_out,
            max_width,
            max_height,
            output,
        } => {
            let mut options = config.preview_options();
            options.thumbnail_out = thumbnail_out;
            if let Some(width) = max_width {
                options.max_width = width;
            }
            if let Some(height) = max_height {
                options.max_height = height;
            }
            preview::handle_preview(&ctx, &file, &options, output.output)
        },

        Commands::Completions { shell, out_dir } => {
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, "renamelist", &out_dir)
        },

        Commands::Version { output } => handle_version(output.output),
    }
}

impl Settings {
    /// Extensions from `--ext`, or the configured ones when the flag was not given
    pub fn extensions_or_default(&self, ext: &[String]) -> Vec<String> {
        if ext.is_empty() {
            self.extensions.clone()
        } else {
            parse_extensions(&ext.join(","))
        }
    }

    /// Plan preview to show, if any. JSON output never gets one.
    pub fn preview_for(&self, preview: Option<PreviewArg>, output: OutputFormat) -> Option<Preview> {
        if output == OutputFormat::Json || self.quiet {
            return None;
        }
        Some(preview.map_or(self.preview_format, Into::into))
    }
}

/// Print a result in the requested format. `--quiet` silences summaries but never JSON.
pub fn print_result<T: OutputFormatter>(result: &T, output: OutputFormat, quiet: bool) {
    if output == OutputFormat::Summary && quiet {
        return;
    }
    let text = result.format(output.into());
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

/// Ask before doing something that changes files. `--yes` skips the question.
pub fn confirm(ctx: &Settings, question: &str) -> Result<bool> {
    if ctx.yes {
        return Ok(true);
    }
    prompt_confirm_with_input(&mut io::stdin(), question)
}

fn prompt_confirm_with_input<R: io::Read>(reader: &mut R, question: &str) -> Result<bool> {
    eprint!("{} [y/N]: ", question);
    io::stderr().flush()?;

    let mut input = String::new();
    io::BufReader::new(reader).read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn aborted() -> Result<()> {
    eprintln!("Aborted.");
    Ok(())
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renamelist".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    print_result(&version_result, output, false);
    Ok(())
}
