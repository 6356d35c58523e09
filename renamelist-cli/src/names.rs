use anyhow::Result;
use renamelist_core::{names_operation, NamesAction};

use crate::cli::NamesCommand;
use crate::{print_result, Settings};

pub fn handle_names(ctx: &Settings, command: NamesCommand) -> Result<()> {
    // Rows on the command line are numbered from 1
    let (file, action, output) = match command {
        NamesCommand::List { file, output } => (file, NamesAction::List, output),
        NamesCommand::Filter { file, text, output } => (file, NamesAction::Filter(text), output),
        NamesCommand::Remove { file, rows, output } => (
            file,
            NamesAction::Remove(rows.into_iter().map(|row| row - 1).collect()),
            output,
        ),
        NamesCommand::Move {
            file,
            row,
            other,
            output,
        } => (
            file,
            NamesAction::Move {
                index: row - 1,
                new_index: other - 1,
            },
            output,
        ),
    };

    let delimiter = file.delimiter.unwrap_or(ctx.delimiter);
    let result = names_operation(&file.names_file, delimiter, action)?;
    print_result(&result, output.output, ctx.quiet);
    Ok(())
}
