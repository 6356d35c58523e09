use anyhow::Result;
use renamelist_core::{
    file_delete_operation, file_rename_operation, files_operation, locate_operation,
    open_operation, FilesAction,
};

use crate::cli::FilesCommand;
use crate::{aborted, confirm, print_result, Settings};

pub fn handle_files(ctx: &Settings, command: FilesCommand) -> Result<()> {
    match command {
        FilesCommand::List {
            folder,
            ext,
            output,
        } => {
            let extensions = ctx.extensions_or_default(&ext);
            let result = files_operation(&folder, &extensions, FilesAction::List)?;
            print_result(&result, output.output, ctx.quiet);
        },
        FilesCommand::Filter {
            folder,
            text,
            ext,
            output,
        } => {
            let extensions = ctx.extensions_or_default(&ext);
            let result = files_operation(&folder, &extensions, FilesAction::Filter(text))?;
            print_result(&result, output.output, ctx.quiet);
        },
        FilesCommand::Rename {
            folder,
            old_name,
            new_name,
            output,
        } => {
            if !confirm(ctx, &format!("Rename '{}' to '{}'?", old_name, new_name))? {
                return aborted();
            }
            let result = file_rename_operation(&folder, &old_name, &new_name)?;
            print_result(&result, output.output, ctx.quiet);
        },
        FilesCommand::Delete {
            folder,
            name,
            output,
        } => {
            if !confirm(ctx, &format!("Delete '{}'? This cannot be undone.", name))? {
                return aborted();
            }
            let result = file_delete_operation(&folder, &name)?;
            print_result(&result, output.output, ctx.quiet);
        },
        FilesCommand::Locate {
            folder,
            name,
            output,
        } => {
            let result = locate_operation(&folder, &name)?;
            print_result(&result, output.output, ctx.quiet);
        },
        FilesCommand::Open {
            folder,
            name,
            output,
        } => {
            let result = open_operation(&folder, &name)?;
            print_result(&result, output.output, ctx.quiet);
        },
    }
    Ok(())
}
