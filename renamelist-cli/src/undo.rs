use anyhow::Result;
use renamelist_core::{status_operation, undo_operation};

use crate::{aborted, confirm, print_result, OutputFormat, Settings};

pub fn handle_undo(ctx: &Settings, output: OutputFormat) -> Result<()> {
    let status = status_operation(&ctx.history_path)?;

    if let Some(last) = &status.last_batch {
        let question = format!(
            "Undo renaming {} files in {}?",
            last.renames,
            last.folder_path.display()
        );
        if !confirm(ctx, &question)? {
            return aborted();
        }
    }

    let result = undo_operation(&ctx.history_path)?;
    print_result(&result, output, ctx.quiet);
    Ok(())
}
