use anyhow::Result;
use renamelist_core::{clear_history_operation, history_operation, status_operation};

use crate::{aborted, confirm, print_result, OutputFormat, Settings};

pub fn handle_history(ctx: &Settings, limit: Option<usize>, output: OutputFormat) -> Result<()> {
    let result = history_operation(limit, &ctx.history_path)?;
    print_result(&result, output, ctx.quiet);
    Ok(())
}

pub fn handle_clear_history(ctx: &Settings, output: OutputFormat) -> Result<()> {
    let status = status_operation(&ctx.history_path)?;

    if status.history_count > 0 {
        let question = format!(
            "Forget {} recorded renames? They can no longer be undone.",
            status.history_count
        );
        if !confirm(ctx, &question)? {
            return aborted();
        }
    }

    let result = clear_history_operation(&ctx.history_path)?;
    print_result(&result, output, ctx.quiet);
    Ok(())
}
