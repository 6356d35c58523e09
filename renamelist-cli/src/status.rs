use anyhow::Result;
use renamelist_core::status_operation;

use crate::{print_result, OutputFormat, Settings};

pub fn handle_status(ctx: &Settings, output: OutputFormat) -> Result<()> {
    let result = status_operation(&ctx.history_path)?;
    print_result(&result, output, ctx.quiet);
    Ok(())
}
