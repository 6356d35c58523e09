use anyhow::Result;
use renamelist_core::{preview_operation, PreviewOptions};
use std::path::Path;

use crate::{print_result, OutputFormat, Settings};

pub fn handle_preview(
    ctx: &Settings,
    file: &Path,
    options: &PreviewOptions,
    output: OutputFormat,
) -> Result<()> {
    let result = preview_operation(file, options)?;
    print_result(&result, output, ctx.quiet);
    Ok(())
}
