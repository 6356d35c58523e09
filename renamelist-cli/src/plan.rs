use anyhow::{bail, Result};
use renamelist_core::{plan_operation, Preview, RenameInputs};

use crate::cli::args::SourceArgs;
use crate::{print_result, OutputFormat, PreviewArg, Settings};

pub fn inputs_from(ctx: &Settings, source: &SourceArgs) -> RenameInputs {
    RenameInputs {
        names_file: source.names_file.clone(),
        folder: source.folder.clone(),
        extensions: ctx.extensions_or_default(&source.ext),
        delimiter: source.delimiter.unwrap_or(ctx.delimiter),
    }
}

pub fn handle_plan(
    ctx: &Settings,
    source: &SourceArgs,
    preview: Option<PreviewArg>,
    fixed_table_width: bool,
    output: OutputFormat,
) -> Result<()> {
    let preview = ctx.preview_for(preview, output);

    // Validate that --fixed-table-width is only used with table preview
    if fixed_table_width && preview.is_some() && preview != Some(Preview::Table) {
        bail!("--fixed-table-width can only be used with --preview table");
    }

    let (result, rendered) = plan_operation(
        &inputs_from(ctx, source),
        preview,
        fixed_table_width,
        ctx.use_color,
    )?;

    if let Some(rendered) = rendered {
        print!("{}", rendered);
    }
    print_result(&result, output, ctx.quiet);
    Ok(())
}
