use anyhow::Result;
use renamelist_core::{plan_operation, rename_operation};

use crate::cli::args::SourceArgs;
use crate::plan::inputs_from;
use crate::{aborted, confirm, print_result, OutputFormat, PreviewArg, Settings};

pub fn handle_rename(
    ctx: &Settings,
    source: &SourceArgs,
    preview: Option<PreviewArg>,
    dry_run: bool,
    output: OutputFormat,
) -> Result<()> {
    let inputs = inputs_from(ctx, source);

    let mut confirmed = None;
    if !dry_run {
        let (planned, rendered) =
            plan_operation(&inputs, ctx.preview_for(preview, output), false, ctx.use_color)?;

        if let Some(rendered) = rendered {
            print!("{}", rendered);
        }

        let count = planned.plan.pairs.len();
        if count > 0 {
            let question = format!(
                "Rename {} files in {}?",
                count,
                planned.plan.folder.display()
            );
            if !confirm(ctx, &question)? {
                return aborted();
            }
        }
        confirmed = Some(planned.plan);
    }

    let result = rename_operation(&inputs, dry_run, confirmed.as_ref(), &ctx.history_path)?;
    print_result(&result, output, ctx.quiet);
    Ok(())
}
