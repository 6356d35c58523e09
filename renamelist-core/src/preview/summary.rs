use crate::engine::RenamePlan;
use nu_ansi_term::Color as AnsiColor;
use std::fmt::Write;

/// Render plan as a plain line-per-rename summary
pub fn render_summary(plan: &RenamePlan, use_color: bool) -> String {
    let mut output = String::new();

    writeln!(output, "[RENAME PLAN]").unwrap();
    writeln!(output, "Folder: {}", plan.folder.display()).unwrap();
    writeln!(output, "Renames: {}", plan.pairs.len()).unwrap();
    writeln!(output, "Not renamed: {}", plan.not_renamed.len()).unwrap();
    if plan.unused_names > 0 {
        writeln!(output, "Unused names: {}", plan.unused_names).unwrap();
    }

    if !plan.pairs.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[RENAMES]").unwrap();
        for pair in &plan.pairs {
            let arrow = if use_color {
                AnsiColor::Green.paint("->").to_string()
            } else {
                "->".to_string()
            };
            writeln!(output, "{} {} {}", pair.original_name, arrow, pair.new_name).unwrap();
        }
    }

    if !plan.not_renamed.is_empty() {
        writeln!(output).unwrap();
        let header = if use_color {
            AnsiColor::Yellow.paint("[NOT RENAMED]").to_string()
        } else {
            "[NOT RENAMED]".to_string()
        };
        writeln!(output, "{}", header).unwrap();
        for file in &plan.not_renamed {
            writeln!(output, "{}", file).unwrap();
        }
    }

    output
}
