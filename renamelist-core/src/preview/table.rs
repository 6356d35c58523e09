use crate::engine::RenamePlan;
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

const NOT_RENAMED: &str = "(not renamed: no name left)";

/// Render plan as a table with optional fixed column widths
pub fn render_table(plan: &RenamePlan, use_color: bool, fixed_table_width: bool) -> String {
    let mut table = Table::new();

    if fixed_table_width || !io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(vec![
            ColumnConstraint::Absolute(Width::Fixed(6)),  // #
            ColumnConstraint::Absolute(Width::Fixed(50)), // Current
            ColumnConstraint::Absolute(Width::Fixed(50)), // New
        ]);
    } else {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Current name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Current name", "New name"]);
    }

    for pair in &plan.pairs {
        let index = (pair.index + 1).to_string();
        if use_color {
            table.add_row(vec![
                Cell::new(&index).fg(Color::DarkGrey),
                Cell::new(&pair.original_name),
                Cell::new(format!("→ {}", pair.new_name)).fg(Color::Green),
            ]);
        } else {
            table.add_row(vec![
                index,
                pair.original_name.clone(),
                format!("→ {}", pair.new_name),
            ]);
        }
    }

    let offset = plan.pairs.len();
    for (i, file) in plan.not_renamed.iter().enumerate() {
        let index = (offset + i + 1).to_string();
        if use_color {
            table.add_row(vec![
                Cell::new(&index).fg(Color::DarkGrey),
                Cell::new(file),
                Cell::new(NOT_RENAMED).fg(Color::Yellow),
            ]);
        } else {
            table.add_row(vec![index, file.clone(), NOT_RENAMED.to_string()]);
        }
    }

    let totals = format!(
        "{} to rename, {} not renamed",
        plan.pairs.len(),
        plan.not_renamed.len()
    );
    let unused = if plan.unused_names > 0 {
        format!("{} unused names", plan.unused_names)
    } else {
        String::new()
    };

    if use_color {
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(totals).fg(Color::White),
            Cell::new(unused).fg(Color::DarkGrey),
        ]);
    } else {
        table.add_row(vec!["TOTALS".to_string(), totals, unused]);
    }

    table.to_string()
}
