use crate::names::NameList;
use crate::output::NamesResult;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// What to do with a name file. Positions are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamesAction {
    List,
    Filter(String),
    Remove(Vec<usize>),
    Move { index: usize, new_index: usize },
}

/// Show or edit a name file; edits are written straight back to it
pub fn names_operation(path: &Path, delimiter: char, action: NamesAction) -> Result<NamesResult> {
    let mut names = NameList::open(path, delimiter)
        .with_context(|| format!("Failed to load names from {}", path.display()))?;

    let (message, shown) = match action {
        NamesAction::List => (None, names.names().to_vec()),
        NamesAction::Filter(needle) => (None, names.filter(&needle)),
        NamesAction::Remove(indices) => {
            let removed = names.remove_many(&indices);
            if removed > 0 {
                save(&names, path)?;
            }
            (
                Some(format!("Removed {} names", removed)),
                names.names().to_vec(),
            )
        },
        NamesAction::Move { index, new_index } => {
            if !names.move_to(index, new_index) {
                bail!(
                    "Cannot swap rows {} and {}: the list has {} names",
                    index + 1,
                    new_index + 1,
                    names.len()
                );
            }
            save(&names, path)?;
            (
                Some(format!("Swapped rows {} and {}", index + 1, new_index + 1)),
                names.names().to_vec(),
            )
        },
    };

    Ok(NamesResult {
        path: path.to_path_buf(),
        message,
        names: shown,
        total: names.len(),
    })
}

fn save(names: &NameList, path: &Path) -> Result<()> {
    names
        .save()
        .with_context(|| format!("Failed to save names to {}", path.display()))
}
