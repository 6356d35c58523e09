use crate::error::RenameError;
use crate::output::UndoResult;
use crate::session::{Command, Event, Session};
use anyhow::{bail, Result};
use std::path::Path;

/// Undo the most recent rename pass recorded in the log at `history_path`
pub fn undo_operation(history_path: &Path) -> Result<UndoResult> {
    let mut session = Session::with_history(history_path);

    let event = match session.dispatch(Command::Undo) {
        Ok(event) => event,
        Err(e) => {
            if let Some(RenameError::NotFound(folder)) = e.downcast_ref::<RenameError>() {
                bail!(
                    "The folder of the last rename no longer exists: {}",
                    folder.display()
                );
            }
            return Err(e.context("Failed to undo the last rename"));
        },
    };

    match event {
        Event::Undone(report) => Ok(UndoResult { report }),
        other => bail!("Unexpected session event: {:?}", other),
    }
}
