//! Owner of the state a rename session works on.
//!
//! A front end never touches the name list, the folder listing or the log
//! directly. It sends a [`Command`] to [`Session::dispatch`] and renders the
//! [`Event`] that comes back.

use crate::engine::{apply_plan, plan_renames, undo_last, RenamePlan, RenameReport, UndoReport};
use crate::files::FolderListing;
use crate::history::OperationLog;
use crate::names::NameList;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenNames { path: PathBuf, delimiter: char },
    ReloadNames,
    OpenFolder { dir: PathBuf, extensions: Vec<String> },
    ReloadFolder,
    SetExtensions(Vec<String>),
    RemoveNames(Vec<usize>),
    MoveName { index: usize, new_index: usize },
    MoveFile { index: usize, new_index: usize },
    RenameFile { old_name: String, new_name: String },
    DeleteFile(String),
    Plan,
    RenameAll,
    Undo,
}

#[derive(Debug, Clone)]
pub enum Event {
    NamesLoaded {
        names: Vec<String>,
    },
    FilesLoaded {
        files: Vec<String>,
    },
    NamesChanged {
        names: Vec<String>,
        /// How many rows the command touched
        changed: usize,
        /// The edit is kept in memory even when writing it back failed
        save_error: Option<String>,
    },
    FilesChanged {
        files: Vec<String>,
        changed: bool,
    },
    Planned(RenamePlan),
    Renamed(RenameReport),
    /// `None` when the log had nothing to undo
    Undone(Option<UndoReport>),
}

#[derive(Debug)]
pub struct Session {
    names: Option<NameList>,
    folder: Option<FolderListing>,
    log: OperationLog,
}

impl Session {
    pub fn new(log: OperationLog) -> Self {
        Self {
            names: None,
            folder: None,
            log,
        }
    }

    /// Start a session with the log stored at `history_path`
    pub fn with_history(history_path: &Path) -> Self {
        Self::new(OperationLog::load(history_path))
    }

    pub fn names(&self) -> Option<&NameList> {
        self.names.as_ref()
    }

    pub fn folder(&self) -> Option<&FolderListing> {
        self.folder.as_ref()
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Event> {
        match command {
            Command::OpenNames { path, delimiter } => {
                let names = NameList::open(&path, delimiter)?;
                let event = Event::NamesLoaded {
                    names: names.names().to_vec(),
                };
                self.names = Some(names);
                Ok(event)
            },
            Command::ReloadNames => {
                let names = self.names_mut()?;
                names.reload()?;
                Ok(Event::NamesLoaded {
                    names: names.names().to_vec(),
                })
            },
            Command::OpenFolder { dir, extensions } => {
                let folder = FolderListing::open(&dir, &extensions)?;
                let event = Event::FilesLoaded {
                    files: folder.files().to_vec(),
                };
                self.folder = Some(folder);
                Ok(event)
            },
            Command::ReloadFolder => {
                let folder = self.folder_mut()?;
                folder.reload()?;
                Ok(Event::FilesLoaded {
                    files: folder.files().to_vec(),
                })
            },
            Command::SetExtensions(extensions) => {
                let folder = self.folder_mut()?;
                folder.set_extensions(&extensions)?;
                Ok(Event::FilesLoaded {
                    files: folder.files().to_vec(),
                })
            },
            Command::RemoveNames(indices) => {
                let names = self.names_mut()?;
                let changed = names.remove_many(&indices);
                Ok(write_through(names, changed))
            },
            Command::MoveName { index, new_index } => {
                let names = self.names_mut()?;
                let changed = usize::from(names.move_to(index, new_index));
                Ok(write_through(names, changed))
            },
            Command::MoveFile { index, new_index } => {
                let folder = self.folder_mut()?;
                let changed = folder.move_to(index, new_index);
                Ok(Event::FilesChanged {
                    files: folder.files().to_vec(),
                    changed,
                })
            },
            Command::RenameFile { old_name, new_name } => {
                let folder = self.folder_mut()?;
                folder.rename(&old_name, &new_name)?;
                Ok(Event::FilesChanged {
                    files: folder.files().to_vec(),
                    changed: true,
                })
            },
            Command::DeleteFile(name) => {
                let folder = self.folder_mut()?;
                folder.delete(&name)?;
                Ok(Event::FilesChanged {
                    files: folder.files().to_vec(),
                    changed: true,
                })
            },
            Command::Plan => Ok(Event::Planned(self.plan()?)),
            Command::RenameAll => {
                let plan = self.plan()?;
                let folder = self
                    .folder
                    .as_mut()
                    .ok_or_else(|| anyhow!("No folder is open"))?;
                let mut report = apply_plan(&plan, folder, &mut self.log);
                if let Err(e) = folder.reload() {
                    report.warnings.push(format!("Could not reload folder: {}", e));
                }
                Ok(Event::Renamed(report))
            },
            Command::Undo => {
                let report = undo_last(&mut self.log, self.folder.as_mut())?;
                Ok(Event::Undone(report))
            },
        }
    }

    /// Pair the open folder with the open name list
    pub fn plan(&self) -> Result<RenamePlan> {
        let (Some(names), Some(folder)) = (&self.names, &self.folder) else {
            return Err(anyhow!("Open both a name list and a folder first"));
        };
        Ok(plan_renames(folder.dir(), folder.files(), names.names()))
    }

    fn names_mut(&mut self) -> Result<&mut NameList> {
        self.names
            .as_mut()
            .ok_or_else(|| anyhow!("No name list is open"))
    }

    fn folder_mut(&mut self) -> Result<&mut FolderListing> {
        self.folder
            .as_mut()
            .ok_or_else(|| anyhow!("No folder is open"))
    }
}

fn write_through(names: &NameList, changed: usize) -> Event {
    let save_error = if changed > 0 && names.path().is_some() {
        names.save().err().map(|e| {
            warn!(error = %e, "could not save name list");
            e.to_string()
        })
    } else {
        None
    };

    Event::NamesChanged {
        names: names.names().to_vec(),
        changed,
        save_error,
    }
}
