use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, error, info};
use rand::RngCore;

use crate::io::board_io;
use crate::model::board::{Board, DocumentError};

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not load {path}")]
    Load { path: PathBuf },
    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
    #[error("{path} is not open")]
    NotOpen { path: PathBuf },
}

/// Board lifecycle notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent<'a> {
    Opened(&'a Path),
    Saved(&'a Path),
    Closed(&'a Path),
}

/// Callback interface for whatever drives a session (a GUI shell, the CLI,
/// tests). The document logic itself never depends on it.
pub trait BoardObserver {
    fn on_event(&mut self, event: BoardEvent);
}

/// One open board: its canonical path and live state.
#[derive(Debug)]
pub struct BoardHandle {
    path: PathBuf,
    pub board: Board,
}

impl BoardHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An application session: the registry of open boards, the observers
/// watching them, and the random source for color assignment.
///
/// The registry is keyed by canonicalized path and exists to keep one file
/// from being opened twice. It lives and dies with the session; nothing is
/// persisted. Closing is explicit (`close_board`/`close_all`) and is what
/// triggers the save.
pub struct Session {
    boards: IndexMap<PathBuf, BoardHandle>,
    observers: Vec<Box<dyn BoardObserver>>,
    rng: Box<dyn RngCore>,
}

impl Session {
    /// A session drawing colors from the thread rng.
    pub fn new() -> Session {
        Session::with_rng(rand::rng())
    }

    /// A session with a caller-supplied random source, for deterministic
    /// color assignment.
    pub fn with_rng(rng: impl RngCore + 'static) -> Session {
        Session {
            boards: IndexMap::new(),
            observers: Vec::new(),
            rng: Box::new(rng),
        }
    }

    /// Register an observer for board lifecycle events.
    pub fn add_observer(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    /// Open a board file, or hand back the already-open board for its path.
    ///
    /// Load failures have already been logged by the file layer; the error
    /// here is the one-line summary for the caller.
    pub fn open_board(&mut self, path: &Path) -> Result<&mut BoardHandle, SessionError> {
        let key = canonical_key(path)?;
        match self.boards.entry(key) {
            Entry::Occupied(entry) => {
                debug!("{} is already open", entry.key().display());
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let docs = board_io::load_board(entry.key(), &mut *self.rng);
                if docs.is_empty() {
                    return Err(SessionError::Load {
                        path: entry.key().clone(),
                    });
                }
                let board =
                    Board::from_documents(&docs).map_err(|e| SessionError::Document {
                        path: entry.key().clone(),
                        source: e,
                    })?;
                info!("opened board {}", entry.key().display());
                Self::emit(&mut self.observers, BoardEvent::Opened(entry.key()));
                let handle = BoardHandle {
                    path: entry.key().clone(),
                    board,
                };
                Ok(entry.insert(handle))
            }
        }
    }

    /// Serialize and save one open board. The write itself is best-effort
    /// and only logged on failure, as the file layer defines it.
    pub fn save_board(&mut self, path: &Path) -> Result<(), SessionError> {
        let key = lookup_key(path);
        let handle = self
            .boards
            .get(&key)
            .ok_or_else(|| SessionError::NotOpen { path: key.clone() })?;
        board_io::save_board(&key, &handle.board.to_documents());
        info!("Saved to {}", key.display());
        Self::emit(&mut self.observers, BoardEvent::Saved(&key));
        Ok(())
    }

    /// Save and deregister one open board (the window-close path).
    pub fn close_board(&mut self, path: &Path) -> Result<(), SessionError> {
        let key = lookup_key(path);
        if !self.boards.contains_key(&key) {
            return Err(SessionError::NotOpen { path: key });
        }
        self.save_board(&key)?;
        self.boards.shift_remove(&key);
        Self::emit(&mut self.observers, BoardEvent::Closed(&key));
        Ok(())
    }

    /// Close every open board in registration order.
    pub fn close_all(&mut self) {
        let paths: Vec<PathBuf> = self.boards.keys().cloned().collect();
        for path in paths {
            if let Err(e) = self.close_board(&path) {
                error!("{}", e);
            }
        }
    }

    /// Whether a path is already registered in this session.
    pub fn is_open(&self, path: &Path) -> bool {
        self.boards.contains_key(&lookup_key(path))
    }

    /// Canonical paths of the open boards, in open order.
    pub fn open_paths(&self) -> Vec<&Path> {
        self.boards.keys().map(PathBuf::as_path).collect()
    }

    fn emit(observers: &mut [Box<dyn BoardObserver>], event: BoardEvent) {
        for observer in observers {
            observer.on_event(event);
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

fn canonical_key(path: &Path) -> Result<PathBuf, SessionError> {
    fs::canonicalize(path).map_err(|e| SessionError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Registry key for a path that need not exist on disk anymore.
/// Canonicalization requires the file; when it is gone (deleted externally)
/// fall back to the absolute path, so a still-open board can be found and
/// its save can recreate the file.
fn lookup_key(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
