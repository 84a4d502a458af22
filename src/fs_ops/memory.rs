//! In-memory filesystem primitives.
//!
//! Holds a flat map of path -> timestamps, can be told to fail specific
//! primitives for specific paths, and journals every mutating call (including
//! failed attempts). Clones share state, so a copy handed to a background
//! batch can be inspected afterwards.

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::primitives::FileSystem;
use crate::model::{AttributeUpdate, TimestampPair};

/// A mutating primitive call, as observed by the memory filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Move { from: PathBuf, to: PathBuf },
    Write { path: PathBuf, update: AttributeUpdate },
}

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<PathBuf, TimestampPair>,
    fail_reads: HashSet<PathBuf>,
    fail_writes: HashSet<PathBuf>,
    fail_moves: HashSet<PathBuf>,
    journal: Vec<Operation>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<State>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, times: TimestampPair) -> Self {
        self.insert(path, times);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, times: TimestampPair) {
        self.lock().entries.insert(path.into(), times);
    }

    pub fn attributes(&self, path: &Path) -> Option<TimestampPair> {
        self.lock().entries.get(path).copied()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().entries.keys().cloned().collect()
    }

    /// Make `read_attributes(path)` fail.
    pub fn fail_reads_for(&self, path: impl Into<PathBuf>) {
        self.lock().fail_reads.insert(path.into());
    }

    /// Make `write_attributes(path, ..)` fail.
    pub fn fail_writes_for(&self, path: impl Into<PathBuf>) {
        self.lock().fail_writes.insert(path.into());
    }

    /// Make `move_path(path, ..)` fail.
    pub fn fail_moves_for(&self, path: impl Into<PathBuf>) {
        self.lock().fail_moves.insert(path.into());
    }

    /// Every mutating call so far, in order.
    pub fn journal(&self) -> Vec<Operation> {
        self.lock().journal.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no entry at '{}'", path.display()),
    )
}

fn injected(op: &str, path: &Path) -> io::Error {
    io::Error::other(format!("injected {op} failure for '{}'", path.display()))
}

impl FileSystem for MemoryFileSystem {
    fn read_attributes(&self, path: &Path) -> io::Result<TimestampPair> {
        let state = self.lock();
        if state.fail_reads.contains(path) {
            return Err(injected("read", path));
        }
        state.entries.get(path).copied().ok_or_else(|| not_found(path))
    }

    fn write_attributes(&self, path: &Path, update: &AttributeUpdate) -> io::Result<()> {
        let mut state = self.lock();
        state.journal.push(Operation::Write {
            path: path.to_path_buf(),
            update: *update,
        });
        if state.fail_writes.contains(path) {
            return Err(injected("write", path));
        }
        let entry = state.entries.get_mut(path).ok_or_else(|| not_found(path))?;
        if let Some(created) = update.created {
            entry.created = created;
        }
        if let Some(modified) = update.modified {
            entry.modified = modified;
        }
        Ok(())
    }

    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.lock();
        state.journal.push(Operation::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        if state.fail_moves.contains(from) {
            return Err(injected("move", from));
        }
        if state.entries.contains_key(to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination '{}' already exists", to.display()),
            ));
        }
        let times = state.entries.remove(from).ok_or_else(|| not_found(from))?;
        state.entries.insert(to.to_path_buf(), times);
        Ok(())
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.lock().entries.contains_key(path)
    }
}
