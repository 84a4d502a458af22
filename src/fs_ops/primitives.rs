//! Host filesystem primitives the metadata engine is built on.
//! Everything above this trait is platform-agnostic; implementations decide
//! how attributes are actually stored.

use std::io;
use std::path::Path;

use crate::model::{AttributeUpdate, TimestampPair};

pub trait FileSystem {
    /// Current creation and modification time of the entry at `path`.
    fn read_attributes(&self, path: &Path) -> io::Result<TimestampPair>;

    /// Write the timestamps present in `update`; absent ones stay as they are.
    fn write_attributes(&self, path: &Path, update: &AttributeUpdate) -> io::Result<()>;

    /// Atomically move `from` to `to`. Never leaves a half-renamed entry.
    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn path_exists(&self, path: &Path) -> bool;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read_attributes(&self, path: &Path) -> io::Result<TimestampPair> {
        (**self).read_attributes(path)
    }

    fn write_attributes(&self, path: &Path, update: &AttributeUpdate) -> io::Result<()> {
        (**self).write_attributes(path, update)
    }

    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).move_path(from, to)
    }

    fn path_exists(&self, path: &Path) -> bool {
        (**self).path_exists(path)
    }
}
