//! Filesystem operations: primitives, the single-entry updater and the batch pipeline.

mod atomic;
mod batch;
mod helpers;
pub mod memory;
mod primitives;
mod std_fs;
mod update;
mod worker;

pub use batch::BatchProcessor;
pub use helpers::{describe_io_error, io_error_with_help};
pub use memory::MemoryFileSystem;
pub use primitives::FileSystem;
pub use std_fs::StdFileSystem;
pub use update::MetadataUpdater;
pub use worker::{BatchEvent, BatchHandle, spawn_batch};
