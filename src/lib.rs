//! Core library for `filestamp`.
//!
//! Renames files and rewrites their creation/modification timestamps, either
//! one entry at a time (`MetadataUpdater`) or across many entries with a
//! date-derivation policy (`BatchProcessor`). All filesystem access goes
//! through the `FileSystem` trait, so the engine runs the same against the real
//! disk (`StdFileSystem`) or an in-memory store (`MemoryFileSystem`).
//!
//! The library holds no process-wide mutable state: callers own the selected
//! file, the dates and the batch list, and pass them into each call.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod model;
pub mod output;
pub mod platform;
pub mod timestamp;
pub mod validator;

pub use config::{Config, LogLevel, default_config_path, default_log_path};
pub use errors::FileStampError;
pub use fs_ops::{
    BatchEvent, BatchProcessor, FileSystem, MemoryFileSystem, MetadataUpdater, StdFileSystem,
    spawn_batch,
};
pub use model::{AttributeUpdate, BatchOutcome, BatchSummary, BulkDatePolicy, FileTarget, TimestampPair};
pub use validator::{ValidationResult, validate_name};
