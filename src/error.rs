//! Error types for replay processing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for replay operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Replay not found: {}", .0.display())]
    ReplayNotFound(PathBuf),

    #[error("Truncated input: needed {expected} byte(s), {remaining} remaining")]
    TruncatedInput { expected: usize, remaining: usize },

    #[error("Malformed string field: {0}")]
    MalformedString(String),

    #[error("Corrupt replay: {0}")]
    CorruptReplay(String),

    #[error("Unknown mod name: {0:?}")]
    UnknownMod(String),

    #[error("Mod bitmask has bits with no named mod: {0:#010x}")]
    UnknownModBits(u32),

    #[error("Value out of range for {field}: {value} (maximum {max})")]
    ValueOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("Record has no source path to write back to")]
    MissingSourcePath,
}

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, ReplayError>;
