//! # osredit
//!
//! Inspector and batch editor for osu! replay (`.osr`) files.
//!
//! ## Core Concepts
//!
//! - **Records**: one parsed replay each, with the compressed action
//!   stream carried as an opaque blob and preserved byte-for-byte
//! - **Mods**: a 32-bit bitmask mapped to a fixed, ordered table of names
//! - **Timestamps**: 100 ns ticks since 0001-01-01 UTC, converted to
//!   calendar time only on demand
//! - **Batches**: one file or a directory of files, mutated uniformly and
//!   written back out
//!
//! ## Example
//!
//! ```ignore
//! use osredit::{Batch, Mutation};
//!
//! let mut batch = Batch::load("./plays")?;
//!
//! // Rename the player on every replay
//! batch.apply(&Mutation {
//!     username: Some("guest".into()),
//!     ..Default::default()
//! })?;
//!
//! // Write 0.osr..N-1.osr into an output directory
//! batch.write_to("./edited".as_ref())?;
//! ```

pub mod batch;
pub mod cli;
pub mod codec;
pub mod error;
pub mod mods;
pub mod mutation;
pub mod replay;
pub mod report;
pub mod timestamp;

// Re-exports
pub use batch::{discover, Batch};
pub use error::{ReplayError, Result};
pub use mutation::{Mutation, MAX_SCORE};
pub use replay::{Gamemode, ReplayRecord, OSR_EXTENSION, WIDE_REPLAY_ID_VERSION};
pub use timestamp::{ticks_to_utc, utc_to_ticks, TICKS_PER_SECOND, UNIX_EPOCH_TICKS};
