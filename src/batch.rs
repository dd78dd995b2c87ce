//! Discovery, loading, and writing of replay batches.
//!
//! A batch is either a single replay file or every `.osr` file directly
//! inside one directory. Records are fully independent: mutations broadcast
//! the same values to each record, files are read and written sequentially,
//! and one file's failure never corrupts another's data.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ReplayError, Result};
use crate::mutation::Mutation;
use crate::replay::{ReplayRecord, OSR_EXTENSION};

/// Discover replay files at `path`.
///
/// A directory yields its `.osr` entries (no recursion) in
/// directory-iteration order: a snapshot taken now, not guaranteed to match
/// filename order. A file path yields itself, or
/// [`ReplayError::ReplayNotFound`] when nothing exists there.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let candidate = entry?.path();
            if candidate.extension().and_then(|e| e.to_str()) == Some(OSR_EXTENSION)
                && candidate.is_file()
            {
                files.push(candidate);
            }
        }
        debug!(count = files.len(), dir = %path.display(), "discovered replays");
        Ok(files)
    } else if path.exists() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(ReplayError::ReplayNotFound(path.to_path_buf()))
    }
}

/// A loaded batch of independent replay records.
pub struct Batch {
    records: Vec<ReplayRecord>,
    failures: Vec<(PathBuf, ReplayError)>,
}

impl Batch {
    /// Load every replay under `path` (one file, or a directory of files).
    ///
    /// For a directory, files that fail to decode are skipped, warned
    /// about, and recorded in [`failures`](Self::failures) without
    /// aborting the rest. A single-file load reports its failure directly.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let files = discover(path)?;
        let tolerate_failures = path.is_dir();

        let mut records = Vec::with_capacity(files.len());
        let mut failures = Vec::new();
        for file in files {
            match ReplayRecord::from_path(&file) {
                Ok(record) => records.push(record),
                Err(e) if tolerate_failures => {
                    warn!(file = %file.display(), error = %e, "skipping unreadable replay");
                    failures.push((file, e));
                }
                Err(e) => return Err(e),
            }
        }
        info!(count = records.len(), "loaded replays");
        Ok(Self { records, failures })
    }

    /// Records in discovery order.
    pub fn records(&self) -> &[ReplayRecord] {
        &self.records
    }

    /// Mutable view for callers editing records individually.
    pub fn records_mut(&mut self) -> &mut [ReplayRecord] {
        &mut self.records
    }

    /// Files skipped during a directory load, with the error for each.
    pub fn failures(&self) -> &[(PathBuf, ReplayError)] {
        &self.failures
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply one mutation set to every record.
    ///
    /// The request is validated once before any record is touched, so a
    /// rejected request mutates nothing.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<()> {
        mutation.validate()?;
        for record in &mut self.records {
            mutation.apply(record)?;
        }
        debug!(count = self.records.len(), "applied mutation to batch");
        Ok(())
    }

    /// Write the batch to `dest` and return the paths written, in record
    /// order.
    ///
    /// With exactly one record, `dest` is the output file path. With
    /// several, `dest` is a directory (created if absent) receiving
    /// `{index}.osr` files named by zero-based discovery order; the index
    /// rename is deliberate, as discovery order need not match the original
    /// filenames.
    pub fn write_to(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        if let [record] = self.records.as_slice() {
            record.write_path(dest)?;
            info!(file = %dest.display(), "wrote replay");
            return Ok(vec![dest.to_path_buf()]);
        }

        fs::create_dir_all(dest)?;
        let mut written = Vec::with_capacity(self.records.len());
        for (index, record) in self.records.iter().enumerate() {
            let file = dest.join(format!("{index}.{OSR_EXTENSION}"));
            record.write_path(&file)?;
            written.push(file);
        }
        info!(count = written.len(), dir = %dest.display(), "wrote replay batch");
        Ok(written)
    }

    /// Write each record back to the path it was loaded from.
    ///
    /// In-place editing is an explicit request, never a default. Fails with
    /// [`ReplayError::MissingSourcePath`] if a record was not loaded from a
    /// file.
    pub fn write_back(&self) -> Result<()> {
        for record in &self.records {
            let path = record.path.as_deref().ok_or(ReplayError::MissingSourcePath)?;
            record.write_path(path)?;
        }
        info!(count = self.records.len(), "wrote replays back in place");
        Ok(())
    }
}
