//! Uniform field mutations applied across a batch.

use crate::error::{ReplayError, Result};
use crate::replay::ReplayRecord;

/// Highest total score the format documents (signed 32-bit ceiling).
pub const MAX_SCORE: u32 = 2_147_483_647;

/// A set of field assignments applied uniformly to every record in a batch.
///
/// Unset fields leave the corresponding record fields untouched. This is a
/// deliberate broadcast: every record in the batch receives the same values,
/// with no per-record targeting.
#[derive(Clone, Debug, Default)]
pub struct Mutation {
    pub username: Option<String>,
    pub count_300: Option<u16>,
    pub count_100: Option<u16>,
    pub count_50: Option<u16>,
    pub count_geki: Option<u16>,
    pub count_katu: Option<u16>,
    pub count_miss: Option<u16>,
    pub score: Option<u32>,
    pub max_combo: Option<u16>,
    pub perfect: Option<bool>,
    pub mods: Option<u32>,
    pub timestamp_ticks: Option<u64>,
}

impl Mutation {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.count_300.is_none()
            && self.count_100.is_none()
            && self.count_50.is_none()
            && self.count_geki.is_none()
            && self.count_katu.is_none()
            && self.count_miss.is_none()
            && self.score.is_none()
            && self.max_combo.is_none()
            && self.perfect.is_none()
            && self.mods.is_none()
            && self.timestamp_ticks.is_none()
    }

    /// Check requested values against documented field ranges.
    ///
    /// Counters and combo are range-enforced by their types; the score is
    /// the one field whose documented ceiling is narrower than its storage.
    pub fn validate(&self) -> Result<()> {
        if let Some(score) = self.score {
            if score > MAX_SCORE {
                return Err(ReplayError::ValueOutOfRange {
                    field: "score",
                    value: u64::from(score),
                    max: u64::from(MAX_SCORE),
                });
            }
        }
        Ok(())
    }

    /// Validate, then assign every set field to the record.
    ///
    /// Validation runs before any assignment, so a rejected request leaves
    /// the record untouched. Applying the same mutation twice leaves the
    /// record identical to applying it once.
    pub fn apply(&self, record: &mut ReplayRecord) -> Result<()> {
        self.validate()?;
        if let Some(ref username) = self.username {
            record.username = Some(username.clone());
        }
        if let Some(v) = self.count_300 {
            record.count_300 = v;
        }
        if let Some(v) = self.count_100 {
            record.count_100 = v;
        }
        if let Some(v) = self.count_50 {
            record.count_50 = v;
        }
        if let Some(v) = self.count_geki {
            record.count_geki = v;
        }
        if let Some(v) = self.count_katu {
            record.count_katu = v;
        }
        if let Some(v) = self.count_miss {
            record.count_miss = v;
        }
        if let Some(v) = self.score {
            record.score = v;
        }
        if let Some(v) = self.max_combo {
            record.max_combo = v;
        }
        if let Some(v) = self.perfect {
            record.perfect = v;
        }
        if let Some(v) = self.mods {
            record.mods = v;
        }
        if let Some(v) = self.timestamp_ticks {
            record.timestamp_ticks = v;
        }
        Ok(())
    }
}
