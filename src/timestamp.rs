//! Conversion between on-disk tick timestamps and calendar time.
//!
//! Replays store their date as a count of 100-nanosecond ticks since
//! 0001-01-01T00:00:00 UTC. The stored tick count is the value of record;
//! calendar time is derived on demand and never cached.

use chrono::{DateTime, Utc};

/// 100 ns ticks per second.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Tick count at 1970-01-01T00:00:00 UTC.
pub const UNIX_EPOCH_TICKS: u64 = 621_355_968_000_000_000;

/// Convert an on-disk tick count to UTC calendar time.
///
/// Exact for every tick value: one tick is a whole number of nanoseconds,
/// and the entire `u64` tick range lands inside chrono's representable
/// dates, so `utc_to_ticks(ticks_to_utc(t)) == t` always holds.
pub fn ticks_to_utc(ticks: u64) -> DateTime<Utc> {
    let rel = i128::from(ticks) - i128::from(UNIX_EPOCH_TICKS);
    let secs = rel.div_euclid(i128::from(TICKS_PER_SECOND)) as i64;
    let nanos = (rel.rem_euclid(i128::from(TICKS_PER_SECOND)) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
        .expect("u64 tick range lies within chrono's representable dates")
}

/// Convert UTC calendar time back to a tick count.
///
/// Precision finer than one tick is truncated, and instants before
/// 0001-01-01 clamp to tick 0. Neither case arises for values produced by
/// [`ticks_to_utc`].
pub fn utc_to_ticks(when: DateTime<Utc>) -> u64 {
    let rel = i128::from(when.timestamp()) * i128::from(TICKS_PER_SECOND)
        + i128::from(when.timestamp_subsec_nanos() / 100);
    let ticks = rel + i128::from(UNIX_EPOCH_TICKS);
    ticks.max(0) as u64
}
