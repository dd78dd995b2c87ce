//! Names for the mod bitmask.
//!
//! Each bit of the 32-bit mask corresponds to one gameplay mod. Decoding
//! walks a fixed table from bit 0 upward, so the rendered name list always
//! comes out in the same order regardless of how the mask was built.
//! Encoding also accepts historical spellings, the two-letter acronyms
//! players use, and a few fixed unions; matching ignores ASCII case.

use crate::error::{ReplayError, Result};

/// Canonical single-bit mods, in display order.
const MOD_TABLE: &[(&str, u32)] = &[
    ("NoFail", 1 << 0),
    ("Easy", 1 << 1),
    ("TouchDevice", 1 << 2),
    ("Hidden", 1 << 3),
    ("HardRock", 1 << 4),
    ("SuddenDeath", 1 << 5),
    ("DoubleTime", 1 << 6),
    ("Relax", 1 << 7),
    ("HalfTime", 1 << 8),
    ("Nightcore", 1 << 9),
    ("Flashlight", 1 << 10),
    ("Autoplay", 1 << 11),
    ("SpunOut", 1 << 12),
    ("Autopilot", 1 << 13),
    ("Perfect", 1 << 14),
    ("Key4", 1 << 15),
    ("Key5", 1 << 16),
    ("Key6", 1 << 17),
    ("Key7", 1 << 18),
    ("Key8", 1 << 19),
    ("FadeIn", 1 << 20),
    ("Random", 1 << 21),
    ("Cinema", 1 << 22),
    ("Target", 1 << 23),
    ("Key9", 1 << 24),
    ("KeyCoop", 1 << 25),
    ("Key1", 1 << 26),
    ("Key3", 1 << 27),
    ("Key2", 1 << 28),
    ("ScoreV2", 1 << 29),
    ("Mirror", 1 << 30),
];

const KEY_MOD: u32 = (1 << 15)
    | (1 << 16)
    | (1 << 17)
    | (1 << 18)
    | (1 << 19)
    | (1 << 24)
    | (1 << 25)
    | (1 << 26)
    | (1 << 27)
    | (1 << 28);

const FREE_MOD_ALLOWED: u32 = (1 << 0)
    | (1 << 1)
    | (1 << 3)
    | (1 << 4)
    | (1 << 5)
    | (1 << 10)
    | (1 << 20)
    | (1 << 7)
    | (1 << 13)
    | (1 << 12)
    | KEY_MOD;

const SCORE_INCREASE_MODS: u32 = (1 << 3) | (1 << 4) | (1 << 6) | (1 << 10) | (1 << 20);

/// Accepted on encode only: historical spellings, acronyms, unions.
const ALIAS_TABLE: &[(&str, u32)] = &[
    ("NoMod", 0),
    ("NM", 0),
    ("NF", 1 << 0),
    ("EZ", 1 << 1),
    ("NoVideo", 1 << 2),
    ("TD", 1 << 2),
    ("HD", 1 << 3),
    ("HR", 1 << 4),
    ("SD", 1 << 5),
    ("DT", 1 << 6),
    ("RX", 1 << 7),
    ("HT", 1 << 8),
    ("NC", 1 << 9),
    ("FL", 1 << 10),
    ("Auto", 1 << 11),
    ("SO", 1 << 12),
    ("Relax2", 1 << 13),
    ("AP", 1 << 13),
    ("PF", 1 << 14),
    ("FI", 1 << 20),
    ("RD", 1 << 21),
    ("CN", 1 << 22),
    ("TargetPractice", 1 << 23),
    ("TP", 1 << 23),
    ("V2", 1 << 29),
    ("MR", 1 << 30),
    ("KeyMod", KEY_MOD),
    ("FreeModAllowed", FREE_MOD_ALLOWED),
    ("ScoreIncreaseMods", SCORE_INCREASE_MODS),
];

const fn named_bits() -> u32 {
    let mut bits = 0;
    let mut i = 0;
    while i < MOD_TABLE.len() {
        bits |= MOD_TABLE[i].1;
        i += 1;
    }
    bits
}

/// Union of every bit that has a canonical name.
const NAMED_BITS: u32 = named_bits();

/// Decode a bitmask into canonical mod names, in display order.
///
/// An empty mask decodes to an empty list. Bits outside the named table
/// fail with [`ReplayError::UnknownModBits`] carrying exactly the
/// unrecognized bits.
pub fn decode(mask: u32) -> Result<Vec<&'static str>> {
    let unnamed = mask & !NAMED_BITS;
    if unnamed != 0 {
        return Err(ReplayError::UnknownModBits(unnamed));
    }
    Ok(MOD_TABLE
        .iter()
        .filter(|(_, bit)| mask & bit != 0)
        .map(|(name, _)| *name)
        .collect())
}

/// Combine mod names into a bitmask.
///
/// Accepts canonical names and everything in the alias table, ignoring
/// ASCII case. An empty iterator yields the empty mask. The first name
/// with no match fails the whole request with [`ReplayError::UnknownMod`].
pub fn encode<'a, I>(names: I) -> Result<u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut mask = 0;
    for name in names {
        mask |= lookup(name)?;
    }
    Ok(mask)
}

fn lookup(name: &str) -> Result<u32> {
    for (candidate, bits) in MOD_TABLE.iter().chain(ALIAS_TABLE) {
        if candidate.eq_ignore_ascii_case(name) {
            return Ok(*bits);
        }
    }
    Err(ReplayError::UnknownMod(name.to_owned()))
}
