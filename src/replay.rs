//! In-memory replay records and the `.osr` on-disk layout.
//!
//! On-disk field order:
//!
//! ```text
//! gamemode        u8
//! game_version    u32
//! beatmap_hash    string
//! username        string
//! replay_hash     string
//! count_300       u16
//! count_100       u16
//! count_50        u16
//! count_geki      u16
//! count_katu      u16
//! count_miss      u16
//! score           u32
//! max_combo       u16
//! perfect         bool
//! mods            u32 (raw bitmask)
//! life_bar_graph  string
//! timestamp       u64 (100 ns ticks since 0001-01-01 UTC)
//! action_stream   u32 length + raw bytes
//! replay_id       i64 (i32 before game version 20140721)
//! ```
//!
//! Integers are little-endian; strings use the presence-byte encoding of
//! [`crate::codec`]. Every field is independently settable after parse, and
//! untouched fields re-emit their parsed bytes exactly.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::codec::{self, ByteReader};
use crate::error::{ReplayError, Result};
use crate::mods;
use crate::timestamp;

/// File extension for replay files.
pub const OSR_EXTENSION: &str = "osr";

/// First game version that stores the online score id as 8 bytes.
pub const WIDE_REPLAY_ID_VERSION: u32 = 20140721;

/// Game mode a replay was recorded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gamemode {
    Osu,
    Taiko,
    Catch,
    Mania,
}

impl Gamemode {
    /// Decode the on-disk mode byte.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Gamemode::Osu),
            1 => Ok(Gamemode::Taiko),
            2 => Ok(Gamemode::Catch),
            3 => Ok(Gamemode::Mania),
            other => Err(ReplayError::CorruptReplay(format!(
                "unknown gamemode byte {other:#04x}"
            ))),
        }
    }

    /// Encode as the on-disk mode byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Gamemode::Osu => 0,
            Gamemode::Taiko => 1,
            Gamemode::Catch => 2,
            Gamemode::Mania => 3,
        }
    }
}

impl fmt::Display for Gamemode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gamemode::Osu => "osu",
            Gamemode::Taiko => "taiko",
            Gamemode::Catch => "catch",
            Gamemode::Mania => "mania",
        };
        write!(f, "{name}")
    }
}

/// One parsed replay file.
///
/// The action stream is the compressed input recording; it is carried as an
/// opaque blob and preserved byte-for-byte, never decompressed or
/// interpreted. String fields are `Option` because the format distinguishes
/// an absent string from an empty one.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayRecord {
    /// Game mode the replay was recorded in.
    pub gamemode: Gamemode,
    /// Client version at recording time, e.g. 20140721.
    pub game_version: u32,
    /// MD5 hex digest of the beatmap file, stored as opaque text.
    pub beatmap_hash: Option<String>,
    /// Player name.
    pub username: Option<String>,
    /// MD5 hex digest over selected replay fields, stored as opaque text.
    pub replay_hash: Option<String>,
    /// Number of 300s.
    pub count_300: u16,
    /// Number of 100s.
    pub count_100: u16,
    /// Number of 50s.
    pub count_50: u16,
    /// Number of gekis (maximum-accuracy 300s).
    pub count_geki: u16,
    /// Number of katus.
    pub count_katu: u16,
    /// Number of misses.
    pub count_miss: u16,
    /// Total score.
    pub score: u32,
    /// Greatest combo reached.
    pub max_combo: u16,
    /// Perfect full combo flag.
    pub perfect: bool,
    /// Raw mod bitmask as stored on disk; see [`crate::mods`].
    pub mods: u32,
    /// Life bar samples in the client's own text form, kept verbatim.
    pub life_bar_graph: Option<String>,
    /// 100 ns ticks since 0001-01-01T00:00:00 UTC.
    pub timestamp_ticks: u64,
    /// Compressed action stream, byte-for-byte as stored.
    pub action_stream: Vec<u8>,
    /// Online score id; 0 for unsubmitted plays.
    pub replay_id: i64,
    /// Source file this record was loaded from, if any. Never serialized.
    pub path: Option<PathBuf>,
}

fn read_field<T>(field: &'static str, value: Result<T>) -> Result<T> {
    value.map_err(|e| ReplayError::CorruptReplay(format!("{field}: {e}")))
}

impl ReplayRecord {
    /// Parse a record from raw `.osr` bytes.
    ///
    /// Reads fields strictly in on-disk order. A primitive failure becomes
    /// [`ReplayError::CorruptReplay`] naming the field being read. Trailing
    /// bytes after `replay_id` are tolerated.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);

        let gamemode = Gamemode::from_byte(read_field("gamemode", r.read_u8())?)?;
        let game_version = read_field("game_version", r.read_u32())?;
        let beatmap_hash = read_field("beatmap_hash", r.read_string())?;
        let username = read_field("username", r.read_string())?;
        let replay_hash = read_field("replay_hash", r.read_string())?;
        let count_300 = read_field("count_300", r.read_u16())?;
        let count_100 = read_field("count_100", r.read_u16())?;
        let count_50 = read_field("count_50", r.read_u16())?;
        let count_geki = read_field("count_geki", r.read_u16())?;
        let count_katu = read_field("count_katu", r.read_u16())?;
        let count_miss = read_field("count_miss", r.read_u16())?;
        let score = read_field("score", r.read_u32())?;
        let max_combo = read_field("max_combo", r.read_u16())?;
        let perfect = read_field("perfect", r.read_bool())?;
        let mods = read_field("mods", r.read_u32())?;
        let life_bar_graph = read_field("life_bar_graph", r.read_string())?;
        let timestamp_ticks = read_field("timestamp", r.read_u64())?;
        let stream_len = read_field("action_stream length", r.read_u32())?;
        let action_stream = read_field("action_stream", r.read_bytes(stream_len as usize))?;
        let replay_id = if game_version >= WIDE_REPLAY_ID_VERSION {
            read_field("replay_id", r.read_i64())?
        } else {
            i64::from(read_field("replay_id", r.read_i32())?)
        };

        if r.remaining() > 0 {
            debug!(trailing = r.remaining(), "ignoring trailing bytes after replay_id");
        }

        Ok(Self {
            gamemode,
            game_version,
            beatmap_hash,
            username,
            replay_hash,
            count_300,
            count_100,
            count_50,
            count_geki,
            count_katu,
            count_miss,
            score,
            max_combo,
            perfect,
            mods,
            life_bar_graph,
            timestamp_ticks,
            action_stream,
            replay_id,
            path: None,
        })
    }

    /// Serialize to `.osr` bytes from current in-memory values.
    ///
    /// The replay id width follows `game_version`, so files older than
    /// [`WIDE_REPLAY_ID_VERSION`] round-trip bit-exact.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128 + self.action_stream.len());
        codec::write_u8(&mut buf, self.gamemode.as_byte());
        codec::write_u32(&mut buf, self.game_version);
        codec::write_string(&mut buf, self.beatmap_hash.as_deref());
        codec::write_string(&mut buf, self.username.as_deref());
        codec::write_string(&mut buf, self.replay_hash.as_deref());
        codec::write_u16(&mut buf, self.count_300);
        codec::write_u16(&mut buf, self.count_100);
        codec::write_u16(&mut buf, self.count_50);
        codec::write_u16(&mut buf, self.count_geki);
        codec::write_u16(&mut buf, self.count_katu);
        codec::write_u16(&mut buf, self.count_miss);
        codec::write_u32(&mut buf, self.score);
        codec::write_u16(&mut buf, self.max_combo);
        codec::write_bool(&mut buf, self.perfect);
        codec::write_u32(&mut buf, self.mods);
        codec::write_string(&mut buf, self.life_bar_graph.as_deref());
        codec::write_u64(&mut buf, self.timestamp_ticks);
        codec::write_u32(&mut buf, self.action_stream.len() as u32);
        buf.extend_from_slice(&self.action_stream);
        if self.game_version >= WIDE_REPLAY_ID_VERSION {
            codec::write_i64(&mut buf, self.replay_id);
        } else {
            codec::write_i32(&mut buf, self.replay_id as i32);
        }
        buf
    }

    /// Load and parse a replay file.
    ///
    /// A missing file maps to [`ReplayError::ReplayNotFound`]; the loaded
    /// record remembers its source path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReplayError::ReplayNotFound(path.to_path_buf()),
            _ => ReplayError::Io(e),
        })?;
        debug!(file = %path.display(), bytes = data.len(), "parsing replay");
        let mut record = Self::parse(&data)?;
        record.path = Some(path.to_path_buf());
        Ok(record)
    }

    /// Serialize and write to `path`.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.serialize())?;
        Ok(())
    }

    /// Decoded mod names for the current bitmask, in display order.
    pub fn mod_names(&self) -> Result<Vec<&'static str>> {
        mods::decode(self.mods)
    }

    /// The timestamp as UTC calendar time.
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        timestamp::ticks_to_utc(self.timestamp_ticks)
    }
}
