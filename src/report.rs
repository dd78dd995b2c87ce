//! Fixed-format textual report for a replay record.

use crate::error::Result;
use crate::replay::ReplayRecord;

/// Render the informational report for one record.
///
/// Labels and field order are fixed; the output is one-way (nothing parses
/// it back). Absent strings render as empty, mod names are joined with
/// `", "`, and the date is the tick timestamp rendered as UTC calendar
/// time. Fails only when the mod bitmask contains bits with no named mod.
pub fn render(record: &ReplayRecord) -> Result<String> {
    let mods = record.mod_names()?.join(", ");
    Ok(format!(
        "Gamemode: {gamemode}\n\
         Game version: {game_version}\n\
         Beatmap hash: {beatmap_hash}\n\
         Player: {player}\n\
         Replay hash: {replay_hash}\n\
         300s: {n300}\n\
         100s: {n100}\n\
         50s: {n50}\n\
         Gekis: {gekis}\n\
         Katus: {katus}\n\
         Misses: {misses}\n\
         Total score: {score}\n\
         Max combo: {combo}\n\
         Perfect full combo: {pfc}\n\
         Mods: {mods}\n\
         Date: {date}\n\
         Score id: {score_id}\n",
        gamemode = record.gamemode,
        game_version = record.game_version,
        beatmap_hash = record.beatmap_hash.as_deref().unwrap_or(""),
        player = record.username.as_deref().unwrap_or(""),
        replay_hash = record.replay_hash.as_deref().unwrap_or(""),
        n300 = record.count_300,
        n100 = record.count_100,
        n50 = record.count_50,
        gekis = record.count_geki,
        katus = record.count_katu,
        misses = record.count_miss,
        score = record.score,
        combo = record.max_combo,
        pfc = record.perfect,
        mods = mods,
        date = record.timestamp_utc(),
        score_id = record.replay_id,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReplayError;
    use crate::replay::Gamemode;
    use crate::timestamp::{TICKS_PER_SECOND, UNIX_EPOCH_TICKS};

    fn sample_record() -> ReplayRecord {
        ReplayRecord {
            gamemode: Gamemode::Mania,
            game_version: 20140721,
            beatmap_hash: Some("abc".into()),
            username: Some("player one".into()),
            replay_hash: None,
            count_300: 300,
            count_100: 100,
            count_50: 50,
            count_geki: 4,
            count_katu: 5,
            count_miss: 6,
            score: 123_456,
            max_combo: 999,
            perfect: true,
            mods: (1 << 3) | (1 << 6),
            life_bar_graph: None,
            timestamp_ticks: UNIX_EPOCH_TICKS + 1_000_000_000 * TICKS_PER_SECOND,
            action_stream: Vec::new(),
            replay_id: 42,
            path: None,
        }
    }

    #[test]
    fn test_report_lines_in_fixed_order() {
        let text = render(&sample_record()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Gamemode: mania",
                "Game version: 20140721",
                "Beatmap hash: abc",
                "Player: player one",
                "Replay hash: ",
                "300s: 300",
                "100s: 100",
                "50s: 50",
                "Gekis: 4",
                "Katus: 5",
                "Misses: 6",
                "Total score: 123456",
                "Max combo: 999",
                "Perfect full combo: true",
                "Mods: Hidden, DoubleTime",
                "Date: 2001-09-09 01:46:40 UTC",
                "Score id: 42",
            ]
        );
    }

    #[test]
    fn test_empty_mask_renders_empty_mod_list() {
        let mut record = sample_record();
        record.mods = 0;
        let text = render(&record).unwrap();
        assert!(text.contains("Mods: \n"));
    }

    #[test]
    fn test_unnamed_mod_bits_fail_instead_of_rendering() {
        let mut record = sample_record();
        record.mods = 1 << 31;
        assert!(matches!(
            render(&record),
            Err(ReplayError::UnknownModBits(_))
        ));
    }
}
