//! Command-line surface: a thin dispatch layer over the core interfaces.
//!
//! Flags map one-to-one onto [`Mutation`] fields. Nothing is written unless
//! `--output` is given; inspection and mutation without an output path act
//! on memory only.

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::batch::Batch;
use crate::error::Result;
use crate::mods;
use crate::mutation::Mutation;
use crate::report;

/// Inspect and batch-edit osu! replay (.osr) files.
#[derive(Debug, Parser)]
#[command(name = "osredit", version)]
pub struct Cli {
    /// Replay file, or directory whose .osr files form one batch
    pub path: PathBuf,

    /// Set the player name
    #[arg(long)]
    pub nickname: Option<String>,

    /// Set the number of 300s
    #[arg(long, value_name = "0-65535")]
    pub n300: Option<u16>,

    /// Set the number of 100s
    #[arg(long, value_name = "0-65535")]
    pub n100: Option<u16>,

    /// Set the number of 50s
    #[arg(long, value_name = "0-65535")]
    pub n50: Option<u16>,

    /// Set the number of gekis
    #[arg(long, value_name = "0-65535")]
    pub ngekis: Option<u16>,

    /// Set the number of katus
    #[arg(long, value_name = "0-65535")]
    pub nkatus: Option<u16>,

    /// Set the number of misses
    #[arg(long, value_name = "0-65535")]
    pub nmisses: Option<u16>,

    /// Set the total score
    #[arg(long, value_name = "0-2147483647")]
    pub score: Option<u32>,

    /// Set the maximum combo
    #[arg(long, value_name = "0-65535")]
    pub maxcombo: Option<u16>,

    /// Set the perfect-full-combo flag
    #[arg(long, value_name = "true|false")]
    pub pfc: Option<bool>,

    /// Set mods by name, comma-separated (e.g. Hidden,DoubleTime or HD,DT)
    #[arg(long, value_name = "MOD,MOD,...", conflicts_with = "rawmods")]
    pub mods: Option<String>,

    /// Set mods as a raw bitmask
    #[arg(long, value_name = "BITMASK")]
    pub rawmods: Option<u32>,

    /// Set the date as ticks (100 ns units since 0001-01-01 UTC)
    #[arg(long, value_name = "TICKS")]
    pub time: Option<u64>,

    /// Print a report for every loaded replay
    #[arg(long)]
    pub info: bool,

    /// Output file (single replay) or directory (batch)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Translate flags into the core's uniform mutation set.
    ///
    /// Mod names are encoded here, so an unknown name rejects the whole
    /// request before anything is written.
    pub fn mutation(&self) -> Result<Mutation> {
        let mods = match (&self.mods, self.rawmods) {
            (Some(names), _) => Some(mods::encode(names.split(',').map(str::trim))?),
            (None, Some(raw)) => Some(raw),
            (None, None) => None,
        };
        Ok(Mutation {
            username: self.nickname.clone(),
            count_300: self.n300,
            count_100: self.n100,
            count_50: self.n50,
            count_geki: self.ngekis,
            count_katu: self.nkatus,
            count_miss: self.nmisses,
            score: self.score,
            max_combo: self.maxcombo,
            perfect: self.pfc,
            mods,
            timestamp_ticks: self.time,
        })
    }
}

/// Run one invocation end to end: load, mutate, report, write.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut batch = Batch::load(&cli.path)?;
    if batch.is_empty() {
        warn!(path = %cli.path.display(), "no replays found");
        return Ok(());
    }

    let mutation = cli.mutation()?;
    if !mutation.is_empty() {
        batch.apply(&mutation)?;
    }

    if cli.info {
        for record in batch.records() {
            if let Some(ref path) = record.path {
                println!("Replay: {}", path.display());
            }
            println!();
            print!("{}", report::render(record)?);
            println!();
        }
    }

    if let Some(ref output) = cli.output {
        batch.write_to(output)?;
    }

    Ok(())
}
