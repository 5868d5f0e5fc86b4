// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::LevelFilter;

use crate::config::consts::*;
use crate::config::options::{ExportOptions, PullOptions};
use crate::core::HttpTransport;
use crate::export;
use crate::ids::IdList;
use crate::progress::Progress;
use crate::pull::{self, BatchWindow, Sleep};
use crate::schema::Table;

/// Pull board game details from the BGG XML API and write JSON/CSV tables.
#[derive(Parser, Debug)]
#[command(name = "bgg_pull", version, about)]
pub struct Args {
    /// CSV of `id,short description` rows, one game per line
    #[arg(long)]
    pub ids: PathBuf,

    /// Last (1-based) list position to pull
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Ids per request (1-499)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// First (1-based) list position to pull
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: usize,

    /// Seconds to wait between requests (at least 5)
    #[arg(long, default_value_t = MIN_PAUSE.as_secs())]
    pub pause_secs: u64,

    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Appended to every output file stem
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Defaults to .store/pull.log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log debug lines too
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn pull_options(&self) -> PullOptions {
        PullOptions {
            limit: self.limit,
            batch_size: self.batch_size,
            start: self.start,
            pause: Duration::from_secs(self.pause_secs),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions { out_dir: self.out_dir.clone(), suffix: self.suffix.clone() }
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(STORE_DIR).join(LOG_FILE));
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    crate::log::init(&log_path, level).wrap_err("could not start the log")?;

    let ids = IdList::load(&args.ids)
        .wrap_err_with(|| format!("could not read id list {}", args.ids.display()))?;

    let mut transport = HttpTransport::new()?;
    let mut console = Console;
    let out = pull::run(&ids, &args.pull_options(), &mut transport, &mut Sleep, Some(&mut console))?;

    let table = Table::build(&out);
    let written = export::write_all(&out, &table, &args.export_options())?;
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/* ---------------- console progress ---------------- */

struct Console;

impl Progress for Console {
    fn begin(&mut self, batches: usize, ids: usize) {
        println!("{ids} ids in {batches} batches");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn batch_started(&mut self, window: &BatchWindow) {
        println!("Pulling IDs {}-{}", window.start, window.end);
    }

    fn finish(&mut self) {
        println!("Done.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_options() {
        let args = Args::try_parse_from([
            "bgg_pull", "--ids", "ids.csv", "--limit", "250", "--batch-size", "50",
            "--start", "101", "--pause-secs", "7", "--suffix", "_test",
        ])
        .unwrap();
        let opts = args.pull_options();
        assert_eq!((opts.limit, opts.batch_size, opts.start), (250, 50, 101));
        assert_eq!(opts.pause, Duration::from_secs(7));
        assert_eq!(
            args.export_options().games_path("csv"),
            PathBuf::from("out").join("all_games_test.csv")
        );
    }

    #[test]
    fn defaults_validate() {
        let args = Args::try_parse_from(["bgg_pull", "--ids", "ids.csv"]).unwrap();
        assert!(args.pull_options().validate().is_ok());
        assert!(!args.verbose);
    }

    #[test]
    fn ids_flag_is_required() {
        assert!(Args::try_parse_from(["bgg_pull"]).is_err());
    }
}
