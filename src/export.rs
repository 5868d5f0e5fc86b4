// src/export.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::config::options::ExportOptions;
use crate::counters::FrequencyTable;
use crate::csv::write_row;
use crate::error::PullError;
use crate::pull::PullOutput;
use crate::record::GameRecord;
use crate::schema::Table;

const SEP: char = ',';
const JSON_INDENT: &[u8] = b"      ";

/// Write everything one finished pull produces. Returns the paths written,
/// JSON first, then the games table, then the three counts files.
pub fn write_all(out: &PullOutput, table: &Table, opts: &ExportOptions) -> Result<Vec<PathBuf>, PullError> {
    ensure_directory(&opts.out_dir)?;

    let mut written = Vec::with_capacity(5);

    let path = opts.games_path("json");
    write_json(&path, &out.records)?;
    written.push(path);

    let path = opts.games_path("csv");
    write_table(&path, table)?;
    written.push(path);

    for (dimension, counts) in [
        ("types", &out.counters.types),
        ("categories", &out.counters.categories),
        ("mechanics", &out.counters.mechanics),
    ] {
        let path = opts.counts_path(dimension);
        write_counts(&path, dimension, counts)?;
        written.push(path);
    }

    log::info!("Wrote {} files to {}", written.len(), opts.out_dir.display());
    Ok(written)
}

/// Records as one JSON object keyed by id, in pull order.
pub fn write_json(path: &Path, records: &[GameRecord]) -> Result<(), PullError> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut ser = serde_json::Serializer::with_formatter(&mut w, PrettyFormatter::with_indent(JSON_INDENT));
    ById(records).serialize(&mut ser)?;
    w.flush()?;
    Ok(())
}

pub fn write_table(path: &Path, table: &Table) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_row(&mut w, &table.schema.columns, SEP)?;
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        write_row(&mut w, &cells, SEP)?;
    }
    w.flush()
}

/// `{dimension},count` header, then one row per label in first-seen order.
pub fn write_counts(path: &Path, dimension: &str, counts: &FrequencyTable) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_row(&mut w, &[dimension, "count"], SEP)?;
    for (label, n) in counts.snapshot() {
        write_row(&mut w, &[label.as_str(), &n.to_string()], SEP)?;
    }
    w.flush()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/* ---------------- helpers ---------------- */

struct ById<'a>(&'a [GameRecord]);

impl Serialize for ById<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.0.len()))?;
        for rec in self.0 {
            map.serialize_entry(&rec.id, rec)?;
        }
        map.end()
    }
}
