//! Table and word-list output

use crate::concordance::ConcordanceLine;
use crate::results::{OccurrenceCount, ResultTables};
use crate::stats::{CorpusStatistics, PosSummaryRow};
use log::{info, warn};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write table: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Delimited table flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
        }
    }
}

/// A serializable table row with a fixed column header
pub trait TableRow: Serialize {
    /// Column names, in field order
    const HEADER: &'static [&'static str];
}

impl TableRow for OccurrenceCount {
    const HEADER: &'static [&'static str] = &["list", "expression", "count"];
}

impl TableRow for ConcordanceLine {
    const HEADER: &'static [&'static str] = &["list", "expression", "before", "hit", "after"];
}

impl TableRow for PosSummaryRow {
    const HEADER: &'static [&'static str] =
        &["pos", "total_tokens", "unique_lemmas", "top_5", "last_5"];
}

/// Write the header and then every row. An empty table still gets its header.
pub fn write_rows<W: Write, T: TableRow>(
    writer: W,
    rows: &[T],
    format: TableFormat,
) -> Result<(), ExportError> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_writer(writer);
    out.write_record(T::HEADER)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush().map_err(|e| ExportError::Csv(e.into()))?;
    Ok(())
}

/// Write a table to `dir/<stem>.<ext>`
pub fn save_table<T: TableRow>(
    dir: &Path,
    stem: &str,
    rows: &[T],
    format: TableFormat,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(ExportError::io(dir))?;
    let path = dir.join(format!("{}.{}", stem, format.extension()));
    let file = File::create(&path).map_err(ExportError::io(&path))?;
    write_rows(BufWriter::new(file), rows, format)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Write `counts` and `concordance` tables
pub fn save_results(
    dir: &Path,
    tables: &ResultTables,
    format: TableFormat,
) -> Result<(PathBuf, PathBuf), ExportError> {
    let counts = save_table(dir, "counts", tables.counts(), format)?;
    let concordance = save_table(dir, "concordance", tables.concordance(), format)?;
    Ok((counts, concordance))
}

/// File stem for a POS code's word list
fn pos_file_stem(pos: &str) -> String {
    pos.chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}

/// Write one `<POS>.txt` per category with its sorted, distinct lemmas
pub fn save_pos_lists(dir: &Path, stats: &CorpusStatistics) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(ExportError::io(dir))?;

    let mut written = Vec::with_capacity(stats.breakdowns().len());
    let mut used: FxHashSet<String> = FxHashSet::default();
    for breakdown in stats.breakdowns() {
        let words = breakdown.word_list();
        let stem = pos_file_stem(&breakdown.pos);
        let mut name = format!("{}.txt", stem);
        let mut n = 1;
        while !used.insert(name.clone()) {
            n += 1;
            name = format!("{}_{}.txt", stem, n);
        }
        if n > 1 {
            warn!("POS {:?} clashes with an earlier file name; writing {}", breakdown.pos, name);
        }
        let path = dir.join(name);
        fs::write(&path, words.join("\n")).map_err(ExportError::io(&path))?;
        info!("Saved {} lemmas to {}", words.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
