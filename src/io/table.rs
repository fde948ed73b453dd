//! Unified multilingual table and its serialization.
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A row of the unified table.
///
/// Fields are declared in lexicographic order, which is the column order of every output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub from: String,
    pub language: String,
    pub sentence: String,
}

impl TableRow {
    pub fn new(from: &str, language: &str, sentence: String) -> Self {
        Self {
            from: from.to_string(),
            language: language.to_string(),
            sentence,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedTable {
    rows: Vec<TableRow>,
}

impl UnifiedTable {
    pub fn push(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows for `language`.
    pub fn count_lang(&self, language: &str) -> usize {
        self.rows.iter().filter(|r| r.language == language).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Tab separated, with a header row.
    #[default]
    Tsv,
    /// One JSON object per line.
    Jsonl,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Tsv => "tsv",
            TableFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for TableFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(TableFormat::Tsv),
            "jsonl" | "json" => Ok(TableFormat::Jsonl),
            other => Err(Error::Config(format!("unknown table format {:?}", other))),
        }
    }
}

/// Persist `table` at `path`.
///
/// The table is written to a temporary file first, then renamed:
/// `path` only ever holds a complete table.
pub fn write_table(table: &UnifiedTable, path: &Path, format: TableFormat) -> Result<(), Error> {
    let tmp = tmp_path(path);
    {
        let f = BufWriter::new(File::create(&tmp)?);
        match format {
            TableFormat::Tsv => {
                let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_writer(f);
                for row in table.rows() {
                    w.serialize(row)?;
                }
                w.flush()?;
            }
            TableFormat::Jsonl => {
                let mut w = f;
                for row in table.rows() {
                    serde_json::to_writer(&mut w, row)?;
                    w.write_all(b"\n")?;
                }
                w.flush()?;
            }
        }
    }

    std::fs::rename(&tmp, path)?;
    info!("saved {} rows to {:?}", table.len(), path);
    Ok(())
}

/// Read back a table written by [write_table].
pub fn read_table(path: &Path, format: TableFormat) -> Result<UnifiedTable, Error> {
    let mut table = UnifiedTable::default();
    match format {
        TableFormat::Tsv => {
            let mut r = csv::ReaderBuilder::new().delimiter(b'\t').from_path(path)?;
            for row in r.deserialize() {
                table.push(row?);
            }
        }
        TableFormat::Jsonl => {
            let f = std::io::BufReader::new(File::open(path)?);
            for row in serde_json::Deserializer::from_reader(f).into_iter::<TableRow>() {
                table.push(row?);
            }
        }
    }
    Ok(table)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.as_os_str().to_owned();
    p.push(".tmp");
    PathBuf::from(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> UnifiedTable {
        let mut t = UnifiedTable::default();
        t.push(TableRow::new("TED2020", "it", "Ciao".to_string()));
        t.push(TableRow::new("TED2020", "en", "Say \"hi\"".to_string()));
        t
    }

    #[test]
    fn tsv_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("df.tsv");
        write_table(&table(), &path, TableFormat::Tsv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next(), Some("from\tlanguage\tsentence"));
        assert_eq!(read_table(&path, TableFormat::Tsv).unwrap(), table());
        assert!(!dir.path().join("df.tsv.tmp").exists());
    }

    #[test]
    fn jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("df.jsonl");
        write_table(&table(), &path, TableFormat::Jsonl).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next(),
            Some(r#"{"from":"TED2020","language":"it","sentence":"Ciao"}"#)
        );
        assert_eq!(read_table(&path, TableFormat::Jsonl).unwrap(), table());
    }

    #[test]
    fn counts() {
        let t = table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.count_lang("en"), 1);
        assert_eq!(t.count_lang("ar"), 0);
    }

    #[test]
    fn format_from_str() {
        assert_eq!("TSV".parse::<TableFormat>().unwrap(), TableFormat::Tsv);
        assert_eq!("jsonl".parse::<TableFormat>().unwrap(), TableFormat::Jsonl);
        assert!("pickle".parse::<TableFormat>().is_err());
    }
}
