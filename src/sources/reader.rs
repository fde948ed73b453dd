/*! Streaming reader over tab separated corpus archives.

A [RecordStream] is a lazy, forward-only [Iterator] of [RawRecord]s.
It never holds more than one line in memory.

- Malformed lines (wrong field count, unparsable score, invalid UTF-8) are skipped and counted.
- An IO error ends the stream (after being logged).
!*/
use std::{fs::File, io::Read, path::Path};

use flate2::read::MultiGzDecoder;
use log::{debug, warn};

use crate::{error::Error, lang::LangPair};

use super::record::{Columns, RawRecord};

/// On-disk shape of the records of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Header row of language codes, one field per language.
    Keyed,
    /// `score\tfirst\tsecond`, text columns in canonical order of the pair.
    Scored(LangPair),
    /// `first\tsecond`, text columns in canonical order of the pair.
    Bilingual(LangPair),
}

pub struct RecordStream<R: Read> {
    label: String,
    layout: Layout,
    columns: Columns,
    arity: usize,
    records: csv::StringRecordsIntoIter<R>,
    nb_read: u64,
    nb_malformed: u64,
    done: bool,
}

impl RecordStream<MultiGzDecoder<File>> {
    /// Open a gzipped archive.
    ///
    /// Any failure here (missing file, unreadable header) makes the archive unusable,
    /// and is reported as [Error::SourceUnavailable].
    pub fn from_path_gzip(path: &Path, layout: Layout, label: &str) -> Result<Self, Error> {
        let unavailable = |reason: String| Error::SourceUnavailable {
            pair: label.to_string(),
            reason,
        };

        let f = File::open(path).map_err(|e| unavailable(format!("{:?}: {}", path, e)))?;
        Self::new(MultiGzDecoder::new(f), layout, label).map_err(|e| match e {
            e @ Error::SourceUnavailable { .. } => e,
            e => unavailable(format!("{:?}: {}", path, e)),
        })
    }
}

impl<R: Read> RecordStream<R> {
    pub fn new(reader: R, layout: Layout, label: &str) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(layout == Layout::Keyed)
            .from_reader(reader);

        let (columns, arity) = match &layout {
            Layout::Keyed => {
                let header = reader.headers()?;
                if header.is_empty() {
                    return Err(Error::SourceUnavailable {
                        pair: label.to_string(),
                        reason: "empty header".to_string(),
                    });
                }
                (Columns::from_header(header.iter()), header.len())
            }
            Layout::Scored(pair) => (Columns::canonical(pair), 3),
            Layout::Bilingual(pair) => (Columns::canonical(pair), 2),
        };

        debug!("[{}] opened stream with columns {:?}", label, columns);

        Ok(Self {
            label: label.to_string(),
            layout,
            columns,
            arity,
            records: reader.into_records(),
            nb_read: 0,
            nb_malformed: 0,
            done: false,
        })
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Number of lines read so far, malformed ones included.
    pub fn nb_read(&self) -> u64 {
        self.nb_read
    }

    pub fn nb_malformed(&self) -> u64 {
        self.nb_malformed
    }

    fn parse(&self, record: &csv::StringRecord) -> Option<RawRecord> {
        if record.len() != self.arity {
            return None;
        }

        match self.layout {
            Layout::Keyed => Some(RawRecord::Keyed(
                record.iter().map(String::from).collect(),
            )),
            Layout::Scored(_) => {
                let score: f64 = record.get(0)?.trim().parse().ok()?;
                if !score.is_finite() {
                    return None;
                }
                Some(RawRecord::Scored {
                    score,
                    first: record.get(1)?.to_string(),
                    second: record.get(2)?.to_string(),
                })
            }
            Layout::Bilingual(_) => Some(RawRecord::Bilingual {
                first: record.get(0)?.to_string(),
                second: record.get(1)?.to_string(),
            }),
        }
    }
}

impl<R: Read> Iterator for RecordStream<R> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let record = match self.records.next() {
                Some(Ok(record)) => record,
                Some(Err(e)) if e.is_io_error() => {
                    warn!("[{}] stream interrupted: {}", self.label, e);
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.nb_read += 1;
                    self.nb_malformed += 1;
                    debug!("[{}] skipping unreadable line: {}", self.label, e);
                    continue;
                }
                None => {
                    self.done = true;
                    return None;
                }
            };

            self.nb_read += 1;
            match self.parse(&record) {
                Some(raw) => return Some(raw),
                None => {
                    self.nb_malformed += 1;
                    debug!(
                        "[{}] skipping malformed line {} ({} fields)",
                        self.label,
                        self.nb_read,
                        record.len()
                    );
                }
            }
        }
    }
}
