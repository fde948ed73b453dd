/*! Per-pair sinks.

A sink is an append-only, gzip compressed file holding the accepted pairs of one language pair,
one `source\ttarget` line per pair.

Writes go to `<name>.partial`, which is renamed to its final name by [Sink::finish].
As such, a sink that exists under its final name is always complete, and is
what makes re-runs skip already extracted pairs.
!*/
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use flate2::{read::MultiGzDecoder, write::GzEncoder, Compression};
use log::{debug, info, warn};

use crate::{error::Error, lang::LangPair, sentence::SentencePair, sources::Corpus};

const PARTIAL_EXT: &str = "partial";

/// Something accepted pairs can be appended to.
pub trait PairWriter {
    fn append(&mut self, pair: &SentencePair) -> Result<(), Error>;
}

impl PairWriter for Vec<SentencePair> {
    fn append(&mut self, pair: &SentencePair) -> Result<(), Error> {
        self.push(pair.clone());
        Ok(())
    }
}

/// Location and size of a finished sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSink {
    pub path: PathBuf,
    pub count: usize,
}

pub struct Sink {
    path: PathBuf,
    partial: PathBuf,
    writer: GzEncoder<BufWriter<File>>,
    count: usize,
}

impl Sink {
    /// `{corpus}-{source}-{target}.tsv.gz`
    pub fn filename(corpus: Corpus, pair: &LangPair) -> String {
        format!("{}-{}.tsv.gz", corpus.name(), pair.key())
    }

    pub fn path_for(dir: &Path, corpus: Corpus, pair: &LangPair) -> PathBuf {
        dir.join(Self::filename(corpus, pair))
    }

    /// Create an empty sink in `dir`, truncating an eventual partial file.
    pub fn create(dir: &Path, corpus: Corpus, pair: &LangPair) -> Result<Self, Error> {
        let path = Self::path_for(dir, corpus, pair);
        let partial = partial_path(&path);

        debug!("[{}] creating sink {:?}", pair, partial);
        let f = File::create(&partial)?;
        let writer = GzEncoder::new(BufWriter::new(f), Compression::default());

        Ok(Self {
            path,
            partial,
            writer,
            count: 0,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush, close and move the sink to its final location.
    pub fn finish(self) -> Result<FinishedSink, Error> {
        let mut inner = self.writer.finish()?;
        inner.flush()?;
        inner.get_ref().sync_all()?;
        drop(inner);

        std::fs::rename(&self.partial, &self.path)?;
        info!("wrote {} pairs to {:?}", self.count, self.path);

        Ok(FinishedSink {
            path: self.path,
            count: self.count,
        })
    }

    /// Drop the sink and its partial file.
    pub fn discard(self) -> Result<(), Error> {
        let partial = self.partial.clone();
        drop(self.writer);
        debug!("discarding {:?}", partial);
        std::fs::remove_file(partial)?;
        Ok(())
    }

    /// Remove `.partial` files left in `dir` by interrupted runs.
    pub fn discard_partials(dir: &Path) -> Result<usize, Error> {
        let pattern = dir.join(format!("*.tsv.gz.{}", PARTIAL_EXT));
        let pattern = pattern
            .to_str()
            .ok_or_else(|| Error::Custom(format!("invalid sink directory: {:?}", dir)))?;

        let mut nb = 0;
        for path in glob::glob(pattern)? {
            let path = path?;
            warn!("removing leftover partial sink {:?}", path);
            std::fs::remove_file(path)?;
            nb += 1;
        }
        Ok(nb)
    }
}

impl PairWriter for Sink {
    fn append(&mut self, pair: &SentencePair) -> Result<(), Error> {
        writeln!(
            self.writer,
            "{}\t{}",
            sanitize(pair.source_text()),
            sanitize(pair.target_text())
        )?;
        self.count += 1;
        Ok(())
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut p = path.as_os_str().to_owned();
    p.push(".");
    p.push(PARTIAL_EXT);
    PathBuf::from(p)
}

/// Tabs and newlines would break the line/field structure of the sink.
fn sanitize(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains(['\t', '\n', '\r']) {
        text.replace(['\t', '\n', '\r'], " ").into()
    } else {
        text.into()
    }
}

/// Reads `(source, target)` pairs back from a finished sink.
///
/// Any line that does not hold exactly two fields is an [Error::Assembly].
pub struct SinkReader {
    path: PathBuf,
    records: csv::StringRecordsIntoIter<MultiGzDecoder<File>>,
}

impl SinkReader {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)
            .map_err(|e| Error::Assembly(format!("could not open sink {:?}: {}", path, e)))?;
        let records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(MultiGzDecoder::new(f))
            .into_records();

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }
}

impl Iterator for SinkReader {
    type Item = Result<(String, String), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => {
                return Some(Err(Error::Assembly(format!(
                    "{:?}: could not read line: {}",
                    self.path, e
                ))))
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match (record.len(), record.get(0), record.get(1)) {
            (2, Some(source), Some(target)) => Some(Ok((source.to_string(), target.to_string()))),
            _ => Some(Err(Error::Assembly(format!(
                "{:?}: malformed line {}",
                self.path, line
            )))),
        }
    }
}
