/*! Extraction session

Runs a [SessionConfig] from archives to unified table:

1. Leftover partial sinks are removed, and pairs whose sink already exists are resumed:
   their sentences seed the dedup set and they are not extracted again.
1. Archives are fetched if missing and read:
   - keyed corpora (TED2020) fan a single stream out to every collector,
   - per-pair corpora are read one pair after the other.
1. Sinks are finished and recorded in the manifest.
1. The table is assembled, persisted, and intermediate files are removed unless asked otherwise.

A pair whose archive cannot be fetched or opened is logged and skipped, the rest of the session goes on.
!*/
use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::{
    config::SessionConfig,
    download::Fetch,
    error::Error,
    filtering::{Admission, DedupSet, OrderGuard, QualityFilter},
    io::{write_table, Manifest, ManifestEntry, Sink, SinkReader},
    lang::LangPair,
    pipelines::Pipeline,
    processing::{cleanup, Assembler, Collector, Collectors},
    sources::{CorpusSource, Layout, RecordStream},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStatus {
    /// Extracted during this run.
    Extracted,
    /// Sink found from a previous run.
    Resumed,
    /// Archive could not be fetched or read.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    pub pair: LangPair,
    pub status: PairStatus,
    pub accepted: usize,
    pub rejected: usize,
}

impl PairReport {
    fn new(pair: LangPair, status: PairStatus) -> Self {
        Self {
            pair,
            status,
            accepted: 0,
            rejected: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pairs: Vec<PairReport>,
    pub table_path: PathBuf,
    pub nb_rows: usize,
    /// Whether sinks and manifest were removed.
    pub cleaned: bool,
}

impl Report {
    pub fn get(&self, pair: &LangPair) -> Option<&PairReport> {
        self.pairs.iter().find(|r| &r.pair == pair)
    }
}

pub struct Extraction<F> {
    config: SessionConfig,
    fetcher: F,
}

impl<F: Fetch> Extraction<F> {
    pub fn new(config: SessionConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build one collector per pair.
    ///
    /// Pairs with an existing sink are resumed: the sink is read back into `dedup`
    /// and recorded in the manifest if it was not already.
    /// A sink holding more pairs than the budget is stale, and its pair is extracted again.
    fn prepare(
        &self,
        pairs: &[LangPair],
        manifest: &mut Manifest,
        dedup: &mut DedupSet,
    ) -> Result<(Collectors<Sink>, Vec<PairReport>), Error> {
        let corpus = self.config.corpus;
        let budget = self.config.budget;
        let mut collectors = Vec::with_capacity(pairs.len());
        let mut reports = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let path = Sink::path_for(manifest.dir(), corpus, pair);

            if path.exists() {
                let lines = SinkReader::open(&path)?.collect::<Result<Vec<_>, _>>()?;
                if lines.len() <= budget {
                    for (source, target) in &lines {
                        dedup.remember(source, target);
                    }

                    let count = lines.len();
                    if manifest.get(pair).map(|e| e.count) != Some(count) {
                        debug!("[{}] recording existing sink in manifest", pair);
                        manifest.insert(ManifestEntry::new(
                            corpus,
                            pair,
                            Sink::filename(corpus, pair),
                            count,
                        ));
                    }

                    info!("[{}] {} pairs from a previous run, skipping", pair, count);
                    collectors.push(Collector::resumed(pair.clone(), budget, count));
                    let mut report = PairReport::new(pair.clone(), PairStatus::Resumed);
                    report.accepted = count;
                    reports.push(report);
                    continue;
                }

                warn!(
                    "[{}] existing sink holds {} pairs, over the budget of {}: extracting again",
                    pair,
                    lines.len(),
                    budget
                );
                std::fs::remove_file(&path)?;
                manifest.remove(pair);
            } else if manifest.remove(pair).is_some() {
                warn!("[{}] sink listed in manifest is missing, extracting again", pair);
            }

            let sink = Sink::create(manifest.dir(), corpus, pair)?;
            collectors.push(Collector::new(pair.clone(), budget, sink));
            reports.push(PairReport::new(pair.clone(), PairStatus::Extracted));
        }

        Ok((Collectors::new(collectors), reports))
    }

    /// Read the single archive shared by every pair.
    fn extract_shared(
        &self,
        source: &dyn CorpusSource,
        filter: &QualityFilter,
        collectors: &mut Collectors<Sink>,
        reports: &mut [PairReport],
        dedup: &mut DedupSet,
    ) -> Result<(), Error> {
        let label = self.config.corpus.name();
        let Some(first) = collectors.iter().find(|c| !c.is_completed()) else {
            return Ok(());
        };

        let opened = source.archive(first.pair()).and_then(|archive| {
            self.fetcher
                .fetch_if_missing(&archive.url, &archive.path)
                .map_err(|e| Error::SourceUnavailable {
                    pair: label.to_string(),
                    reason: e.to_string(),
                })?;
            RecordStream::from_path_gzip(&archive.path, Layout::Keyed, label)
        });

        let mut stream = match opened {
            Ok(stream) => stream,
            Err(e @ Error::SourceUnavailable { .. }) => {
                error!("{}", e);
                for (c, r) in collectors.iter_mut().zip(reports.iter_mut()) {
                    if !c.is_completed() {
                        mark_unavailable(c, r)?;
                    }
                }
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let columns = stream.columns().clone();
        for (c, r) in collectors.iter_mut().zip(reports.iter_mut()) {
            if !c.is_completed() && !columns.covers(c.pair()) {
                error!("[{}] language missing from {} archive", c.pair(), label);
                mark_unavailable(c, r)?;
            }
        }

        while !collectors.all_completed() {
            let Some(record) = stream.next() else {
                break;
            };

            for (c, r) in collectors.iter_mut().zip(reports.iter_mut()) {
                if c.is_completed() {
                    continue;
                }
                let Some(candidate) = columns.project(&record, c.pair()) else {
                    continue;
                };
                match filter.admit(&candidate, c.pair(), dedup) {
                    Admission::Accepted(pair) => {
                        c.offer(pair)?;
                    }
                    Admission::Rejected(reason) => {
                        debug!("[{}] rejected: {:?}", c.pair(), reason);
                        r.rejected += 1;
                    }
                    // keyed corpora carry no score
                    Admission::Truncated => c.exhaust(),
                }
            }
        }

        info!(
            "[{}] read {} records ({} malformed)",
            label,
            stream.nb_read(),
            stream.nb_malformed()
        );
        for c in collectors.iter_mut() {
            c.exhaust();
        }
        Ok(())
    }

    /// Read the archive of a single pair, until its collector completes or the stream is truncated.
    fn extract_pair(
        &self,
        source: &dyn CorpusSource,
        filter: &QualityFilter,
        collector: &mut Collector<Sink>,
        report: &mut PairReport,
        dedup: &mut DedupSet,
    ) -> Result<(), Error> {
        let pair = collector.pair().clone();
        let archive = source.archive(&pair)?;
        self.fetcher
            .fetch_if_missing(&archive.url, &archive.path)
            .map_err(|e| Error::SourceUnavailable {
                pair: pair.key(),
                reason: e.to_string(),
            })?;

        let mut stream =
            RecordStream::from_path_gzip(&archive.path, source.layout(&pair), &pair.key())?;
        let columns = stream.columns().clone();
        let mut guard = self.config.strict_order.then(OrderGuard::default);

        loop {
            let Some(record) = stream.next() else {
                break;
            };
            let Some(candidate) = columns.project(&record, &pair) else {
                continue;
            };

            if let (Some(guard), Some(score)) = (guard.as_mut(), candidate.score) {
                guard.check(score, &pair)?;
            }

            match filter.admit(&candidate, &pair, dedup) {
                Admission::Accepted(accepted) => {
                    collector.offer(accepted)?;
                    if collector.is_completed() {
                        break;
                    }
                }
                Admission::Rejected(reason) => {
                    debug!("[{}] rejected: {:?}", pair, reason);
                    report.rejected += 1;
                }
                Admission::Truncated => {
                    info!(
                        "[{}] score under {:?} after {} records, stopping",
                        pair,
                        filter.threshold(),
                        stream.nb_read()
                    );
                    break;
                }
            }
        }

        debug!(
            "[{}] read {} records ({} malformed)",
            pair,
            stream.nb_read(),
            stream.nb_malformed()
        );
        collector.exhaust();
        Ok(())
    }

    fn extract_per_pair(
        &self,
        source: &dyn CorpusSource,
        filter: &QualityFilter,
        collectors: &mut Collectors<Sink>,
        reports: &mut [PairReport],
        dedup: &mut DedupSet,
    ) -> Result<(), Error> {
        for (c, r) in collectors.iter_mut().zip(reports.iter_mut()) {
            if c.is_completed() {
                continue;
            }

            info!("[{}] extracting", c.pair());
            match self.extract_pair(source, filter, c, r, dedup) {
                Ok(()) => (),
                Err(e @ Error::SourceUnavailable { .. }) => {
                    error!("{}", e);
                    mark_unavailable(c, r)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<F: Fetch> Pipeline<Report> for Extraction<F> {
    fn run(&self) -> Result<Report, Error> {
        self.config.validate()?;
        let corpus = self.config.corpus;
        let source = self.config.source()?;
        let pairs = self.config.pairs();

        let dir = self.config.corpus_dir();
        std::fs::create_dir_all(&dir)?;
        Sink::discard_partials(&dir)?;

        let mut manifest = Manifest::load_or_new(&dir)?;
        let mut dedup = DedupSet::new(corpus.dedup_policy());
        let (mut collectors, mut reports) = self.prepare(&pairs, &mut manifest, &mut dedup)?;

        let filter = QualityFilter::new(corpus, self.config.threshold);
        if source.is_shared() {
            self.extract_shared(
                source.as_ref(),
                &filter,
                &mut collectors,
                &mut reports,
                &mut dedup,
            )?;
        } else {
            self.extract_per_pair(
                source.as_ref(),
                &filter,
                &mut collectors,
                &mut reports,
                &mut dedup,
            )?;
        }

        for (c, r) in collectors.iter_mut().zip(reports.iter_mut()) {
            let Some(sink) = c.take_writer() else {
                continue;
            };
            let finished = sink.finish()?;
            r.accepted = finished.count;
            let budget = c.state().budget();
            if finished.count < budget {
                warn!(
                    "[{}] only {}/{} pairs available",
                    c.pair(),
                    finished.count,
                    budget
                );
            }
            manifest.insert(ManifestEntry::new(
                corpus,
                c.pair(),
                Sink::filename(corpus, c.pair()),
                finished.count,
            ));
        }
        manifest.save()?;

        let table = Assembler::new(
            &manifest,
            &pairs,
            self.config.includes_source(),
            corpus.source_rows(),
        )
        .assemble()?;

        let table_path = self.config.table_path();
        write_table(&table, &table_path, self.config.format)?;
        info!("wrote {} rows to {:?}", table.len(), table_path);

        let cleaned = !self.config.keep_intermediate;
        if cleaned {
            cleanup(&mut manifest, &pairs)?;
        }

        Ok(Report {
            pairs: reports,
            table_path,
            nb_rows: table.len(),
            cleaned,
        })
    }
}

/// Drop the sink of a pair that could not be read.
fn mark_unavailable(collector: &mut Collector<Sink>, report: &mut PairReport) -> Result<(), Error> {
    report.status = PairStatus::Unavailable;
    if let Some(sink) = collector.take_writer() {
        sink.discard()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::Path};

    use flate2::{write::GzEncoder, Compression};
    use url::Url;

    use crate::{download::Offline, io::TableFormat, sources::Corpus};

    use super::*;

    fn write_gz(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut enc = GzEncoder::new(std::fs::File::create(path).unwrap(), Compression::default());
        enc.write_all(content.as_bytes()).unwrap();
        enc.finish().unwrap();
    }

    fn config(corpus: Corpus, root: &Path, langs: &[&str], budget: usize) -> SessionConfig {
        let mut c = SessionConfig::new(
            corpus,
            langs.iter().map(|l| l.to_string()).collect(),
            budget,
        );
        c.download_dir = root.join("datasets");
        c.output_dir = root.join("out");
        c
    }

    #[test]
    fn wikimatrix_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let c = config(Corpus::WikiMatrix, dir.path(), &["it"], 2);
        write_gz(
            &c.download_dir.join("WikiMatrix/WikiMatrix.en-it.tsv.gz"),
            "1.20\tHello\tCiao\n1.10\tBye\tCiao\n1.05\tYo\tYo2\n1.30\tX\tY\n",
        );

        let report = Extraction::new(c, Offline).run().unwrap();
        let r = report.get(&LangPair::new("en", "it")).unwrap();
        assert_eq!(r.status, PairStatus::Extracted);
        assert_eq!(r.accepted, 1);
        assert_eq!(r.rejected, 1);
        assert_eq!(report.nb_rows, 1);
        assert!(report.cleaned);
    }

    #[test]
    fn unavailable_pair_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = config(Corpus::WikiMatrix, dir.path(), &["ar", "it"], 5);
        c.keep_intermediate = true;
        write_gz(
            &c.download_dir.join("WikiMatrix/WikiMatrix.en-it.tsv.gz"),
            "1.20\tHello\tCiao\n",
        );

        let report = Extraction::new(c.clone(), Offline).run().unwrap();
        assert_eq!(
            report.get(&LangPair::new("en", "ar")).unwrap().status,
            PairStatus::Unavailable
        );
        assert_eq!(report.get(&LangPair::new("en", "it")).unwrap().accepted, 1);
        let ar = Sink::path_for(&c.corpus_dir(), Corpus::WikiMatrix, &LangPair::new("en", "ar"));
        assert!(!ar.exists());
        let manifest = Manifest::load(&c.corpus_dir()).unwrap();
        assert!(manifest.get(&LangPair::new("en", "ar")).is_none());
        assert!(manifest.get(&LangPair::new("en", "it")).is_some());
    }

    #[test]
    fn nothing_available() {
        let dir = tempfile::tempdir().unwrap();
        let c = config(Corpus::Ted2020, dir.path(), &["it"], 5);
        let res = Extraction::new(c, Offline).run();
        assert!(matches!(res, Err(Error::Assembly(_))));
    }

    #[test]
    fn strict_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = config(Corpus::WikiMatrix, dir.path(), &["it"], 10);
        c.strict_order = true;
        write_gz(
            &c.download_dir.join("WikiMatrix/WikiMatrix.en-it.tsv.gz"),
            "1.20\tHello\tCiao\n1.30\tX\tY\n",
        );

        let res = Extraction::new(c, Offline).run();
        assert!(matches!(res, Err(Error::UnsortedInput { .. })));
    }

    #[test]
    fn news_from_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let remote = dir.path().join("remote");
        // canonical order: de before en
        write_gz(
            &remote.join("News-Commentary.de-en.tsv.gz"),
            "Hallo\tHello\nTschüss\tBye\n",
        );

        let mut c = config(Corpus::NewsCommentary, dir.path(), &["de", "en"], 10);
        c.base_url = Some(Url::from_directory_path(&remote).unwrap());
        c.format = TableFormat::Jsonl;
        c.keep_intermediate = true;

        let report = Extraction::new(c.clone(), crate::download::Downloader::default())
            .run()
            .unwrap();
        assert_eq!(report.nb_rows, 4);
        assert!(!report.cleaned);
        assert!(c.download_dir.join("News-Commentary/News-Commentary.de-en.tsv.gz").exists());
        assert!(Manifest::path_in(&c.corpus_dir()).exists());

        let table = crate::io::read_table(&report.table_path, TableFormat::Jsonl).unwrap();
        let rows: Vec<_> = table
            .rows()
            .iter()
            .map(|r| (r.language.as_str(), r.sentence.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![("de", "Hallo"), ("de", "Tschüss"), ("en", "Hello"), ("en", "Bye")]
        );
    }
}
