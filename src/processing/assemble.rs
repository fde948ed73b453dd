/*! Table assembly

Merges the sinks listed in a [Manifest] into one [UnifiedTable].

- Sinks are processed in sorted pair order.
- Each sink line gives a target-language row.
- When the source language is requested too, source-language rows are added following [SourceRows].

Within a sink, target rows come first, then source rows, both in file order.
!*/
use std::collections::HashSet;

use log::{debug, info};

use crate::{
    error::Error,
    io::{Manifest, ManifestEntry, SinkReader, TableRow, UnifiedTable},
    lang::LangPair,
};

/// Which sinks provide source-language rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRows {
    /// Only the first sink (in sorted pair order).
    ///
    /// For corpora where every pair is read from the same aligned rows, source sentences
    /// of the different sinks largely overlap, and a single one stands for all.
    Representative,
    /// Every sink. Corpora deduplicating both sides never share a source sentence between sinks.
    PerSink,
}

pub struct Assembler<'a> {
    manifest: &'a Manifest,
    pairs: Vec<LangPair>,
    include_source: bool,
    source_rows: SourceRows,
}

impl<'a> Assembler<'a> {
    /// Assemble the sinks of `pairs` (other manifest entries are ignored).
    pub fn new(
        manifest: &'a Manifest,
        pairs: &[LangPair],
        include_source: bool,
        source_rows: SourceRows,
    ) -> Self {
        let mut pairs = pairs.to_vec();
        pairs.sort();
        Self {
            manifest,
            pairs,
            include_source,
            source_rows,
        }
    }

    /// Manifest entries of the session, in sorted order.
    ///
    /// Pairs without an entry (unavailable sources) are skipped.
    fn entries(&self) -> Vec<&'a ManifestEntry> {
        self.pairs
            .iter()
            .filter_map(|pair| {
                let entry = self.manifest.get(pair);
                if entry.is_none() {
                    debug!("[{}] no sink to assemble", pair);
                }
                entry
            })
            .collect()
    }

    pub fn assemble(&self) -> Result<UnifiedTable, Error> {
        let entries = self.entries();
        if entries.is_empty() {
            return Err(Error::Assembly("no sink to assemble".to_string()));
        }

        let mut table = UnifiedTable::default();
        let mut seen_source: HashSet<String> = HashSet::new();

        for (idx, entry) in entries.iter().enumerate() {
            let path = self.manifest.sink_path(entry);
            if !path.exists() {
                return Err(Error::Assembly(format!(
                    "[{}] sink {:?} listed in manifest is missing",
                    entry.pair(),
                    path
                )));
            }

            let with_source = self.include_source
                && match self.source_rows {
                    SourceRows::Representative => idx == 0,
                    SourceRows::PerSink => true,
                };

            let from = entry.corpus.name();
            let mut sources = Vec::new();
            let mut nb_targets = 0;

            for line in SinkReader::open(&path)? {
                let (source, target) = line?;
                table.push(TableRow::new(from, &entry.target_lang, target));
                nb_targets += 1;

                if with_source && !seen_source.contains(&source) {
                    seen_source.insert(source.clone());
                    sources.push(source);
                }
            }

            if nb_targets != entry.count {
                return Err(Error::Assembly(format!(
                    "[{}] manifest announces {} pairs, sink holds {}",
                    entry.pair(),
                    entry.count,
                    nb_targets
                )));
            }

            if with_source {
                info!(
                    "[{}] adding {} {} sentences",
                    entry.pair(),
                    sources.len(),
                    entry.source_lang
                );
            }

            for source in sources {
                table.push(TableRow::new(from, &entry.source_lang, source));
            }
        }

        Ok(table)
    }
}
