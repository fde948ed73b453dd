/*! Corpus sources

A corpus source knows where the archive of a language pair lives (remotely and locally)
and how its records are laid out on disk.

Three corpus families are supported:

| corpus            | layout                          | archives     |
|-------------------|---------------------------------|--------------|
| [Ted2020]         | keyed, one column per language  | one, shared  |
| [WikiMatrix]      | `score\tsent\tsent`, sorted desc| one per pair |
| [NewsCommentary]  | `sent\tsent`                    | one per pair |
!*/
mod news;
mod reader;
mod record;
mod ted;
mod wikimatrix;

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::filtering::DedupPolicy;
use crate::lang::LangPair;
use crate::processing::SourceRows;

pub use news::NewsCommentary;
pub use reader::{Layout, RecordStream};
pub use record::{Candidate, Columns, RawRecord};
pub use ted::Ted2020;
pub use wikimatrix::{WikiMatrix, DEFAULT_THRESHOLD};

/// Supported corpus families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corpus {
    #[serde(rename = "TED2020")]
    Ted2020,
    WikiMatrix,
    #[serde(rename = "News-Commentary")]
    NewsCommentary,
}

impl Corpus {
    /// Name used in sink names and in the `from` column of the unified table.
    pub fn name(&self) -> &'static str {
        match self {
            Corpus::Ted2020 => "TED2020",
            Corpus::WikiMatrix => "WikiMatrix",
            Corpus::NewsCommentary => "News-Commentary",
        }
    }

    /// Which sides of an accepted pair are remembered for deduplication.
    pub fn dedup_policy(&self) -> DedupPolicy {
        match self {
            Corpus::WikiMatrix => DedupPolicy::BothSides,
            Corpus::Ted2020 | Corpus::NewsCommentary => DedupPolicy::TargetOnly,
        }
    }

    /// How the assembler materializes source-language rows.
    pub fn source_rows(&self) -> SourceRows {
        match self {
            Corpus::WikiMatrix => SourceRows::PerSink,
            Corpus::Ted2020 | Corpus::NewsCommentary => SourceRows::Representative,
        }
    }

    /// Only WikiMatrix carries a quality score.
    pub fn is_scored(&self) -> bool {
        matches!(self, Corpus::WikiMatrix)
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Corpus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ted2020" | "ted" => Ok(Corpus::Ted2020),
            "wikimatrix" | "wiki" => Ok(Corpus::WikiMatrix),
            "news-commentary" | "news" => Ok(Corpus::NewsCommentary),
            other => Err(Error::Config(format!("unknown corpus {:?}", other))),
        }
    }
}

/// Remote and local location of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub url: Url,
    pub path: PathBuf,
}

/// Locates and describes the archives of a corpus.
pub trait CorpusSource {
    fn corpus(&self) -> Corpus;

    /// Archive holding the sentences of `pair`.
    ///
    /// Sources with a single multilingual archive return the same [Archive] for every pair.
    fn archive(&self, pair: &LangPair) -> Result<Archive, Error>;

    /// Record layout of the archive of `pair`.
    fn layout(&self, pair: &LangPair) -> Layout;

    /// `true` if every pair is read from one shared stream.
    fn is_shared(&self) -> bool {
        false
    }
}

/// Join `filename` to a base url, tolerating a missing trailing slash.
fn join_url(base: &Url, filename: &str) -> Result<Url, Error> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(filename)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_from_str() {
        assert_eq!("TED2020".parse::<Corpus>().unwrap(), Corpus::Ted2020);
        assert_eq!("wikimatrix".parse::<Corpus>().unwrap(), Corpus::WikiMatrix);
        assert_eq!("news".parse::<Corpus>().unwrap(), Corpus::NewsCommentary);
        assert!("europarl".parse::<Corpus>().is_err());
    }

    #[test]
    fn join() {
        let with = Url::parse("https://example.org/a/").unwrap();
        let without = Url::parse("https://example.org/a").unwrap();
        assert_eq!(
            join_url(&with, "f.tsv.gz").unwrap().as_str(),
            "https://example.org/a/f.tsv.gz"
        );
        assert_eq!(
            join_url(&without, "f.tsv.gz").unwrap().as_str(),
            "https://example.org/a/f.tsv.gz"
        );
    }
}
