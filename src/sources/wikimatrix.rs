//! WikiMatrix: sentences mined from Wikipedia, scored by a LASER margin.
//!
//! One archive per language pair, named after the sorted pair (`WikiMatrix.ar-en.tsv.gz`).
//! Lines are `score\tsentence\tsentence`, sorted by descending score,
//! text columns following the order of the file name.
use std::path::{Path, PathBuf};

use url::Url;

use crate::{error::Error, lang::LangPair};

use super::{join_url, Archive, Corpus, CorpusSource, Layout};

pub const BASE_URL: &str = "https://dl.fbaipublicfiles.com/laser/WikiMatrix/v1/";

/// Below this score, pairs are mostly of bad quality.
pub const DEFAULT_THRESHOLD: f64 = 1.075;

#[derive(Debug, Clone)]
pub struct WikiMatrix {
    base_url: Url,
    download_dir: PathBuf,
}

impl WikiMatrix {
    pub fn new(download_dir: &Path) -> Result<Self, Error> {
        Ok(Self::with_url(Url::parse(BASE_URL)?, download_dir))
    }

    pub fn with_url(base_url: Url, download_dir: &Path) -> Self {
        Self {
            base_url,
            download_dir: download_dir.join("WikiMatrix"),
        }
    }

    fn filename(pair: &LangPair) -> String {
        let (a, b) = pair.canonical();
        format!("WikiMatrix.{}-{}.tsv.gz", a, b)
    }
}

impl CorpusSource for WikiMatrix {
    fn corpus(&self) -> Corpus {
        Corpus::WikiMatrix
    }

    fn archive(&self, pair: &LangPair) -> Result<Archive, Error> {
        let filename = Self::filename(pair);
        Ok(Archive {
            url: join_url(&self.base_url, &filename)?,
            path: self.download_dir.join(filename),
        })
    }

    fn layout(&self, pair: &LangPair) -> Layout {
        Layout::Scored(pair.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_is_sorted() {
        let w = WikiMatrix::new(Path::new("datasets")).unwrap();
        let a = w.archive(&LangPair::new("en", "ar")).unwrap();
        assert_eq!(
            a.url.as_str(),
            "https://dl.fbaipublicfiles.com/laser/WikiMatrix/v1/WikiMatrix.ar-en.tsv.gz"
        );
        assert_eq!(
            a.path,
            Path::new("datasets/WikiMatrix/WikiMatrix.ar-en.tsv.gz")
        );
    }
}
