//! OPUS News-Commentary: news commentaries from the WMT shared tasks.
//!
//! Archives are plain bilingual exports (`sentence\tsentence`), one per pair,
//! named and ordered after the sorted pair (`News-Commentary.ar-en.tsv.gz`).
//! The base url is configurable since OPUS does not serve this exact layout.
use std::path::{Path, PathBuf};

use url::Url;

use crate::{error::Error, lang::LangPair};

use super::{join_url, Archive, Corpus, CorpusSource, Layout};

#[derive(Debug, Clone)]
pub struct NewsCommentary {
    base_url: Url,
    download_dir: PathBuf,
}

impl NewsCommentary {
    pub fn new(base_url: Url, download_dir: &Path) -> Self {
        Self {
            base_url,
            download_dir: download_dir.join("News-Commentary"),
        }
    }

    fn filename(pair: &LangPair) -> String {
        let (a, b) = pair.canonical();
        format!("News-Commentary.{}-{}.tsv.gz", a, b)
    }
}

impl CorpusSource for NewsCommentary {
    fn corpus(&self) -> Corpus {
        Corpus::NewsCommentary
    }

    fn archive(&self, pair: &LangPair) -> Result<Archive, Error> {
        let filename = Self::filename(pair);
        Ok(Archive {
            url: join_url(&self.base_url, &filename)?,
            path: self.download_dir.join(filename),
        })
    }

    fn layout(&self, pair: &LangPair) -> Layout {
        Layout::Bilingual(pair.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive() {
        let n = NewsCommentary::new(
            Url::parse("https://mirror.example/news").unwrap(),
            Path::new("datasets"),
        );
        let a = n.archive(&LangPair::new("en", "it")).unwrap();
        assert_eq!(
            a.url.as_str(),
            "https://mirror.example/news/News-Commentary.en-it.tsv.gz"
        );
        assert_eq!(
            a.path,
            Path::new("datasets/News-Commentary/News-Commentary.en-it.tsv.gz")
        );
        assert_eq!(n.layout(&LangPair::new("en", "it")), Layout::Bilingual(LangPair::new("en", "it")));
    }
}
