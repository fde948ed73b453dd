//! TED2020: transcripts of TED talks aligned across 100+ languages.
//!
//! A single `ted2020.tsv.gz` archive holds every language,
//! with a header row of language codes.
use std::path::{Path, PathBuf};

use url::Url;

use crate::{error::Error, lang::LangPair};

use super::{join_url, Archive, Corpus, CorpusSource, Layout};

pub const BASE_URL: &str = "https://sbert.net/datasets/";
const FILENAME: &str = "ted2020.tsv.gz";

#[derive(Debug, Clone)]
pub struct Ted2020 {
    url: Url,
    path: PathBuf,
}

impl Ted2020 {
    pub fn new(download_dir: &Path) -> Result<Self, Error> {
        Self::with_url(Url::parse(BASE_URL)?, download_dir)
    }

    pub fn with_url(base_url: Url, download_dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            url: join_url(&base_url, FILENAME)?,
            path: download_dir.join(FILENAME),
        })
    }
}

impl CorpusSource for Ted2020 {
    fn corpus(&self) -> Corpus {
        Corpus::Ted2020
    }

    fn archive(&self, _pair: &LangPair) -> Result<Archive, Error> {
        Ok(Archive {
            url: self.url.clone(),
            path: self.path.clone(),
        })
    }

    fn layout(&self, _pair: &LangPair) -> Layout {
        Layout::Keyed
    }

    fn is_shared(&self) -> bool {
        true
    }
}
