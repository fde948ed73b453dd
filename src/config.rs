//! Extraction session configuration.
use std::path::PathBuf;

use url::Url;

use crate::{
    error::Error,
    io::TableFormat,
    lang::{self, LangPair},
    sources::{Corpus, CorpusSource, NewsCommentary, Ted2020, WikiMatrix, DEFAULT_THRESHOLD},
};

pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_DOWNLOAD_DIR: &str = "datasets";
pub const DEFAULT_OUTPUT_DIR: &str = "parallel-sentences";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub corpus: Corpus,
    pub source_lang: String,
    /// Requested languages. If it contains the source language,
    /// source-language sentences are added to the unified table.
    pub languages: Vec<String>,
    /// Maximum number of pairs per language pair.
    pub budget: usize,
    /// Minimum score (scored corpora only).
    pub threshold: f64,
    /// Fail instead of under-collecting when a scored archive is not sorted.
    pub strict_order: bool,
    pub download_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: TableFormat,
    pub keep_intermediate: bool,
    /// Base url overriding the default location of the archives.
    /// Mandatory for News-Commentary.
    pub base_url: Option<Url>,
}

impl SessionConfig {
    pub fn new(corpus: Corpus, languages: Vec<String>, budget: usize) -> Self {
        Self {
            corpus,
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            languages,
            budget,
            threshold: DEFAULT_THRESHOLD,
            strict_order: false,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: TableFormat::default(),
            keep_intermediate: false,
            base_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.budget == 0 {
            return Err(Error::Config("number of sentences must be > 0".to_string()));
        }
        if !self.threshold.is_finite() {
            return Err(Error::Config(format!(
                "invalid threshold {}",
                self.threshold
            )));
        }
        lang::parse_code(&self.source_lang)?;
        for l in &self.languages {
            lang::parse_code(l)?;
        }
        if self.pairs().is_empty() {
            return Err(Error::Config(format!(
                "no target language besides the source language ({})",
                self.source_lang
            )));
        }
        if self.corpus == Corpus::NewsCommentary && self.base_url.is_none() {
            return Err(Error::Config(
                "News-Commentary archives need a base url".to_string(),
            ));
        }
        Ok(())
    }

    /// One pair per requested language, the source language excepted.
    pub fn pairs(&self) -> Vec<LangPair> {
        self.languages
            .iter()
            .filter(|l| **l != self.source_lang)
            .map(|target| LangPair::new(&self.source_lang, target))
            .collect()
    }

    pub fn includes_source(&self) -> bool {
        self.languages.contains(&self.source_lang)
    }

    /// Folder holding sinks, manifest and table of the corpus.
    pub fn corpus_dir(&self) -> PathBuf {
        self.output_dir.join(self.corpus.name())
    }

    /// `df_{corpus}_{langs}.{ext}` in the corpus folder.
    pub fn table_path(&self) -> PathBuf {
        self.corpus_dir().join(format!(
            "df_{}_{}.{}",
            self.corpus.name(),
            self.languages.join("-"),
            self.format.extension()
        ))
    }

    /// Build the corpus source, honoring `base_url`.
    pub fn source(&self) -> Result<Box<dyn CorpusSource>, Error> {
        let dl = &self.download_dir;
        Ok(match (self.corpus, &self.base_url) {
            (Corpus::Ted2020, None) => Box::new(Ted2020::new(dl)?),
            (Corpus::Ted2020, Some(url)) => Box::new(Ted2020::with_url(url.clone(), dl)?),
            (Corpus::WikiMatrix, None) => Box::new(WikiMatrix::new(dl)?),
            (Corpus::WikiMatrix, Some(url)) => Box::new(WikiMatrix::with_url(url.clone(), dl)),
            (Corpus::NewsCommentary, Some(url)) => Box::new(NewsCommentary::new(url.clone(), dl)),
            (Corpus::NewsCommentary, None) => {
                return Err(Error::Config(
                    "News-Commentary archives need a base url".to_string(),
                ))
            }
        })
    }
}
