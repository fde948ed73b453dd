//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;
use url::Url;

use parasent::{
    config::SessionConfig,
    error::Error,
    io::TableFormat,
    lang,
    sources::Corpus,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "parasent",
    about = "Extract parallel sentences from multilingual corpora."
)]
/// Holds the parameters of an extraction session.
pub struct Parasent {
    #[structopt(help = "corpus to extract from (ted2020, wikimatrix, news)")]
    pub corpus: Corpus,
    #[structopt(
        short = "n",
        long = "n_sentences",
        help = "maximum number of sentences per language pair"
    )]
    pub n_sentences: usize,
    #[structopt(
        short = "l",
        long = "languages",
        help = "comma separated language codes (ar,it,en). The source language adds its sentences to the table."
    )]
    pub languages: String,
    #[structopt(long = "source-lang", default_value = "en", help = "source language")]
    pub source_lang: String,
    #[structopt(
        long = "threshold",
        help = "minimum alignment score (WikiMatrix only). Default is 1.075."
    )]
    pub threshold: Option<f64>,
    #[structopt(
        long = "strict-order",
        help = "fail on scored archives that are not sorted by descending score"
    )]
    pub strict_order: bool,
    #[structopt(
        long = "download-dir",
        parse(from_os_str),
        default_value = "datasets",
        help = "where archives are downloaded"
    )]
    pub download_dir: PathBuf,
    #[structopt(
        short = "o",
        long = "output-dir",
        parse(from_os_str),
        default_value = "parallel-sentences",
        help = "where sinks and tables are written"
    )]
    pub output_dir: PathBuf,
    #[structopt(
        short = "f",
        long = "format",
        default_value = "tsv",
        help = "table format (tsv, jsonl)"
    )]
    pub format: TableFormat,
    #[structopt(long = "keep-intermediate", help = "keep per-pair files once the table is written")]
    pub keep_intermediate: bool,
    #[structopt(long = "offline", help = "never download, archives must be present")]
    pub offline: bool,
    #[structopt(
        long = "base-url",
        help = "location of the archives (mandatory for news)"
    )]
    pub base_url: Option<Url>,
}

impl Parasent {
    pub fn into_config(self) -> Result<SessionConfig, Error> {
        let mut config = SessionConfig::new(
            self.corpus,
            lang::parse_list(&self.languages)?,
            self.n_sentences,
        );
        config.source_lang = lang::parse_code(&self.source_lang)?;
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.strict_order = self.strict_order;
        config.download_dir = self.download_dir;
        config.output_dir = self.output_dir;
        config.format = self.format;
        config.keep_intermediate = self.keep_intermediate;
        config.base_url = self.base_url;
        Ok(config)
    }
}
