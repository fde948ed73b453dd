//! # parasent
//!
//! Extraction of parallel sentences from multilingual corpora
//! (TED2020, WikiMatrix, News-Commentary) into a single table of
//! `from`, `language`, `sentence` rows.
//!
//! Each language pair gets a budget of sentence pairs. Candidates are filtered
//! (empty, self-aligned, low score, already seen sentences) and collected
//! into per-pair sinks, which are then merged into the unified table.
//!
//! ## Getting started
//!
//! ```sh
//! parasent wikimatrix -n 1000 -l ar,it,en
//! ```
//!
//! Or as a library:
//!
//! ```no_run
//! use parasent::{
//!     config::SessionConfig,
//!     download::Downloader,
//!     pipelines::{Extraction, Pipeline},
//!     sources::Corpus,
//! };
//!
//! let config = SessionConfig::new(Corpus::Ted2020, vec!["ar".into(), "en".into()], 100);
//! let report = Extraction::new(config, Downloader::default()).run()?;
//! println!("{} rows", report.nb_rows);
//! # Ok::<(), parasent::error::Error>(())
//! ```
pub mod config;
pub mod download;
pub mod error;
pub mod filtering;
pub mod io;
pub mod lang;
pub mod pipelines;
pub mod processing;
pub mod sentence;
pub mod sources;
