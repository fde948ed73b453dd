//! Pipelines.
//!
//! An extraction session is a [Pipeline] over a [crate::config::SessionConfig]:
//! it reads a corpus, fills the per-pair sinks, assembles and persists the unified table.
mod extract;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use extract::{Extraction, PairReport, PairStatus, Report};
pub use pipeline::Pipeline;
