/*!
# IO utilities

Intermediate and final artifacts of an extraction session:

- [Sink]: one gzip compressed TSV per language pair,
- [Manifest]: the index of finished sinks,
- [UnifiedTable]: the assembled multilingual table, written by [write_table].
!*/
pub mod manifest;
pub mod sink;
pub mod table;

pub use manifest::{Manifest, ManifestEntry};
pub use sink::{FinishedSink, PairWriter, Sink, SinkReader};
pub use table::{read_table, write_table, TableFormat, TableRow, UnifiedTable};
