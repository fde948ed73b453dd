/*! Content processing

Budgeted collection of admitted pairs, assembly of the per-pair sinks into the unified table,
and removal of the intermediate files.
!*/
pub mod assemble;
pub mod cleanup;
pub mod collect;

pub use assemble::{Assembler, SourceRows};
pub use cleanup::cleanup;
pub use collect::{Collector, CollectorState, Collectors, Offer};
