/*! Filtering utilities

Filters operate on candidate pairs of sentences.

Filters implement [filter::Filter], [filter::FilterMut] or both:
- [filter::Filter] is implemented for filters that do not have state (see [pair::NonEmpty] for example)
- [filter::FilterMut] is implemented for filters that do have state (see [DedupSet]).

[QualityFilter] chains them into the admission rules of an extraction session.
! */
mod dedup;
mod filter;
mod pair;
mod quality;

pub use dedup::{DedupPolicy, DedupSet};
pub use filter::Filter;
pub use filter::FilterMut;
pub use pair::{Distinct, NonEmpty, ScoreThreshold};
pub use quality::{Admission, OrderGuard, QualityFilter, Rejection};
