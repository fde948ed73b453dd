//! Filtering traits.
//!
//! A filter answers `true` for items that are kept.

/// Stateless filter: the same input always gets the same answer.
///
/// Used for checks that only look at a candidate ([super::NonEmpty], [super::Distinct])
/// or at its score ([super::ScoreThreshold]).
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}

/// Filter holding state, where an answer may depend on previous items.
///
/// [super::DedupSet] remembers kept sentences, so that a second occurrence is dropped.
pub trait FilterMut<T>: Default {
    fn detect_mut(&mut self, item: T) -> bool;
}
