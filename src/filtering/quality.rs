/*! Admission of raw candidates into sentence pairs.

Rules are applied in order:

1. (scored corpora) a score below the threshold truncates the stream, whatever the texts,
1. both trimmed texts must be non empty,
1. both texts must differ,
1. texts are oriented so that the source language comes first,
1. neither text may have been accepted before in the session.

## Sorted input

Truncation relies on scored archives being sorted by descending score: the first record under the threshold
ends the stream, even if a later one would pass. This is *not* verified unless an [OrderGuard] is used,
in which case an unsorted stream is an error instead of a silent under-collection.
!*/
use crate::{
    error::Error,
    lang::LangPair,
    sentence::SentencePair,
    sources::{Candidate, Corpus},
};

use super::{
    pair::{Distinct, NonEmpty, ScoreThreshold},
    DedupSet, Filter, FilterMut,
};

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    SelfPair,
    Duplicate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Accepted(SentencePair),
    Rejected(Rejection),
    /// Score fell below the threshold: stop consuming this stream.
    Truncated,
}

#[derive(Debug, Clone)]
pub struct QualityFilter {
    threshold: Option<ScoreThreshold>,
}

impl QualityFilter {
    /// Filter for `corpus`. `threshold` is only used by scored corpora.
    pub fn new(corpus: Corpus, threshold: f64) -> Self {
        let threshold = corpus.is_scored().then(|| ScoreThreshold::new(threshold));
        Self { threshold }
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold.map(|t| t.threshold())
    }

    /// Decide the fate of a candidate for `pair`.
    ///
    /// Accepted texts are remembered in `dedup`, nothing is remembered otherwise.
    pub fn admit(&self, candidate: &Candidate, pair: &LangPair, dedup: &mut DedupSet) -> Admission {
        let first = candidate.first.trim();
        let second = candidate.second.trim();

        if let (Some(threshold), Some(score)) = (&self.threshold, candidate.score) {
            if !threshold.detect(score) {
                return Admission::Truncated;
            }
        }

        if !NonEmpty.detect((first, second)) {
            return Admission::Rejected(Rejection::Empty);
        }

        if !Distinct.detect((first, second)) {
            return Admission::Rejected(Rejection::SelfPair);
        }

        let (source, target) = if candidate.first_is_source {
            (first, second)
        } else {
            (second, first)
        };

        if !dedup.detect_mut((source, target)) {
            return Admission::Rejected(Rejection::Duplicate);
        }

        Admission::Accepted(SentencePair::new(
            source.to_string(),
            target.to_string(),
            pair.clone(),
        ))
    }
}

/// Checks that scores of a stream never increase.
#[derive(Debug, Default)]
pub struct OrderGuard {
    previous: Option<f64>,
}

impl OrderGuard {
    pub fn check(&mut self, score: f64, pair: &LangPair) -> Result<(), Error> {
        if let Some(previous) = self.previous {
            if score > previous {
                return Err(Error::UnsortedInput {
                    pair: pair.key(),
                    previous,
                    current: score,
                });
            }
        }
        self.previous = Some(score);
        Ok(())
    }
}
