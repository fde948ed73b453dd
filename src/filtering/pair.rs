//! Pair-level, stateless filters.
use super::Filter;
use crate::sources::DEFAULT_THRESHOLD;

/// Returns `false` if any of the two (trimmed) texts is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonEmpty;

impl Filter<(&str, &str)> for NonEmpty {
    fn detect(&self, (first, second): (&str, &str)) -> bool {
        !first.trim().is_empty() && !second.trim().is_empty()
    }
}

/// Returns `false` if both texts are identical (untranslated content).
#[derive(Debug, Default, Clone, Copy)]
pub struct Distinct;

impl Filter<(&str, &str)> for Distinct {
    fn detect(&self, (first, second): (&str, &str)) -> bool {
        first != second
    }
}

/// Minimum quality score.
///
/// Default threshold is the one used for WikiMatrix margins (`1.075`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreThreshold {
    threshold: f64,
}

impl ScoreThreshold {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ScoreThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Filter<f64> for ScoreThreshold {
    fn detect(&self, score: f64) -> bool {
        score >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty() {
        let f = NonEmpty;
        assert!(f.detect(("a", "b")));
        assert!(!f.detect(("  ", "b")));
        assert!(!f.detect(("a", "")));
    }

    #[test]
    fn distinct() {
        assert!(Distinct.detect(("Hello", "Ciao")));
        assert!(!Distinct.detect(("OK", "OK")));
    }

    #[test]
    fn threshold() {
        let f = ScoreThreshold::default();
        assert_eq!(f.threshold(), 1.075);
        assert!(f.detect(1.075));
        assert!(f.detect(1.2));
        assert!(!f.detect(1.05));
    }
}
