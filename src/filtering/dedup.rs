/*! Session-wide sentence deduplication.

A [DedupSet] remembers every sentence accepted during a session, whatever the language pair.
Once remembered, a sentence can never be accepted again.

It is owned by the extraction session and lent (`&mut`) to the quality filter,
so there is only one writer at a time.
!*/
use std::collections::HashSet;

use super::FilterMut;

/// Which sides of an accepted pair are remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Only the target side, for corpora where the same source sentence
    /// is legitimately shared by several pairs.
    #[default]
    TargetOnly,
    /// Both sides, since either side may come back as a target in another pair.
    BothSides,
}

#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
    policy: DedupPolicy,
}

impl DedupSet {
    pub fn new(policy: DedupPolicy) -> Self {
        Self {
            seen: HashSet::new(),
            policy,
        }
    }

    pub fn contains(&self, sentence: &str) -> bool {
        self.seen.contains(sentence)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Remember an accepted (source, target) pair, following the policy.
    ///
    /// Used directly when seeding the set from sinks of a previous run.
    pub fn remember(&mut self, source: &str, target: &str) {
        if self.policy == DedupPolicy::BothSides && !self.seen.contains(source) {
            self.seen.insert(source.to_string());
        }
        if !self.seen.contains(target) {
            self.seen.insert(target.to_string());
        }
    }
}

/// Detects (source, target) pairs where neither side has been seen yet,
/// remembering them on success.
impl FilterMut<(&str, &str)> for DedupSet {
    fn detect_mut(&mut self, (source, target): (&str, &str)) -> bool {
        if self.seen.contains(source) || self.seen.contains(target) {
            return false;
        }
        self.remember(source, target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_only() {
        let mut d = DedupSet::new(DedupPolicy::TargetOnly);
        assert!(d.detect_mut(("Hello", "Ciao")));
        assert!(d.contains("Ciao"));
        assert!(!d.contains("Hello"));

        // same source, other target: fine
        assert!(d.detect_mut(("Hello", "Salut")));
        // target already seen
        assert!(!d.detect_mut(("Bye", "Ciao")));
        // a previous target showing up as a source
        assert!(!d.detect_mut(("Ciao", "Hallo")));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn both_sides() {
        let mut d = DedupSet::new(DedupPolicy::BothSides);
        assert!(d.detect_mut(("Hello", "Ciao")));
        assert!(d.contains("Hello"));
        assert!(!d.detect_mut(("Hello", "Salut")));
        assert!(!d.detect_mut(("Bye", "Hello")));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn rejected_pair_is_not_remembered() {
        let mut d = DedupSet::new(DedupPolicy::BothSides);
        d.remember("a", "b");
        assert!(!d.detect_mut(("a", "c")));
        assert!(!d.contains("c"));
    }
}
