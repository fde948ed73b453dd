/*! Budgeted collection

A [Collector] accepts sentence pairs for one language pair until its budget is reached,
appending them to its [PairWriter].
A session holds one collector per pair in [Collectors], and can stop reading as soon as they are all completed.
!*/
use log::debug;

use crate::{error::Error, io::PairWriter, lang::LangPair, sentence::SentencePair};

/// Outcome of [Collector::offer].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Accepted,
    /// The collector was already completed, the pair is dropped.
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorState {
    accepted: usize,
    budget: usize,
    completed: bool,
}

impl CollectorState {
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

pub struct Collector<W> {
    pair: LangPair,
    state: CollectorState,
    writer: Option<W>,
}

impl<W: PairWriter> Collector<W> {
    /// Create a collector. `budget` has to be > 0.
    pub fn new(pair: LangPair, budget: usize, writer: W) -> Self {
        debug_assert!(budget > 0);
        Self {
            pair,
            state: CollectorState {
                accepted: 0,
                budget,
                completed: false,
            },
            writer: Some(writer),
        }
    }

    /// A collector whose pairs were collected by a previous run.
    /// It is completed from the start and has no writer.
    pub fn resumed(pair: LangPair, budget: usize, accepted: usize) -> Self {
        Self {
            pair,
            state: CollectorState {
                accepted,
                budget,
                completed: true,
            },
            writer: None,
        }
    }

    pub fn pair(&self) -> &LangPair {
        &self.pair
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// Offer an admitted pair.
    ///
    /// A completed collector returns [Offer::BudgetExhausted] without consuming the pair.
    pub fn offer(&mut self, pair: SentencePair) -> Result<Offer, Error> {
        if self.state.completed {
            return Ok(Offer::BudgetExhausted);
        }

        debug_assert_eq!(pair.pair(), &self.pair);
        if let Some(w) = self.writer.as_mut() {
            w.append(&pair)?;
        }

        self.state.accepted += 1;
        if self.state.accepted >= self.state.budget {
            debug!("[{}] budget of {} reached", self.pair, self.state.budget);
            self.state.completed = true;
        }

        Ok(Offer::Accepted)
    }

    /// Mark the stream as exhausted for this pair.
    pub fn exhaust(&mut self) {
        if !self.state.completed {
            debug!(
                "[{}] stream exhausted with {}/{} pairs",
                self.pair, self.state.accepted, self.state.budget
            );
        }
        self.state.completed = true;
    }

    /// Take the writer out, leaving the collector completed.
    pub fn take_writer(&mut self) -> Option<W> {
        self.state.completed = true;
        self.writer.take()
    }
}

/// Collectors of a session, in configuration order.
pub struct Collectors<W> {
    collectors: Vec<Collector<W>>,
}

impl<W: PairWriter> Collectors<W> {
    pub fn new(collectors: Vec<Collector<W>>) -> Self {
        Self { collectors }
    }

    /// Session stopping condition.
    pub fn all_completed(&self) -> bool {
        self.collectors.iter().all(Collector::is_completed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collector<W>> {
        self.collectors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Collector<W>> {
        self.collectors.iter_mut()
    }

    /// Collectors still accepting pairs.
    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Collector<W>> {
        self.collectors.iter_mut().filter(|c| !c.is_completed())
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(target: &str) -> SentencePair {
        sp_for(&LangPair::new("en", "it"), target)
    }

    fn sp_for(pair: &LangPair, target: &str) -> SentencePair {
        SentencePair::new("source".to_string(), target.to_string(), pair.clone())
    }

    #[test]
    fn budget() {
        let mut c = Collector::new(LangPair::new("en", "it"), 2, Vec::<SentencePair>::new());
        assert_eq!(c.offer(sp("a")).unwrap(), Offer::Accepted);
        assert!(!c.is_completed());
        assert_eq!(c.offer(sp("b")).unwrap(), Offer::Accepted);
        assert!(c.is_completed());
        assert_eq!(c.offer(sp("c")).unwrap(), Offer::BudgetExhausted);

        assert_eq!(c.state().accepted(), 2);
        let written = c.take_writer().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1].target_text(), "b");
    }

    #[test]
    fn exhausted_stream() {
        let mut c = Collector::new(
            LangPair::new("en", "it"),
            10,
            Vec::<SentencePair>::new(),
        );
        c.offer(sp("a")).unwrap();
        c.exhaust();
        assert!(c.is_completed());
        assert_eq!(c.offer(sp("b")).unwrap(), Offer::BudgetExhausted);
        assert_eq!(c.state().accepted(), 1);
    }

    #[test]
    fn resumed() {
        let mut c: Collector<Vec<SentencePair>> =
            Collector::resumed(LangPair::new("en", "it"), 10, 4);
        assert!(c.is_completed());
        assert_eq!(c.offer(sp("a")).unwrap(), Offer::BudgetExhausted);
        assert!(c.take_writer().is_none());
    }

    #[test]
    fn all_completed() {
        let mut cs = Collectors::new(vec![
            Collector::new(LangPair::new("en", "ar"), 1, Vec::<SentencePair>::new()),
            Collector::new(LangPair::new("en", "it"), 1, Vec::<SentencePair>::new()),
        ]);
        assert!(!cs.all_completed());

        let first = cs.active_mut().next().unwrap();
        let p = first.pair().clone();
        first.offer(sp_for(&p, "x")).unwrap();
        assert!(!cs.all_completed());
        assert_eq!(cs.active_mut().count(), 1);

        for c in cs.active_mut() {
            let p = c.pair().clone();
            c.offer(sp_for(&p, "y")).unwrap();
        }
        assert!(cs.all_completed());
    }
}
