//! Raw records and their projection onto a language pair.
use std::collections::HashMap;

use crate::lang::LangPair;

/// A parsed line of a corpus archive.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// One field per language, in header order (TED2020).
    Keyed(Vec<String>),
    /// `score\tfirst\tsecond` (WikiMatrix).
    Scored {
        score: f64,
        first: String,
        second: String,
    },
    /// `first\tsecond` (OPUS moses-style exports).
    Bilingual { first: String, second: String },
}

/// Where languages live in the records of a stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Columns {
    /// Language code -> field index, from the archive header.
    Keyed(HashMap<String, usize>),
    /// Languages of the first and second text field.
    Ordered(String, String),
}

impl Columns {
    pub fn from_header<'a>(header: impl IntoIterator<Item = &'a str>) -> Self {
        Columns::Keyed(
            header
                .into_iter()
                .enumerate()
                .map(|(idx, lang)| (lang.trim().to_lowercase(), idx))
                .collect(),
        )
    }

    /// Columns of a per-pair archive laid out in canonical (sorted) order.
    pub fn canonical(pair: &LangPair) -> Self {
        let (first, second) = pair.canonical();
        Columns::Ordered(first.to_string(), second.to_string())
    }

    /// `true` if records of this stream carry text for both languages of `pair`.
    pub fn covers(&self, pair: &LangPair) -> bool {
        match self {
            Columns::Keyed(idx) => {
                idx.contains_key(pair.source()) && idx.contains_key(pair.target())
            }
            Columns::Ordered(a, b) => {
                (a == pair.source() && b == pair.target())
                    || (a == pair.target() && b == pair.source())
            }
        }
    }

    /// Project `record` onto `pair`.
    ///
    /// Returns `None` when the record does not carry both languages.
    pub fn project<'a>(&self, record: &'a RawRecord, pair: &LangPair) -> Option<Candidate<'a>> {
        match (self, record) {
            (Columns::Keyed(idx), RawRecord::Keyed(fields)) => {
                let source = fields.get(*idx.get(pair.source())?)?;
                let target = fields.get(*idx.get(pair.target())?)?;
                Some(Candidate {
                    score: None,
                    first: source,
                    second: target,
                    first_is_source: true,
                })
            }
            (
                Columns::Ordered(first_lang, _),
                RawRecord::Scored {
                    score,
                    first,
                    second,
                },
            ) => Some(Candidate {
                score: Some(*score),
                first,
                second,
                first_is_source: first_lang == pair.source(),
            }),
            (Columns::Ordered(first_lang, _), RawRecord::Bilingual { first, second }) => {
                Some(Candidate {
                    score: None,
                    first,
                    second,
                    first_is_source: first_lang == pair.source(),
                })
            }
            _ => None,
        }
    }
}

/// Untrimmed, unoriented pair of texts, as found on disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub score: Option<f64>,
    pub first: &'a str,
    pub second: &'a str,
    /// `false` if `first` holds target-language text.
    pub first_is_source: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_projection() {
        let columns = Columns::from_header(["talkid", "en", "ar", "it"]);
        let record = RawRecord::Keyed(
            ["1", "Hello", "مرحبا", "Ciao"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );

        let c = columns
            .project(&record, &LangPair::new("en", "it"))
            .unwrap();
        assert_eq!(c.first, "Hello");
        assert_eq!(c.second, "Ciao");
        assert!(c.first_is_source);
        assert_eq!(c.score, None);

        assert!(columns
            .project(&record, &LangPair::new("en", "de"))
            .is_none());
    }

    #[test]
    fn keyed_short_row() {
        let columns = Columns::from_header(["en", "it"]);
        let record = RawRecord::Keyed(vec!["Hello".to_string()]);
        assert!(columns
            .project(&record, &LangPair::new("en", "it"))
            .is_none());
    }

    #[test]
    fn ordered_projection_reversed() {
        let pair = LangPair::new("en", "ar");
        let columns = Columns::canonical(&pair);
        assert_eq!(columns, Columns::Ordered("ar".into(), "en".into()));

        let record = RawRecord::Scored {
            score: 1.2,
            first: "مرحبا".to_string(),
            second: "Hello".to_string(),
        };
        let c = columns.project(&record, &pair).unwrap();
        assert!(!c.first_is_source);
        assert_eq!(c.score, Some(1.2));
    }

    #[test]
    fn covers() {
        let columns = Columns::from_header(["en", "it"]);
        assert!(columns.covers(&LangPair::new("en", "it")));
        assert!(!columns.covers(&LangPair::new("en", "ar")));

        let pair = LangPair::new("en", "ar");
        assert!(Columns::canonical(&pair).covers(&pair));
        assert!(!Columns::canonical(&pair).covers(&LangPair::new("en", "it")));
    }
}
