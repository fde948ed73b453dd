//! Language codes and language pairs.
//!
//! Corpora identify languages by short codes (`en`, `ar`, `pt-br`...).
//! Codes are validated as BCP47 tags but kept as plain lowercase strings,
//! since that is how they appear in archive headers and file names.
use std::fmt;

use itertools::Itertools;
use oxilangtag::LanguageTag;

use crate::error::Error;

/// Validate and normalize a language code.
pub fn parse_code(code: &str) -> Result<String, Error> {
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::Config("empty language code".to_string()));
    }
    LanguageTag::parse(code.to_string())
        .map_err(|e| Error::Config(format!("invalid language code {code:?}: {e}")))?;

    Ok(code.to_lowercase())
}

/// Parse a comma separated language list (`ar,it,en`).
///
/// Order is kept, repeated codes are removed.
pub fn parse_list(list: &str) -> Result<Vec<String>, Error> {
    let langs: Vec<String> = list
        .split(',')
        .filter(|c| !c.trim().is_empty())
        .map(parse_code)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .unique()
        .collect();

    if langs.is_empty() {
        return Err(Error::Config("no language provided".to_string()));
    }
    Ok(langs)
}

/// An oriented (source, target) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LangPair {
    source: String,
    target: String,
}

impl LangPair {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Codes in sorted order.
    ///
    /// Per-pair archives (WikiMatrix, OPUS) are named and laid out this way.
    pub fn canonical(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }

    /// `true` if the source language comes second in canonical order.
    pub fn is_reversed(&self) -> bool {
        self.source > self.target
    }

    /// `source-target`, used in sink names, manifest keys and log prefixes.
    pub fn key(&self) -> String {
        format!("{}-{}", self.source, self.target)
    }
}

impl fmt::Display for LangPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order() {
        let p = LangPair::new("en", "ar");
        assert_eq!(p.canonical(), ("ar", "en"));
        assert!(p.is_reversed());

        let p = LangPair::new("en", "it");
        assert_eq!(p.canonical(), ("en", "it"));
        assert!(!p.is_reversed());
    }

    #[test]
    fn key() {
        assert_eq!(LangPair::new("en", "ar").key(), "en-ar");
    }

    #[test]
    fn list_dedup_and_order() {
        let langs = parse_list("it, AR,it,,en").unwrap();
        assert_eq!(langs, vec!["it", "ar", "en"]);
    }

    #[test]
    fn list_invalid() {
        assert!(parse_list("").is_err());
        assert!(parse_list(",,").is_err());
        assert!(parse_list("en,not a tag").is_err());
    }
}
