//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Http(reqwest::Error),
    Url(url::ParseError),
    GlobPattern(glob::PatternError),
    Glob(glob::GlobError),
    Custom(String),

    /// Invalid session configuration.
    Config(String),

    /// The archive backing a language pair could not be fetched or opened.
    /// Fatal for that pair only.
    SourceUnavailable { pair: String, reason: String },

    /// A score-annotated stream was not sorted by descending score.
    /// Only raised when strict order checking is enabled.
    UnsortedInput {
        pair: String,
        previous: f64,
        current: f64,
    },

    /// A sink or the manifest could not be read back. Fatal for the session.
    Assembly(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Csv(e) => write!(f, "csv error: {e}"),
            Error::Serde(e) => write!(f, "serialization error: {e}"),
            Error::Http(e) => write!(f, "http error: {e}"),
            Error::Url(e) => write!(f, "invalid url: {e}"),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {e}"),
            Error::Glob(e) => write!(f, "glob error: {e}"),
            Error::Custom(s) => write!(f, "{s}"),
            Error::Config(s) => write!(f, "invalid configuration: {s}"),
            Error::SourceUnavailable { pair, reason } => {
                write!(f, "[{pair}] source unavailable: {reason}")
            }
            Error::UnsortedInput {
                pair,
                previous,
                current,
            } => write!(
                f,
                "[{pair}] input not sorted by descending score ({current} after {previous})"
            ),
            Error::Assembly(s) => write!(f, "assembly failed: {s}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
