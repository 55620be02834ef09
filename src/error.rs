//! Error types for typesift.
//!
//! Classification itself never fails: unmatched input is reported through
//! `Identification::Unclassified`. The types here cover the fallible glue
//! around it (file reads, email parsing, configuration) and rule-table
//! construction.

use thiserror::Error;

/// Main error type for typesift operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource limit exceeded
    #[error("Resource limit exceeded: {resource} ({used}/{limit})")]
    ResourceExhausted {
        resource: String,
        used: u64,
        limit: u64,
    },

    /// A rule table failed its shape validation
    #[error("Rule table error: {0}")]
    RuleTable(#[from] RuleTableError),

    /// MIME message could not be parsed
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Shape violations found while building a rule table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    #[error("rule {index} has no magic tokens")]
    NoTokens { index: usize },

    #[error("rule {index} has an empty magic token")]
    EmptyToken { index: usize },

    #[error("rule {index} token {token:?} contains whitespace and can never match")]
    WhitespaceInToken { index: usize, token: String },

    #[error("literal rule {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("literal rule {index} has an empty platform set")]
    NoPlatforms { index: usize },

    #[error("literal rule {index} follows functional rule {functional}")]
    LiteralAfterFunctional { index: usize, functional: usize },
}

/// Result type alias for typesift operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<mailparse::MailParseError> for Error {
    fn from(err: mailparse::MailParseError) -> Self {
        Error::Email(err.to_string())
    }
}
