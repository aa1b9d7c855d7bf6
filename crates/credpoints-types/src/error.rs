use thiserror::Error;

/// Errors from retrieving a badge page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid badge identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("badge page unreachable: {0}")]
    Unreachable(String),

    #[error("badge page request timed out after {0}s")]
    Timeout(u64),

    #[error("badge page returned HTTP {0}")]
    Status(u16),

    #[error("badge page is missing the {0}")]
    MissingField(&'static str),

    #[error("badge page has an unreadable {field}: '{value}'")]
    InvalidDate { field: &'static str, value: String },
}

/// Turn-level failure of the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("could not retrieve certification details: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors from repository operations (used by trait definitions in credpoints-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from reading `config.toml`.
///
/// The loader logs these and falls back to defaults; they never abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}
