//! Error types for querysets

use thiserror::Error;

/// Result type alias for query composition and the layers around it
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while composing queries.
///
/// Composition errors are programmer errors (a malformed statement), never a
/// data condition. Callers that want the fail-soft behaviour can use
/// [`crate::QueryResultExt::or_log`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// Identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A statement was built without a required part (columns, SET list, ...)
    #[error("Empty statement: {0}")]
    EmptyStatement(&'static str),

    /// An INSERT row does not line up with its column list
    #[error("Column count mismatch: columns({columns}) != values({values})")]
    ColumnCountMismatch { columns: usize, values: usize },

    /// `get_with_ids` was called without any ids
    #[error("Empty id list")]
    EmptyIdList,

    /// Rendered SQL and its argument list disagree
    #[error("Placeholder mismatch: placeholders({placeholders}) != args({args})")]
    PlaceholderMismatch { placeholders: usize, args: usize },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Search index error
    #[error("Search error: {0}")]
    Search(String),

    /// SQLite driver error (search index)
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Migration error
    #[cfg(feature = "migrate")]
    #[error("Migration error: {0}")]
    Migration(String),
}

impl QueryError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a search error
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search(message.into())
    }

    /// Check if this error comes from statement composition
    pub fn is_composition(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_)
                | Self::EmptyStatement(_)
                | Self::ColumnCountMismatch { .. }
                | Self::EmptyIdList
                | Self::PlaceholderMismatch { .. }
        )
    }
}

#[cfg(feature = "migrate")]
impl From<refinery::Error> for QueryError {
    fn from(err: refinery::Error) -> Self {
        Self::Migration(err.to_string())
    }
}
