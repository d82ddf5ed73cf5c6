//! Search index boundary.
//!
//! Search queries use a small Lucene-like syntax: whitespace-separated terms,
//! `+term` (required), `-term` (excluded), and `belongsToAccount:<id>` to
//! restrict by owning account. Non-admin searches are forced onto the caller's
//! account twice: the query text is rewritten by
//! [`ensure_query_is_restricted_to_account`], and the index receives the
//! account as a separate equality filter that no query text can lift.
//!
//! Results are row ids; feed them to an entity's `get_with_ids` to load rows
//! in relevance order.

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSearchIndex;

use crate::error::QueryResult;
use crate::filter::MAX_LIMIT;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Field name of the account restriction clause.
pub const ACCOUNT_FIELD: &str = "belongsToAccount";

fn required_account_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|\s)\+belongsToAccount:\d+\b")
            .expect("invalid built-in account clause regex")
    })
}

fn account_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(^|\s)-?belongsToAccount:\d+\b")
            .expect("invalid built-in account clause regex")
    })
}

/// Force `query` to only match documents of `account_id`.
///
/// - A query that already requires an account (`+belongsToAccount:<n>`) is
///   returned unchanged.
/// - Optional or excluded account clauses (`belongsToAccount:<n>`,
///   `-belongsToAccount:<n>`) are each replaced, sign included, by
///   `+belongsToAccount:<account_id>`.
/// - Otherwise ` +belongsToAccount:<account_id>` is appended.
///
/// Applying it twice yields the same string as applying it once.
pub fn ensure_query_is_restricted_to_account(query: &str, account_id: u64) -> String {
    if required_account_re().is_match(query) {
        return query.to_string();
    }
    let clause = format!("+{ACCOUNT_FIELD}:{account_id}");
    if account_re().is_match(query) {
        return account_re()
            .replace_all(query, |caps: &Captures<'_>| format!("{}{clause}", &caps[1]))
            .into_owned();
    }
    format!("{query} {clause}")
}

/// A full-text index over one entity's documents.
pub trait SearchIndex: Send + Sync {
    /// Add or replace the document for row `id`.
    fn index(&self, id: u64, account_id: u64, document: &str) -> QueryResult<()>;

    /// Run a raw query, returning at most `limit` row ids, best match first.
    ///
    /// With `account_id` set, only documents indexed for that account match,
    /// whatever the query text says.
    fn query(&self, query: &str, account_id: Option<u64>, limit: usize) -> QueryResult<Vec<u64>>;

    /// Remove row `id`. Removing an unknown id is not an error.
    fn delete(&self, id: u64) -> QueryResult<()>;
}

/// Account-aware front for a [`SearchIndex`].
#[derive(Debug)]
pub struct IndexManager<I> {
    index: I,
}

impl<I: SearchIndex> IndexManager<I> {
    pub fn new(index: I) -> Self {
        Self { index }
    }

    pub fn inner(&self) -> &I {
        &self.index
    }

    pub fn index(&self, id: u64, account_id: u64, document: &str) -> QueryResult<()> {
        self.index.index(id, account_id, document)
    }

    pub fn delete(&self, id: u64) -> QueryResult<()> {
        self.index.delete(id)
    }

    /// Search within `account_id` only.
    pub fn search(&self, query: &str, account_id: u64) -> QueryResult<Vec<u64>> {
        let query = ensure_query_is_restricted_to_account(query, account_id);
        tracing::debug!(target: "querysets::search", account_id, query = %query, "search");
        self.index
            .query(&query, Some(account_id), usize::from(MAX_LIMIT))
    }

    /// Search across every account; the query is used as given.
    pub fn search_for_admin(&self, query: &str) -> QueryResult<Vec<u64>> {
        tracing::debug!(target: "querysets::search", query = %query, "admin search");
        self.index.query(query, None, usize::from(MAX_LIMIT))
    }
}
