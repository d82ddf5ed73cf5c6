//! Identifier validation.
//!
//! Table and column names are spliced into SQL text, never bound, so every
//! name that reaches a statement builder is checked here first. Only the
//! dotted, unquoted form used by both dialects is accepted:
//! `[A-Za-z_][A-Za-z0-9_]*` per part, e.g. `items` or `items.belongs_to_account`.

use crate::error::{QueryError, QueryResult};

/// A validated SQL identifier (`column` or `table.column`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Parse and validate a possibly dotted identifier.
    pub fn parse(s: &str) -> QueryResult<Self> {
        if s.is_empty() {
            return Err(QueryError::InvalidIdentifier("identifier cannot be empty".into()));
        }

        for part in s.split('.') {
            validate_part(s, part)?;
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_part(whole: &str, part: &str) -> QueryResult<()> {
    let mut chars = part.chars();
    match chars.next() {
        None => {
            return Err(QueryError::InvalidIdentifier(format!(
                "empty segment in '{whole}'"
            )));
        }
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => {
            return Err(QueryError::InvalidIdentifier(format!(
                "invalid start character '{c}' in '{whole}'"
            )));
        }
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || c.is_ascii_alphanumeric())) {
        return Err(QueryError::InvalidIdentifier(format!(
            "invalid character '{c}' in '{whole}'"
        )));
    }
    Ok(())
}

/// Validate a JSON object key used inside a pluck expression.
///
/// Keys are written into a string literal (`'$.key'` / `'key'`), so quotes and
/// placeholder characters must never get through.
pub(crate) fn validate_json_key(key: &str) -> QueryResult<()> {
    if key.is_empty() || !key.chars().all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return Err(QueryError::InvalidIdentifier(format!(
            "invalid JSON key '{key}'"
        )));
    }
    Ok(())
}
