//! External identifiers.
//!
//! Rows carry an opaque `external_id` next to their sequential primary key so
//! that clients never see (or enumerate) internal ids. The generator is fixed
//! when a [`QueryBuilder`](crate::QueryBuilder) is constructed.

use std::fmt;

/// Produces opaque, non-sequential identifiers for new rows.
pub trait ExternalIdGenerator: Send + Sync {
    fn new_external_id(&self) -> String;
}

/// Random UUID v4 generator (the default).
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl ExternalIdGenerator for UuidGenerator {
    fn new_external_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Always returns the same id. Useful for deterministic SQL in tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedExternalId(pub String);

impl FixedExternalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl ExternalIdGenerator for FixedExternalId {
    fn new_external_id(&self) -> String {
        self.0.clone()
    }
}

impl<F> ExternalIdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn new_external_id(&self) -> String {
        self()
    }
}

impl fmt::Debug for dyn ExternalIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExternalIdGenerator")
    }
}
