//! Trait definitions for statement builders.

use crate::error::QueryResult;
use crate::sql::Sql;

/// A statement that renders to a dialect-neutral [`Sql`] fragment.
///
/// Rendering fails only on composition errors (invalid identifiers, missing
/// columns, an empty SET list).
pub trait BuildSql {
    fn build(&self) -> QueryResult<Sql>;
}

impl BuildSql for Sql {
    fn build(&self) -> QueryResult<Sql> {
        Ok(self.clone())
    }
}

impl<T: BuildSql + ?Sized> BuildSql for &T {
    fn build(&self) -> QueryResult<Sql> {
        (**self).build()
    }
}
