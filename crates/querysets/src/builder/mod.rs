//! Dialect query builder.
//!
//! [`QueryBuilder`] owns the dialect descriptor and the external-id generator
//! and turns statement builders into [`Query`] values. The list assembly
//! helpers and the generic per-table verbs ([`TableQueries`]) are implemented
//! once here and shared by every entity.

mod list;
mod query;
mod table_queries;


pub use query::{Query, QueryResultExt};
pub use table_queries::TableQueries;

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::external_id::{ExternalIdGenerator, UuidGenerator};
use crate::qb::BuildSql;
use crate::sql::count_placeholders;
use crate::tables::Table;
use std::sync::Arc;

/// Settings for the `querysets::sql` debug events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlLogging {
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SqlLogging {
    fn default() -> Self {
        Self {
            max_sql_length: Some(200),
        }
    }
}

/// Builds dialect-correct queries.
///
/// Immutable after construction and cheap to clone; safe to share between
/// threads.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    dialect: Dialect,
    external_ids: Arc<dyn ExternalIdGenerator>,
    sql_logging: Option<SqlLogging>,
}

impl QueryBuilder {
    /// Builder with the default UUID v4 external-id generator.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_external_ids(dialect, Arc::new(UuidGenerator))
    }

    /// Builder with an injected external-id generator.
    pub fn with_external_ids(dialect: Dialect, external_ids: Arc<dyn ExternalIdGenerator>) -> Self {
        Self {
            dialect,
            external_ids,
            sql_logging: None,
        }
    }

    /// Emit every built query as a `DEBUG` event with target `querysets::sql`.
    pub fn with_sql_logging(mut self, logging: SqlLogging) -> Self {
        self.sql_logging = Some(logging);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn new_external_id(&self) -> String {
        self.external_ids.new_external_id()
    }

    /// Generic verbs over one registered table.
    pub fn table(&self, table: &'static Table) -> TableQueries<'_> {
        TableQueries::new(self, table)
    }

    /// Render a statement into SQL text and arguments.
    ///
    /// Fails only on composition errors, including a disagreement between the
    /// rendered placeholders and the argument list.
    pub fn build_query(&self, stmt: &impl BuildSql) -> QueryResult<Query> {
        let style = self.dialect.placeholder();
        let (sql, args) = stmt.build()?.into_parts(style);

        let placeholders = count_placeholders(&sql, style);
        if placeholders != args.len() {
            return Err(QueryError::PlaceholderMismatch {
                placeholders,
                args: args.len(),
            });
        }

        self.log_sql(&sql, args.len());
        Ok(Query::new(sql, args))
    }

    /// Like [`QueryBuilder::build_query`], discarding the arguments.
    pub fn build_query_only(&self, stmt: &impl BuildSql) -> QueryResult<String> {
        self.build_query(stmt).map(|q| q.sql)
    }

    fn log_sql(&self, sql: &str, param_count: usize) {
        let Some(logging) = self.sql_logging else {
            return;
        };
        let sql = match logging.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        };
        tracing::debug!(
            target: "querysets::sql",
            dialect = %self.dialect,
            param_count,
            sql = %sql,
        );
    }
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
