use crate::dialect::Dialect;
use crate::error::QueryResult;
use crate::sql::count_placeholders;
use crate::value::Value;

/// Generated SQL text plus its ordered arguments.
///
/// Produced per call and handed straight to the execution layer; the number of
/// placeholders in `sql` always equals `args.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Query {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// An empty query is what fail-soft callers get after a composition error.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn placeholder_count(&self, dialect: Dialect) -> usize {
        count_placeholders(&self.sql, dialect.placeholder())
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.args
            .iter()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }

    /// Parameters compatible with `rusqlite`.
    #[cfg(feature = "sqlite")]
    pub fn sqlite_params(&self) -> rusqlite::ParamsFromIter<std::slice::Iter<'_, Value>> {
        rusqlite::params_from_iter(self.args.iter())
    }
}

/// Log-and-degrade adapter for composition results.
///
/// Composition errors are programmer errors. Call sites that must not fail
/// can use `or_log()`: the error is emitted at `ERROR` with target
/// `querysets::query_error` and the field `query_error = true` for alerting,
/// and the default (empty) value is returned.
pub trait QueryResultExt<T> {
    fn or_log(self) -> T;
}

impl<T: Default> QueryResultExt<T> for QueryResult<T> {
    fn or_log(self) -> T {
        match self {
            Ok(v) => v,
            Err(err) => {
                tracing::error!(
                    target: "querysets::query_error",
                    query_error = true,
                    error = %err,
                    "building query"
                );
                T::default()
            }
        }
    }
}
