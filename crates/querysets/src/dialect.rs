//! SQL dialect descriptor.
//!
//! The two supported engines differ in exactly four places: placeholder
//! syntax, the current-time expression, JSON extraction and `RETURNING id`.
//! Everything else is shared, so a dialect is a plain value that the generic
//! assembly code consults, not a separate builder type.

use crate::error::{QueryError, QueryResult};
use crate::ident::validate_json_key;
use crate::qb::{Expr, Select};
use crate::sql::Placeholder;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// Target database engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    #[serde(alias = "postgresql")]
    Postgres,
    #[serde(alias = "sqlite3")]
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Postgres, Dialect::Sqlite];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }

    pub fn placeholder(self) -> Placeholder {
        match self {
            Dialect::Postgres => Placeholder::Dollar,
            Dialect::Sqlite => Placeholder::Question,
        }
    }

    /// Current time as unix seconds.
    pub fn current_time(self) -> &'static str {
        match self {
            Dialect::Postgres => "extract(epoch FROM NOW())",
            Dialect::Sqlite => "(strftime('%s','now'))",
        }
    }

    /// Extract `key` from a JSON column.
    pub fn json_pluck(self, column: &str, key: &str) -> QueryResult<String> {
        validate_json_key(key)?;
        Ok(match self {
            Dialect::Postgres => format!("{column}->'{key}'"),
            Dialect::Sqlite => format!("json_extract({column}, '$.{key}')"),
        })
    }

    /// Whether inserts report the new id through `RETURNING id`.
    ///
    /// SQLite callers read the driver's last-insert-rowid instead.
    pub fn supports_returning(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Restrict `select` to `ids`, ordered as listed.
    ///
    /// Ids are integers and are inlined rather than bound.
    pub(crate) fn restrict_to_ids(self, select: Select, id_column: &str, ids: &[u64]) -> Select {
        match self {
            Dialect::Postgres => {
                let list = ids
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                select
                    .join(format!(
                        "JOIN unnest('{{{list}}}'::bigint[]) WITH ORDINALITY t(id, ord) USING (id)"
                    ))
                    .order_by("t.ord")
            }
            Dialect::Sqlite => {
                let mut list = String::new();
                let mut case = format!("CASE {id_column}");
                for (rank, id) in ids.iter().enumerate() {
                    if rank > 0 {
                        list.push_str(", ");
                    }
                    let _ = write!(list, "{id}");
                    let _ = write!(case, " WHEN {id} THEN {rank}");
                }
                case.push_str(" END");
                select
                    .and_where(Expr::raw(format!("{id_column} IN ({list})")))
                    .order_by(case)
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            other => Err(QueryError::config(format!("unsupported dialect: {other}"))),
        }
    }
}
