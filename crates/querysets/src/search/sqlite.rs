//! FTS5-backed search index.
//!
//! One database file per entity under the configured index directory. The
//! trigram tokenizer lets partial words match (`ench` finds `wrench`); terms
//! shorter than three characters match nothing.

use super::{ACCOUNT_FIELD, SearchIndex};
use crate::error::{QueryError, QueryResult};
use crate::qb::{Expr, ExprGroup};
use crate::sql::{Placeholder, Sql};
use crate::value::Value;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const TABLE: &str = "search_index";

fn acquire_lock(mutex: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!(target: "querysets::search", "search index mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Full-text index stored in an SQLite FTS5 virtual table.
#[derive(Debug)]
pub struct SqliteSearchIndex {
    name: String,
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteSearchIndex {
    /// Open (or create) `<dir>/<name>.db`.
    pub fn open(dir: impl AsRef<Path>, name: &str) -> QueryResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            QueryError::search(format!("creating index dir {}: {e}", dir.display()))
        })?;
        let path = dir.join(format!("{name}.db"));
        let conn = Connection::open(&path)?;
        Self::init(name, conn, Some(path))
    }

    /// An index that lives only as long as the value.
    pub fn in_memory(name: &str) -> QueryResult<Self> {
        Self::init(name, Connection::open_in_memory()?, None)
    }

    fn init(name: &str, conn: Connection, path: Option<PathBuf>) -> QueryResult<Self> {
        let fts5: i64 = conn
            .query_row("SELECT sqlite_compileoption_used('ENABLE_FTS5')", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);
        if fts5 == 0 {
            return Err(QueryError::search("SQLite was built without FTS5"));
        }

        conn.execute_batch(&format!(
            "CREATE VIRTUAL TABLE IF NOT EXISTS {TABLE} USING fts5(
                id UNINDEXED,
                account_id UNINDEXED,
                document,
                tokenize = 'trigram'
            );"
        ))?;

        tracing::debug!(target: "querysets::search", index = name, path = ?path, "opened search index");
        Ok(Self {
            name: name.to_string(),
            conn: Mutex::new(conn),
            path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database file, `None` for in-memory indexes.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SearchIndex for SqliteSearchIndex {
    fn index(&self, id: u64, account_id: u64, document: &str) -> QueryResult<()> {
        let mut conn = acquire_lock(&self.conn);
        let tx = conn.transaction()?;
        tx.execute(
            &format!("DELETE FROM {TABLE} WHERE id = ?1"),
            [Value::UInt(id)],
        )?;
        tx.execute(
            &format!("INSERT INTO {TABLE} (id, account_id, document) VALUES (?1, ?2, ?3)"),
            rusqlite::params![Value::UInt(id), Value::UInt(account_id), document],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn query(&self, query: &str, account_id: Option<u64>, limit: usize) -> QueryResult<Vec<u64>> {
        let mut parsed = ParsedQuery::parse(query);
        parsed.accounts.extend(account_id);
        let (sql, params) = parsed.to_sql(limit).into_parts(Placeholder::Question);

        let conn = acquire_lock(&self.conn);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            row.get::<_, i64>(0)
        })?;

        let mut ids = Vec::new();
        for row in rows {
            let id = row?;
            let id = u64::try_from(id)
                .map_err(|_| QueryError::search(format!("negative id {id} in {}", self.name)))?;
            ids.push(id);
        }
        Ok(ids)
    }

    fn delete(&self, id: u64) -> QueryResult<()> {
        let conn = acquire_lock(&self.conn);
        conn.execute(
            &format!("DELETE FROM {TABLE} WHERE id = ?1"),
            [Value::UInt(id)],
        )?;
        Ok(())
    }
}

/// A search query split into its clauses.
#[derive(Debug, Default, PartialEq)]
struct ParsedQuery {
    must: Vec<String>,
    should: Vec<String>,
    must_not: Vec<String>,
    accounts: Vec<u64>,
    excluded_accounts: Vec<u64>,
}

impl ParsedQuery {
    fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for token in query.split_whitespace() {
            let (prefix, term) = match token.chars().next() {
                Some(c @ ('+' | '-')) => (Some(c), &token[1..]),
                _ => (None, token),
            };
            if term.is_empty() {
                continue;
            }

            if let Some(id) = term
                .strip_prefix(ACCOUNT_FIELD)
                .and_then(|rest| rest.strip_prefix(':'))
                .and_then(|id| id.parse::<u64>().ok())
            {
                match prefix {
                    Some('-') => parsed.excluded_accounts.push(id),
                    _ => parsed.accounts.push(id),
                }
                continue;
            }

            let term = term.to_string();
            match prefix {
                Some('+') => parsed.must.push(term),
                Some('-') => parsed.must_not.push(term),
                _ => parsed.should.push(term),
            }
        }
        parsed
    }

    /// FTS5 expression for the positive clauses. Optional terms only narrow
    /// the result when nothing is required.
    fn positive_match(&self) -> Option<String> {
        if !self.must.is_empty() {
            return Some(join_terms(&self.must, " AND "));
        }
        if !self.should.is_empty() {
            return Some(join_terms(&self.should, " OR "));
        }
        None
    }

    fn to_sql(&self, limit: usize) -> Sql {
        let mut where_group = ExprGroup::new();
        let positive = self.positive_match();

        if let Some(expr) = &positive {
            where_group.push(Expr::template(
                format!("{TABLE} MATCH ?"),
                vec![expr.as_str().into()],
            ));
        }
        if !self.must_not.is_empty() {
            where_group.push(Expr::template(
                format!("id NOT IN (SELECT id FROM {TABLE} WHERE {TABLE} MATCH ?)"),
                vec![join_terms(&self.must_not, " OR ").into()],
            ));
        }
        for account in &self.accounts {
            where_group.push(Expr::eq("account_id", *account));
        }
        for account in &self.excluded_accounts {
            where_group.push(Expr::ne("account_id", *account));
        }

        let mut sql = Sql::new(format!("SELECT id FROM {TABLE}"));
        where_group.build_where(&mut sql);
        sql.push(if positive.is_some() {
            " ORDER BY rank"
        } else {
            " ORDER BY id"
        });
        sql.push(&format!(" LIMIT {limit}"));
        sql
    }
}

/// Quote each term as an FTS5 string literal.
fn join_terms(terms: &[String], sep: &str) -> String {
    terms
        .iter()
        .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with_docs() -> SqliteSearchIndex {
        let index = SqliteSearchIndex::in_memory("items").unwrap();
        index.index(1, 10, "red wrench").unwrap();
        index.index(2, 10, "blue hammer").unwrap();
        index.index(3, 20, "red hammer").unwrap();
        index
    }

    #[test]
    fn parses_clauses() {
        let parsed = ParsedQuery::parse("+red hammer -blue +belongsToAccount:4 -belongsToAccount:5");
        assert_eq!(parsed.must, vec!["red"]);
        assert_eq!(parsed.should, vec!["hammer"]);
        assert_eq!(parsed.must_not, vec!["blue"]);
        assert_eq!(parsed.accounts, vec![4]);
        assert_eq!(parsed.excluded_accounts, vec![5]);
    }

    #[test]
    fn renders_where_clause() {
        let (sql, params) = ParsedQuery::parse("wrench +belongsToAccount:4")
            .to_sql(10)
            .into_parts(Placeholder::Question);
        assert_eq!(
            sql,
            "SELECT id FROM search_index WHERE search_index MATCH ? AND account_id = ? ORDER BY rank LIMIT 10"
        );
        assert_eq!(params, vec![Value::from("\"wrench\""), Value::UInt(4)]);
    }

    #[test]
    fn quotes_terms() {
        assert_eq!(join_terms(&["a\"b".into()], " OR "), "\"a\"\"b\"");
    }

    #[test]
    fn matches_partial_terms() {
        let index = index_with_docs();
        assert_eq!(index.query("ench", None, 10).unwrap(), vec![1]);
    }

    #[test]
    fn account_clause_filters() {
        let index = index_with_docs();
        let mut ids = index.query("hammer +belongsToAccount:10", None, 10).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![2]);

        let mut ids = index.query("+belongsToAccount:10", None, 10).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn account_filter_cannot_be_lifted_by_query_text() {
        let index = index_with_docs();
        let mut ids = index.query("hammer", Some(10), 10).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![2]);

        let other_account = index.query("red +belongsToAccount:20", Some(10), 10).unwrap();
        assert!(other_account.is_empty());
        let excluded_own = index.query("hammer -belongsToAccount:10", Some(10), 10).unwrap();
        assert!(excluded_own.is_empty());
    }

    #[test]
    fn excluded_terms() {
        let index = index_with_docs();
        let mut ids = index.query("hammer -blue", None, 10).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn reindex_replaces_and_delete_removes() {
        let index = index_with_docs();
        index.index(1, 10, "green saw").unwrap();
        assert!(index.query("wrench", None, 10).unwrap().is_empty());
        assert_eq!(index.query("saw +belongsToAccount:10", None, 10).unwrap(), vec![1]);

        index.delete(3).unwrap();
        assert_eq!(index.query("hammer", None, 10).unwrap(), vec![2]);
    }

    #[test]
    fn opens_on_disk() {
        let dir = std::env::temp_dir().join(format!("querysets-search-{}", std::process::id()));
        let index = SqliteSearchIndex::open(&dir, "webhooks").unwrap();
        assert_eq!(index.path(), Some(dir.join("webhooks.db").as_path()));
        index.index(5, 1, "deploy hook").unwrap();
        assert_eq!(index.query("deploy", None, 10).unwrap(), vec![5]);
        drop(index);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
