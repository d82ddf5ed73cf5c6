//! Generic per-table verbs.
//!
//! Every entity query set is a thin typed layer over [`TableQueries`]; the
//! predicate shapes, ordering and pagination live here once.

use super::list::read_scope;
use super::{Query, QueryBuilder};
use crate::error::{QueryError, QueryResult};
use crate::filter::{MAX_LIMIT, QueryFilter};
use crate::qb::{ColumnEq, Delete, Expr, Insert, Select, Update};
use crate::tables::columns::{ARCHIVED_ON, AUDIT_LOG_CONTEXT, EXTERNAL_ID, ID, LAST_UPDATED_ON};
use crate::tables::{AUDIT_LOG, Table};
use crate::value::Value;
use std::collections::HashSet;

/// Shared verb set over one [`Table`].
///
/// `owner_id` is ignored for tables without an ownership column.
#[derive(Debug, Clone, Copy)]
pub struct TableQueries<'a> {
    qb: &'a QueryBuilder,
    table: &'static Table,
}

impl<'a> TableQueries<'a> {
    pub(crate) fn new(qb: &'a QueryBuilder, table: &'static Table) -> Self {
        Self { qb, table }
    }

    pub fn table(&self) -> &'static Table {
        self.table
    }

    pub(crate) fn builder(&self) -> &'a QueryBuilder {
        self.qb
    }

    fn now(&self) -> &'static str {
        self.qb.dialect().current_time()
    }

    /// `SELECT <all columns> FROM <table>`
    pub fn select(&self) -> Select {
        Select::from(self.table.name).columns(self.table.columns)
    }

    /// Non-admin read scope: not archived, owned by `owner_id`.
    pub fn scope(&self, owner_id: u64) -> ColumnEq {
        read_scope(self.table, owner_id, false, false)
    }

    /// Unqualified write scope used by UPDATE / DELETE statements.
    fn write_scope(&self, id: Option<u64>, owner_id: u64) -> ColumnEq {
        let mut scope = ColumnEq::new();
        if self.table.soft_deletes() {
            scope.insert(ARCHIVED_ON, Value::Null);
        }
        if let Some(owner) = self.table.owner_column {
            scope.insert(owner, owner_id);
        }
        if let Some(id) = id {
            scope.insert(ID, id);
        }
        scope
    }

    /// `SELECT EXISTS ( SELECT t.id FROM t WHERE <scope> AND t.id = ? )`
    pub fn exists(&self, id: u64, owner_id: u64) -> QueryResult<Query> {
        let select = Select::from(self.table.name)
            .column(self.table.id_column())
            .and_where(self.scope(owner_id).with(self.table.id_column(), id))
            .exists();
        self.qb.build_query(&select)
    }

    /// One row by id, owner- and archived-scoped.
    pub fn get(&self, id: u64, owner_id: u64) -> QueryResult<Query> {
        self.get_where(self.scope(owner_id).with(self.table.id_column(), id))
    }

    /// All columns for rows matching `predicate`.
    pub fn get_where(&self, predicate: impl Into<Expr>) -> QueryResult<Query> {
        self.qb.build_query(&self.select().and_where(predicate))
    }

    /// Count of non-archived rows across all owners.
    pub fn get_all_count(&self) -> QueryResult<String> {
        let mut select = Select::from(self.table.name).column(self.table.count_expr());
        if self.table.soft_deletes() {
            select = select.is_null(&self.table.archived_on());
        }
        self.qb.build_query_only(&select)
    }

    /// Rows with `begin_id < id < end_id`, unscoped. Used for background scans.
    pub fn get_batch(&self, begin_id: u64, end_id: u64) -> QueryResult<Query> {
        let id = self.table.id_column();
        let select = self.select().gt(&id, begin_id).lt(&id, end_id);
        self.qb.build_query(&select)
    }

    /// Paginated list with `filtered_count` / `total_count`.
    pub fn get_list(
        &self,
        owner_id: u64,
        for_admin: bool,
        filter: Option<&QueryFilter>,
    ) -> QueryResult<Query> {
        self.qb
            .build_list_query(self.table, self.table.columns, owner_id, for_admin, filter)
    }

    /// Exactly the rows in `ids`, in that order, capped at `limit` (`0` means 250).
    ///
    /// Archived rows are never returned. Duplicate ids are collapsed to their
    /// first occurrence.
    pub fn get_with_ids(
        &self,
        owner_id: u64,
        limit: u8,
        ids: &[u64],
        for_admin: bool,
    ) -> QueryResult<Query> {
        if ids.is_empty() {
            return Err(QueryError::EmptyIdList);
        }
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<u64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let limit = match limit {
            0 => MAX_LIMIT,
            n => n.min(MAX_LIMIT),
        };

        let select = self
            .select()
            .and_where(read_scope(self.table, owner_id, for_admin, false));
        let select = self
            .qb
            .dialect()
            .restrict_to_ids(select, &self.table.id_column(), &unique)
            .limit(u64::from(limit));
        self.qb.build_query(&select)
    }

    /// INSERT with a freshly generated external id as the first column.
    pub fn create(&self, columns: &[&str], values: Vec<Value>) -> QueryResult<Query> {
        let mut all_columns = Vec::with_capacity(columns.len() + 1);
        all_columns.push(EXTERNAL_ID);
        all_columns.extend_from_slice(columns);

        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(Value::Text(self.qb.new_external_id()));
        row.extend(values);

        self.insert(&all_columns, row)
    }

    /// INSERT without an external id; PostgreSQL adds `RETURNING id`.
    pub fn insert(&self, columns: &[&str], row: Vec<Value>) -> QueryResult<Query> {
        let mut insert = Insert::into(self.table.name).columns(columns).values(row);
        if self.qb.dialect().supports_returning() {
            insert = insert.returning(ID);
        }
        self.qb.build_query(&insert)
    }

    /// Start an UPDATE of this table.
    pub fn update_stmt(&self) -> Update {
        Update::table(self.table.name)
    }

    /// Finish `update` for one row: bump `last_updated_on` and scope it to a
    /// live row of `owner_id`.
    pub fn update(&self, update: Update, id: u64, owner_id: u64) -> QueryResult<Query> {
        self.update_where(update, self.write_scope(Some(id), owner_id))
    }

    /// Finish `update` with an explicit predicate, bumping `last_updated_on`.
    pub fn update_where(&self, update: Update, predicate: impl Into<Expr>) -> QueryResult<Query> {
        let update = update
            .set_raw(LAST_UPDATED_ON, self.now())
            .and_where(predicate);
        self.qb.build_query(&update)
    }

    /// Soft delete: stamp `last_updated_on` and `archived_on`.
    pub fn archive(&self, id: u64, owner_id: u64) -> QueryResult<Query> {
        self.archive_where(self.write_scope(Some(id), owner_id))
    }

    /// Soft delete every live row matching `predicate`.
    pub fn archive_where(&self, predicate: impl Into<Expr>) -> QueryResult<Query> {
        let update = self
            .update_stmt()
            .set_raw(LAST_UPDATED_ON, self.now())
            .set_raw(ARCHIVED_ON, self.now())
            .and_where(predicate);
        self.qb.build_query(&update)
    }

    /// Physical DELETE of rows matching `predicate`.
    pub fn delete_where(&self, predicate: impl Into<Expr>) -> QueryResult<Query> {
        self.qb
            .build_query(&Delete::from(self.table.name).and_where(predicate))
    }

    /// Audit log entries whose context references row `id`, oldest first.
    pub fn audit_log_entries(&self, id: u64) -> QueryResult<Query> {
        let key = self
            .table
            .audit_key
            .ok_or(QueryError::EmptyStatement("audit lookup on a table without an audit key"))?;
        self.audit_log_entries_matching(Expr::eq(self.audit_pluck(key)?, id))
    }

    pub(crate) fn audit_pluck(&self, key: &str) -> QueryResult<String> {
        self.qb
            .dialect()
            .json_pluck(&AUDIT_LOG.qualify(AUDIT_LOG_CONTEXT), key)
    }

    pub(crate) fn audit_log_entries_matching(&self, predicate: Expr) -> QueryResult<Query> {
        let select = Select::from(AUDIT_LOG.name)
            .columns(AUDIT_LOG.columns)
            .and_where(predicate)
            .order_by(AUDIT_LOG.created_on());
        self.qb.build_query(&select)
    }
}
