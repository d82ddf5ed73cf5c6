//! Paginated list assembly.
//!
//! A list query returns one page of rows, each annotated with two scalar
//! counts: `filtered_count` (scope plus the filter's time bounds) and
//! `total_count` (scope only). Arguments follow text order: filtered-count
//! args, then total-count args, then the outer select's own args.

use super::{Query, QueryBuilder};
use crate::error::QueryResult;
use crate::filter::{QueryFilter, apply_filter};
use crate::qb::{ColumnEq, Select};
use crate::tables::Table;
use crate::value::Value;

/// Ownership and archived predicates shared by every read path.
///
/// Archived rows are visible only to admin queries that explicitly include
/// them. Admin queries are never owner-scoped.
pub(crate) fn read_scope(
    table: &Table,
    owner_id: u64,
    for_admin: bool,
    include_archived: bool,
) -> ColumnEq {
    let mut scope = ColumnEq::new();
    if table.soft_deletes() && !(for_admin && include_archived) {
        scope.insert(table.archived_on(), Value::Null);
    }
    if !for_admin {
        if let Some(owner) = table.owner_column {
            scope.insert(table.qualify(owner), owner_id);
        }
    }
    scope
}

impl QueryBuilder {
    pub(crate) fn total_count_select(
        &self,
        table: &Table,
        owner_id: u64,
        for_admin: bool,
        include_archived: bool,
    ) -> Select {
        Select::from(table.name)
            .column(table.count_expr())
            .and_where(read_scope(table, owner_id, for_admin, include_archived))
    }

    pub(crate) fn filtered_count_select(
        &self,
        table: &Table,
        owner_id: u64,
        for_admin: bool,
        include_archived: bool,
        filter: Option<&QueryFilter>,
    ) -> Select {
        let select = self.total_count_select(table, owner_id, for_admin, include_archived);
        match filter {
            Some(f) => f.apply_time_bounds(select, table),
            None => select,
        }
    }

    /// Count the rows visible to `owner_id` (or, for admins, every row subject
    /// to `include_archived`). Never reflects time bounds.
    pub fn build_total_count_query(
        &self,
        table: &Table,
        owner_id: u64,
        for_admin: bool,
        include_archived: bool,
    ) -> QueryResult<Query> {
        self.build_query(&self.total_count_select(table, owner_id, for_admin, include_archived))
    }

    /// Same scoping as [`QueryBuilder::build_total_count_query`] plus the
    /// filter's time bounds.
    pub fn build_filtered_count_query(
        &self,
        table: &Table,
        owner_id: u64,
        for_admin: bool,
        include_archived: bool,
        filter: Option<&QueryFilter>,
    ) -> QueryResult<Query> {
        self.build_query(&self.filtered_count_select(
            table,
            owner_id,
            for_admin,
            include_archived,
            filter,
        ))
    }

    /// One page of `columns` from `table` with `filtered_count` and
    /// `total_count` projections.
    ///
    /// Without a filter: no time bounds, no ORDER BY, `LIMIT 250`.
    pub fn build_list_query(
        &self,
        table: &Table,
        columns: &[&str],
        owner_id: u64,
        for_admin: bool,
        filter: Option<&QueryFilter>,
    ) -> QueryResult<Query> {
        let include_archived = filter.is_some_and(|f| f.include_archived);

        let filtered =
            self.filtered_count_select(table, owner_id, for_admin, include_archived, filter);
        let total = self.total_count_select(table, owner_id, for_admin, include_archived);

        let select = Select::from(table.name)
            .columns(columns)
            .column_subquery(filtered, "filtered_count")
            .column_subquery(total, "total_count")
            .and_where(read_scope(table, owner_id, for_admin, include_archived))
            .group_by(table.id_column());

        self.build_query(&apply_filter(filter, select, table))
    }
}
