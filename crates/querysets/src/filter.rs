//! List filters.
//!
//! A [`QueryFilter`] carries the pagination, time-bound and sort options of a
//! list request. It translates into WHERE / ORDER BY / LIMIT / OFFSET pieces of
//! a [`Select`]. The same time-bound predicates feed both the list query and
//! its `filtered_count` subquery so the two always agree.

use crate::qb::{Expr, Select};
use crate::tables::Table;
use serde::{Deserialize, Serialize};

/// Page size used when a filter leaves `limit` at 0, and the hard ceiling for any page.
pub const MAX_LIMIT: u8 = 250;

/// Sort direction on `created_on`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Asc,
    Desc,
}

impl SortBy {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortBy::Asc => "ASC",
            SortBy::Desc => "DESC",
        }
    }
}

/// Pagination, time bounds and sort order for list queries.
///
/// Timestamps are unix seconds; `0` leaves a bound unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilter {
    /// 1-based page; `0` is treated as `1`.
    pub page: u64,
    /// Page size; `0` means [`MAX_LIMIT`], larger values are clamped to it.
    pub limit: u8,
    pub created_after: u64,
    pub created_before: u64,
    pub updated_after: u64,
    pub updated_before: u64,
    pub sort_by: Option<SortBy>,
    /// Only honoured for admin-scoped queries.
    pub include_archived: bool,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    pub fn created_after(mut self, ts: u64) -> Self {
        self.created_after = ts;
        self
    }

    pub fn created_before(mut self, ts: u64) -> Self {
        self.created_before = ts;
        self
    }

    pub fn updated_after(mut self, ts: u64) -> Self {
        self.updated_after = ts;
        self
    }

    pub fn updated_before(mut self, ts: u64) -> Self {
        self.updated_before = ts;
        self
    }

    pub fn sort_by(mut self, sort: SortBy) -> Self {
        self.sort_by = Some(sort);
        self
    }

    pub fn include_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }

    pub fn effective_limit(&self) -> u64 {
        match self.limit {
            0 => u64::from(MAX_LIMIT),
            n => u64::from(n.min(MAX_LIMIT)),
        }
    }

    pub fn effective_page(&self) -> u64 {
        self.page.max(1)
    }

    /// `(page - 1) * limit`, using the effective values of both.
    pub fn offset(&self) -> u64 {
        (self.effective_page() - 1).saturating_mul(self.effective_limit())
    }

    /// Strict time-bound predicates against `table`'s bookkeeping columns.
    ///
    /// Update bounds are skipped for append-only tables, which have no
    /// `last_updated_on`.
    pub fn time_bounds(&self, table: &Table) -> Vec<Expr> {
        let mut out = Vec::new();
        if self.created_after > 0 {
            out.push(Expr::gt(table.created_on(), self.created_after));
        }
        if self.created_before > 0 {
            out.push(Expr::lt(table.created_on(), self.created_before));
        }
        if table.tracks_updates() {
            if self.updated_after > 0 {
                out.push(Expr::gt(table.last_updated_on(), self.updated_after));
            }
            if self.updated_before > 0 {
                out.push(Expr::lt(table.last_updated_on(), self.updated_before));
            }
        }
        out
    }

    /// AND the time bounds into `select`.
    pub fn apply_time_bounds(&self, select: Select, table: &Table) -> Select {
        self.time_bounds(table)
            .into_iter()
            .fold(select, |select, bound| select.and_where(bound))
    }

    /// Apply ordering and LIMIT / OFFSET (no time bounds).
    pub fn apply_pagination(&self, mut select: Select, table: &Table) -> Select {
        if let Some(sort) = self.sort_by {
            select = select.order_by(format!("{} {}", table.created_on(), sort.as_sql()));
        }
        select = select.limit(self.effective_limit());
        match self.offset() {
            0 => select,
            offset => select.offset(offset),
        }
    }

    /// Apply time bounds, ordering and pagination.
    pub fn apply_to(&self, select: Select, table: &Table) -> Select {
        let select = self.apply_time_bounds(select, table);
        self.apply_pagination(select, table)
    }
}

/// Apply an optional filter; `None` yields only `LIMIT 250`.
pub fn apply_filter(filter: Option<&QueryFilter>, select: Select, table: &Table) -> Select {
    match filter {
        Some(f) => f.apply_to(select, table),
        None => select.limit(u64::from(MAX_LIMIT)),
    }
}
