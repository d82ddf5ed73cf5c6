//! SELECT statement builder.

use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::qb::expr::{Expr, ExprGroup};
use crate::qb::traits::BuildSql;
use crate::sql::Sql;
use crate::value::Value;

#[derive(Clone, Debug)]
enum SelectColumn {
    Expr(String),
    /// `(<subquery>) as <alias>`
    Subquery { query: Box<Select>, alias: String },
}

/// SELECT statement builder.
#[derive(Clone, Debug)]
pub struct Select {
    /// FROM table
    from: String,
    /// SELECT columns
    columns: Vec<SelectColumn>,
    /// JOIN clauses
    joins: Vec<String>,
    /// WHERE conditions
    where_group: ExprGroup,
    /// GROUP BY columns
    group_by: Vec<String>,
    /// ORDER BY clauses
    order_by: Vec<String>,
    /// LIMIT
    limit: Option<u64>,
    /// OFFSET
    offset: Option<u64>,
}

impl Select {
    /// Start a SELECT over `table`.
    pub fn from(table: &str) -> Self {
        Self {
            from: table.to_string(),
            columns: Vec::new(),
            joins: Vec::new(),
            where_group: ExprGroup::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    // ==================== SELECT columns ====================

    /// Append one column expression.
    pub fn column(mut self, col: impl Into<String>) -> Self {
        self.columns.push(SelectColumn::Expr(col.into()));
        self
    }

    /// Append several column expressions.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns
            .extend(cols.iter().map(|c| SelectColumn::Expr((*c).to_string())));
        self
    }

    /// Append `(<query>) as <alias>` as a projected column.
    pub fn column_subquery(mut self, query: Select, alias: &str) -> Self {
        self.columns.push(SelectColumn::Subquery {
            query: Box::new(query),
            alias: alias.to_string(),
        });
        self
    }

    // ==================== JOIN ====================

    /// Append a raw JOIN clause (e.g. `JOIN unnest(...) ...`).
    pub fn join(mut self, clause: impl Into<String>) -> Self {
        self.joins.push(clause.into());
        self
    }

    // ==================== WHERE ====================

    /// AND an expression into the WHERE clause.
    pub fn and_where(mut self, expr: impl Into<Expr>) -> Self {
        self.where_group.push(expr);
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Expr::eq(column, value))
    }

    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Expr::gt(column, value))
    }

    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Expr::lt(column, value))
    }

    pub fn is_null(self, column: &str) -> Self {
        self.and_where(Expr::is_null(column))
    }

    pub fn is_not_null(self, column: &str) -> Self {
        self.and_where(Expr::is_not_null(column))
    }

    // ==================== GROUP / ORDER / LIMIT ====================

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    /// Append an ORDER BY clause (`items.created_on DESC`, `CASE ... END`, ...).
    pub fn order_by(mut self, clause: impl Into<String>) -> Self {
        self.order_by.push(clause.into());
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Wrap this query as `SELECT EXISTS ( ... )`.
    pub fn exists(self) -> Exists {
        Exists(self)
    }

    pub(crate) fn append_to(&self, out: &mut Sql) -> QueryResult<()> {
        if self.columns.is_empty() {
            return Err(QueryError::EmptyStatement("SELECT without columns"));
        }
        let from = Ident::parse(&self.from)?;

        out.push("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            match col {
                SelectColumn::Expr(expr) => {
                    out.push(expr);
                }
                SelectColumn::Subquery { query, alias } => {
                    out.push("(");
                    query.append_to(out)?;
                    out.push(") as ").push(alias);
                }
            }
        }

        out.push(" FROM ").push(from.as_str());
        for join in &self.joins {
            out.push(" ").push(join);
        }

        self.where_group.build_where(out);

        if !self.group_by.is_empty() {
            out.push(" GROUP BY ").push(&self.group_by.join(", "));
        }
        if !self.order_by.is_empty() {
            out.push(" ORDER BY ").push(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            out.push(" LIMIT ").push(&limit.to_string());
        }
        if let Some(offset) = self.offset {
            out.push(" OFFSET ").push(&offset.to_string());
        }
        Ok(())
    }
}

impl BuildSql for Select {
    fn build(&self) -> QueryResult<Sql> {
        let mut out = Sql::empty();
        self.append_to(&mut out)?;
        Ok(out)
    }
}

/// `SELECT EXISTS ( <query> )`
#[derive(Clone, Debug)]
pub struct Exists(Select);

impl BuildSql for Exists {
    fn build(&self) -> QueryResult<Sql> {
        let mut out = Sql::new("SELECT EXISTS ( ");
        self.0.append_to(&mut out)?;
        out.push(" )");
        Ok(out)
    }
}
