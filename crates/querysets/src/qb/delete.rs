//! DELETE statement builder.

use crate::error::QueryResult;
use crate::ident::Ident;
use crate::qb::expr::{Expr, ExprGroup};
use crate::qb::traits::BuildSql;
use crate::sql::Sql;

/// DELETE statement builder.
///
/// Without any WHERE condition it renders `WHERE 1=0` instead of deleting
/// every row.
#[derive(Clone, Debug)]
pub struct Delete {
    table: String,
    where_group: ExprGroup,
}

impl Delete {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_group: ExprGroup::new(),
        }
    }

    /// AND an expression into the WHERE clause.
    pub fn and_where(mut self, expr: impl Into<Expr>) -> Self {
        self.where_group.push(expr);
        self
    }
}

impl BuildSql for Delete {
    fn build(&self) -> QueryResult<Sql> {
        let table = Ident::parse(&self.table)?;
        let mut out = Sql::new("DELETE FROM ");
        out.push(table.as_str());
        if self.where_group.is_empty() {
            out.push(" WHERE 1=0");
        } else {
            self.where_group.build_where(&mut out);
        }
        Ok(out)
    }
}
