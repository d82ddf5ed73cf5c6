//! UPDATE statement builder.

use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::qb::expr::{Expr, ExprGroup};
use crate::qb::traits::BuildSql;
use crate::sql::Sql;
use crate::value::Value;

/// Right-hand side of a SET assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum SetValue {
    /// Bound value: `column = ?`
    Value(Value),
    /// Raw SQL expression: `column = <expr>`
    Raw(String),
    /// SQL fragment carrying its own parameters.
    Sql(Sql),
}

/// UPDATE statement builder.
#[derive(Clone, Debug)]
pub struct Update {
    table: String,
    sets: Vec<(String, SetValue)>,
    where_group: ExprGroup,
}

impl Update {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            sets: Vec::new(),
            where_group: ExprGroup::new(),
        }
    }

    /// SET column = ?
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.sets
            .push((column.to_string(), SetValue::Value(value.into())));
        self
    }

    /// SET column = <raw expression>
    pub fn set_raw(mut self, column: &str, expr: impl Into<String>) -> Self {
        self.sets.push((column.to_string(), SetValue::Raw(expr.into())));
        self
    }

    /// SET column = <fragment>
    pub fn set_sql(mut self, column: &str, fragment: Sql) -> Self {
        self.sets.push((column.to_string(), SetValue::Sql(fragment)));
        self
    }

    /// AND an expression into the WHERE clause.
    pub fn and_where(mut self, expr: impl Into<Expr>) -> Self {
        self.where_group.push(expr);
        self
    }
}

impl BuildSql for Update {
    fn build(&self) -> QueryResult<Sql> {
        if self.sets.is_empty() {
            return Err(QueryError::EmptyStatement("UPDATE without SET"));
        }
        let table = Ident::parse(&self.table)?;

        let mut out = Sql::new("UPDATE ");
        out.push(table.as_str()).push(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            let column = Ident::parse(column)?;
            if i > 0 {
                out.push(", ");
            }
            out.push(column.as_str()).push(" = ");
            match value {
                SetValue::Value(v) => {
                    out.push_bind(v.clone());
                }
                SetValue::Raw(expr) => {
                    out.push(expr);
                }
                SetValue::Sql(fragment) => {
                    out.push_sql(fragment.clone());
                }
            }
        }

        self.where_group.build_where(&mut out);
        Ok(out)
    }
}
