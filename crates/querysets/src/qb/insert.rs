//! INSERT statement builder.

use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::qb::traits::BuildSql;
use crate::sql::Sql;
use crate::value::Value;

/// INSERT statement builder.
#[derive(Clone, Debug)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    returning: Option<String>,
}

impl Insert {
    pub fn into(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            returning: None,
        }
    }

    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Append one row of values, in column order.
    pub fn values(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Append a `RETURNING <column>` suffix.
    pub fn returning(mut self, column: &str) -> Self {
        self.returning = Some(column.to_string());
        self
    }
}

impl BuildSql for Insert {
    fn build(&self) -> QueryResult<Sql> {
        if self.columns.is_empty() {
            return Err(QueryError::EmptyStatement("INSERT without columns"));
        }
        if self.rows.is_empty() {
            return Err(QueryError::EmptyStatement("INSERT without values"));
        }

        let table = Ident::parse(&self.table)?;
        let columns = self
            .columns
            .iter()
            .map(|c| Ident::parse(c).map(|i| i.to_string()))
            .collect::<QueryResult<Vec<_>>>()?;

        let mut out = Sql::new("INSERT INTO ");
        out.push(table.as_str())
            .push(" (")
            .push(&columns.join(", "))
            .push(") VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(QueryError::ColumnCountMismatch {
                    columns: columns.len(),
                    values: row.len(),
                });
            }
            if i > 0 {
                out.push(", ");
            }
            out.push("(").push_bind_list(row.iter().cloned()).push(")");
        }

        if let Some(column) = &self.returning {
            let column = Ident::parse(column)?;
            out.push(" RETURNING ").push(column.as_str());
        }
        Ok(out)
    }
}
