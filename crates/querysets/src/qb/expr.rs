//! Expression layer for WHERE clauses.
//!
//! `Expr::build()` appends into a [`Sql`] fragment, so placeholders are
//! numbered once at render time no matter how deeply expressions are nested.

use crate::sql::Sql;
use crate::value::Value;
use std::collections::BTreeMap;

/// Expression node for building WHERE clauses.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// AND group: all conditions must be true.
    And(Vec<Expr>),

    /// OR group: at least one condition must be true.
    Or(Vec<Expr>),

    /// Simple comparison: column op ?
    Compare {
        column: String,
        op: &'static str,
        value: Value,
    },

    /// NULL check: column IS NULL or column IS NOT NULL
    NullCheck { column: String, is_null: bool },

    /// Template with `?` markers, each bound to the next value.
    Template { sql: String, params: Vec<Value> },

    /// Raw SQL fragment without parameters.
    Raw(String),
}

impl Expr {
    pub fn or(exprs: Vec<Expr>) -> Self {
        Expr::Or(exprs)
    }

    fn compare(column: impl Into<String>, op: &'static str, value: impl Into<Value>) -> Self {
        Expr::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// column = value
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value)
    }

    /// column != value
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "!=", value)
    }

    /// column > value
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">", value)
    }

    /// column < value
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value)
    }

    /// `column LIKE pattern ESCAPE '\'`; see [`escape_like`].
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Expr::Template {
            sql: format!("{} LIKE ? ESCAPE '\\'", column.into()),
            params: vec![pattern.into()],
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// Template expression with `?` markers.
    ///
    /// # Example
    /// ```ignore
    /// Expr::template("a = ? OR b = ?", vec![Value::from(1), Value::from(2)])
    /// ```
    pub fn template(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Expr::Template {
            sql: sql.into(),
            params,
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Check if this expression is empty (contains no conditions).
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().all(Expr::is_empty),
            _ => false,
        }
    }

    /// Append this expression to `out`.
    pub fn build(&self, out: &mut Sql) {
        match self {
            Expr::And(exprs) => build_joined(out, exprs, " AND ", |e| matches!(e, Expr::Or(_))),
            Expr::Or(exprs) => build_joined(out, exprs, " OR ", |e| matches!(e, Expr::And(_))),
            Expr::Compare { column, op, value } => {
                out.push(column)
                    .push(" ")
                    .push(op)
                    .push(" ")
                    .push_bind(value.clone());
            }
            Expr::NullCheck { column, is_null } => {
                out.push(column);
                out.push(if *is_null { " IS NULL" } else { " IS NOT NULL" });
            }
            Expr::Template { sql, params } => {
                let mut params = params.iter();
                let mut segments = sql.split('?').peekable();
                while let Some(segment) = segments.next() {
                    out.push(segment);
                    if segments.peek().is_some() {
                        match params.next() {
                            Some(value) => out.push_bind(value.clone()),
                            None => out.push("?"),
                        };
                    }
                }
            }
            Expr::Raw(sql) => {
                out.push(sql);
            }
        }
    }
}

/// Escape `%`, `_` and `\` so `s` matches literally inside a LIKE pattern.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn build_joined(out: &mut Sql, exprs: &[Expr], sep: &str, needs_parens: fn(&Expr) -> bool) {
    let mut first = true;
    for expr in exprs.iter().filter(|e| !e.is_empty()) {
        if !first {
            out.push(sep);
        }
        first = false;
        if needs_parens(expr) {
            out.push("(");
            expr.build(out);
            out.push(")");
        } else {
            expr.build(out);
        }
    }
}

/// Equality predicates rendered in column-name order.
///
/// A `Value::Null` entry renders as `column IS NULL`, every other entry as
/// `column = ?`. Sorting keeps the generated SQL (and therefore argument
/// order) stable regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnEq(BTreeMap<String, Value>);

impl ColumnEq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ColumnEq> for Expr {
    fn from(eq: ColumnEq) -> Self {
        Expr::And(
            eq.0.into_iter()
                .map(|(column, value)| {
                    if value.is_null() {
                        Expr::is_null(column)
                    } else {
                        Expr::eq(column, value)
                    }
                })
                .collect(),
        )
    }
}

/// A builder for constructing WHERE clauses incrementally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprGroup {
    /// The list of expressions to be ANDed together.
    exprs: Vec<Expr>,
}

impl ExprGroup {
    pub fn new() -> Self {
        Self { exprs: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.iter().all(Expr::is_empty)
    }

    pub fn push(&mut self, expr: impl Into<Expr>) {
        let expr = expr.into();
        if !expr.is_empty() {
            self.exprs.push(expr);
        }
    }

    /// Append ` WHERE ...` to `out`, or nothing when the group is empty.
    pub fn build_where(&self, out: &mut Sql) {
        if self.is_empty() {
            return;
        }
        out.push(" WHERE ");
        build_joined(out, &self.exprs, " AND ", |e| matches!(e, Expr::Or(_)));
    }
}
