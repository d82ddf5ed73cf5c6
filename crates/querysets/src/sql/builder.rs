use super::Placeholder;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
enum SqlPart {
    Raw(String),
    Param,
}

/// A parameter-safe SQL fragment.
///
/// `Sql` stores SQL pieces and bound values separately. Placeholders are only
/// numbered when the fragment is rendered, so fragments can be nested inside
/// each other (subselects, `EXISTS`, count projections) in any order and the
/// final `$1, $2, ...` sequence still follows the text.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<Value>,
}

impl Sql {
    /// Create a new fragment with an initial SQL string.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
        }
    }

    /// Create an empty fragment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Append a comma-separated list of placeholders and bind all values.
    ///
    /// An empty list appends `NULL`, so `IN (NULL)` is still valid SQL and
    /// matches nothing.
    pub fn push_bind_list<T: Into<Value>>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        for v in iter {
            self.push(", ");
            self.push_bind(v);
        }
        self
    }

    /// Append another fragment, consuming it.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        for part in other.parts.drain(..) {
            match part {
                SqlPart::Raw(s) => {
                    self.push(&s);
                }
                SqlPart::Param => self.parts.push(SqlPart::Param),
            }
        }
        self.params.append(&mut other.params);
        self
    }

    /// Append another fragment wrapped in parentheses.
    pub fn push_parenthesized(&mut self, other: Sql) -> &mut Self {
        self.push("(");
        self.push_sql(other);
        self.push(")")
    }

    /// Bind a value and return `self` (consuming version of [`Sql::push_bind`]).
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.push_bind(value);
        self
    }

    /// Append raw SQL and return `self` (consuming version of [`Sql::push`]).
    pub fn append(mut self, sql: &str) -> Self {
        self.push(sql);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, SqlPart::Raw(s) if s.is_empty()))
    }

    /// Number of placeholders this fragment will render.
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, SqlPart::Param))
            .count()
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Render SQL text with the given placeholder style.
    pub fn to_sql(&self, style: Placeholder) -> String {
        let mut out = String::with_capacity(
            self.parts
                .iter()
                .map(|p| match p {
                    SqlPart::Raw(s) => s.len(),
                    SqlPart::Param => 4,
                })
                .sum(),
        );
        let mut idx = 0usize;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    style.write(&mut out, idx);
                }
            }
        }
        out
    }

    /// Render and hand over the bound values.
    pub fn into_parts(self, style: Placeholder) -> (String, Vec<Value>) {
        let sql = self.to_sql(style);
        (sql, self.params)
    }
}
