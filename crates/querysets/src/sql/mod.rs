//! SQL fragments with deferred placeholder numbering.
//!
//! # Example
//!
//! ```ignore
//! use querysets::sql::{Placeholder, Sql};
//!
//! let mut q = Sql::new("SELECT items.id FROM items WHERE items.belongs_to_account = ");
//! q.push_bind(7u64);
//! assert_eq!(q.to_sql(Placeholder::Dollar), "SELECT items.id FROM items WHERE items.belongs_to_account = $1");
//! ```

mod builder;


pub use builder::Sql;

/// Positional placeholder syntax of a dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// `?, ?, ?` (SQLite)
    Question,
    /// `$1, $2, $3` (PostgreSQL)
    Dollar,
}

impl Placeholder {
    pub(crate) fn write(self, out: &mut String, idx: usize) {
        match self {
            Placeholder::Question => out.push('?'),
            Placeholder::Dollar => {
                out.push('$');
                out.push_str(&idx.to_string());
            }
        }
    }
}

/// Count positional placeholders in rendered SQL text.
///
/// Characters inside single-quoted literals are skipped, so `'$.item_id'` in a
/// SQLite JSON path is not mistaken for a placeholder. For `$N` syntax the
/// result is the highest index seen, which equals the number of distinct
/// arguments the driver expects.
pub fn count_placeholders(sql: &str, style: Placeholder) -> usize {
    let mut chars = sql.chars().peekable();
    let mut in_literal = false;
    let mut count = 0usize;

    while let Some(c) = chars.next() {
        if c == '\'' {
            in_literal = !in_literal;
            continue;
        }
        if in_literal {
            continue;
        }
        match (style, c) {
            (Placeholder::Question, '?') => count += 1,
            (Placeholder::Dollar, '$') => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                if let Ok(n) = digits.parse::<usize>() {
                    count = count.max(n);
                }
            }
            _ => {}
        }
    }
    count
}
