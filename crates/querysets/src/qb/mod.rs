//! Statement builders.
//!
//! Builders are dialect-neutral: they render into a [`Sql`](crate::sql::Sql)
//! fragment whose placeholders are numbered by the dialect at the very end.
//! Dialect-specific pieces (current time, JSON pluck, `RETURNING`) are passed
//! in by the caller as raw expressions.
//!
//! # Usage
//!
//! ```ignore
//! use querysets::qb::{ColumnEq, Update};
//!
//! let stmt = Update::table("items")
//!     .set_raw("last_updated_on", Dialect::Sqlite.current_time())
//!     .and_where(ColumnEq::new().with("id", 1u64));
//! let sql = stmt.build()?.to_sql(Placeholder::Question);
//! ```

pub mod delete;
pub mod expr;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;


pub use delete::Delete;
pub use expr::{ColumnEq, Expr, ExprGroup, escape_like};
pub use insert::Insert;
pub use select::{Exists, Select};
pub use traits::BuildSql;
pub use update::{SetValue, Update};
