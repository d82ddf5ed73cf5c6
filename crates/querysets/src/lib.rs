//! # querysets
//!
//! Dialect-aware SQL query sets for a multi-tenant CRUD service backed by
//! either SQLite or PostgreSQL.
//!
//! ## Features
//!
//! - **One assembly, two dialects**: every query is built once and rendered
//!   with `?` or `$N` placeholders at the end
//! - **Counted placeholders**: a built [`Query`] always carries exactly as many
//!   arguments as its SQL has placeholders
//! - **Owner scoping**: reads and writes are confined to the owning user or
//!   account and skip archived rows unless an admin asks for them
//! - **Pure**: nothing here touches a database; execution belongs to the caller
//!
//! ## Usage
//!
//! ```ignore
//! use querysets::{Dialect, QueryBuilder, QueryFilter, SortBy};
//!
//! let qb = QueryBuilder::new(Dialect::Postgres);
//!
//! let filter = QueryFilter::new().limit(20).page(2).sort_by(SortBy::Desc);
//! let list = qb.items().get_list(account_id, false, Some(&filter))?;
//! let rows = client.query(&list.sql, &list.params_ref()).await?;
//!
//! let archive = qb.items().archive(item_id, account_id)?;
//! client.execute(&archive.sql, &archive.params_ref()).await?;
//! ```

pub mod builder;
pub mod config;
pub mod dialect;
pub mod entities;
pub mod error;
pub mod external_id;
pub mod filter;
pub mod ident;
pub mod qb;
pub mod search;
pub mod sql;
pub mod tables;
pub mod types;
pub mod value;

#[cfg(feature = "migrate")]
pub mod migrate;

pub use builder::{Query, QueryBuilder, QueryResultExt, SqlLogging, TableQueries};
pub use config::Config;
pub use dialect::Dialect;
pub use error::{QueryError, QueryResult};
pub use external_id::{ExternalIdGenerator, FixedExternalId, UuidGenerator};
pub use filter::{MAX_LIMIT, QueryFilter, SortBy, apply_filter};
pub use search::{IndexManager, SearchIndex, ensure_query_is_restricted_to_account};
pub use sql::{Placeholder, Sql, count_placeholders};
pub use tables::Table;
pub use value::Value;

#[cfg(feature = "sqlite")]
pub use search::SqliteSearchIndex;
