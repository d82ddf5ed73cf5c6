//! Embedded schema migrations via [`refinery`].
//!
//! Both dialects ship the same ordered set of versioned scripts. Running them
//! is up to the caller's connection layer:
//!
//! ```ignore
//! let mut runner = querysets::migrate::runner(Dialect::Postgres)?;
//! runner.run_async(&mut client).await?;
//! ```

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};

pub use refinery::{Migration, Runner};

/// `(file name, SQL)` pairs in version order.
pub type Script = (&'static str, &'static str);

macro_rules! scripts {
    ($dir:literal: $($name:literal),+ $(,)?) => {
        &[$(($name, include_str!(concat!("../migrations/", $dir, "/", $name)))),+]
    };
}

const POSTGRES: &[Script] = scripts!("postgres":
    "V1__create_sessions.sql",
    "V2__create_audit_log.sql",
    "V3__create_account_subscription_plans.sql",
    "V4__create_users.sql",
    "V5__create_accounts.sql",
    "V6__create_account_user_memberships.sql",
    "V7__create_oauth2_clients.sql",
    "V8__create_delegated_clients.sql",
    "V9__create_api_clients.sql",
    "V10__create_webhooks.sql",
    "V11__create_items.sql",
);

const SQLITE: &[Script] = scripts!("sqlite":
    "V1__create_sessions.sql",
    "V2__create_audit_log.sql",
    "V3__create_account_subscription_plans.sql",
    "V4__create_users.sql",
    "V5__create_accounts.sql",
    "V6__create_account_user_memberships.sql",
    "V7__create_oauth2_clients.sql",
    "V8__create_delegated_clients.sql",
    "V9__create_api_clients.sql",
    "V10__create_webhooks.sql",
    "V11__create_items.sql",
);

/// Raw scripts for `dialect`.
pub fn scripts(dialect: Dialect) -> &'static [Script] {
    match dialect {
        Dialect::Postgres => POSTGRES,
        Dialect::Sqlite => SQLITE,
    }
}

/// Scripts for `dialect` as unapplied refinery migrations.
pub fn migrations(dialect: Dialect) -> QueryResult<Vec<Migration>> {
    scripts(dialect)
        .iter()
        .map(|(name, sql)| Migration::unapplied(name, sql).map_err(QueryError::from))
        .collect()
}

/// A runner over every migration for `dialect`.
pub fn runner(dialect: Dialect) -> QueryResult<Runner> {
    let migrations = migrations(dialect)?;
    tracing::debug!(
        target: "querysets::migrate",
        dialect = %dialect,
        count = migrations.len(),
        "built migration runner"
    );
    Ok(Runner::new(&migrations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    #[test]
    fn versions_are_sequential() {
        for dialect in Dialect::ALL {
            let migrations = migrations(dialect).unwrap();
            assert_eq!(migrations.len(), 11);
            for (i, m) in migrations.iter().enumerate() {
                assert_eq!(m.version() as usize, i + 1);
            }
        }
    }

    #[test]
    fn every_registered_table_is_created() {
        for dialect in Dialect::ALL {
            let all: String = scripts(dialect).iter().map(|(_, sql)| *sql).collect();
            for table in tables::ALL {
                assert!(
                    all.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table.name)),
                    "{dialect}: missing {}",
                    table.name
                );
            }
        }
    }

    #[test]
    fn dialects_use_their_own_clock() {
        let items = |d| scripts(d)[10].1;
        assert!(items(Dialect::Sqlite).contains("strftime('%s','now')"));
        assert!(items(Dialect::Postgres).contains("extract(epoch FROM NOW())"));
    }
}
