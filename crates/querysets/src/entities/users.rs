//! Users are global rows. A user only counts as fully registered once their
//! two-factor secret has been verified; the plain lookups require that.

use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::qb::{ColumnEq, Expr, Select, escape_like};
use crate::tables::columns::{ARCHIVED_ON, ID};
use crate::types::{User, UserCreationInput};
use crate::value::Value;

const VERIFIED_ON: &str = "two_factor_secret_verified_on";

/// Reputation assigned once two-factor setup completes.
pub const GOOD_REPUTATION: &str = "good";

#[derive(Debug, Clone, Copy)]
pub struct UserQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> UserQueries<'a> {
    pub(crate) fn new(inner: TableQueries<'a>) -> Self {
        Self { inner }
    }

    impl_table_verbs!(global:
        exists,
        get_all_count,
        get_batch,
        get_list,
        get_with_ids,
        archive,
    );

    fn live(&self) -> Select {
        let table = self.inner.table();
        self.inner.select().is_null(&table.archived_on())
    }

    fn build(&self, select: &Select) -> QueryResult<Query> {
        self.inner.builder().build_query(select)
    }

    /// A live user whose two-factor secret is verified.
    pub fn get(&self, id: u64) -> QueryResult<Query> {
        let table = self.inner.table();
        let select = self
            .live()
            .eq(&table.id_column(), id)
            .is_not_null(&table.qualify(VERIFIED_ON));
        self.build(&select)
    }

    /// A live user who has not verified their two-factor secret yet.
    pub fn get_with_unverified_two_factor_secret(&self, id: u64) -> QueryResult<Query> {
        let table = self.inner.table();
        let select = self
            .live()
            .eq(&table.id_column(), id)
            .is_null(&table.qualify(VERIFIED_ON));
        self.build(&select)
    }

    pub fn get_by_username(&self, username: &str) -> QueryResult<Query> {
        let table = self.inner.table();
        let select = self
            .live()
            .eq(&table.qualify("username"), username)
            .is_not_null(&table.qualify(VERIFIED_ON));
        self.build(&select)
    }

    /// Verified users whose username starts with `prefix`, taken literally.
    pub fn search_by_username(&self, prefix: &str) -> QueryResult<Query> {
        let table = self.inner.table();
        let pattern = format!("{}%", escape_like(prefix));
        let select = self
            .live()
            .and_where(Expr::like(table.qualify("username"), pattern))
            .is_not_null(&table.qualify(VERIFIED_ON));
        self.build(&select)
    }

    pub fn create(&self, input: &UserCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &[
                "username",
                "hashed_password",
                "two_factor_secret",
                "reputation",
                "service_roles",
            ],
            vec![
                input.username.as_str().into(),
                input.hashed_password.as_str().into(),
                input.two_factor_secret.as_str().into(),
                input.reputation.as_str().into(),
                input.service_roles.as_str().into(),
            ],
        )
    }

    pub fn update(&self, user: &User) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("username", user.username.as_str())
            .set("hashed_password", user.hashed_password.as_str())
            .set("avatar_src", user.avatar_src.as_deref())
            .set("two_factor_secret", user.two_factor_secret.as_str())
            .set(VERIFIED_ON, user.two_factor_secret_verified_on);
        self.inner.update(stmt, user.id, 0)
    }

    /// Store a new password hash and clear the forced-change flag.
    pub fn update_password(&self, user_id: u64, hashed_password: &str) -> QueryResult<Query> {
        let now = self.inner.builder().dialect().current_time();
        let stmt = self
            .inner
            .update_stmt()
            .set("hashed_password", hashed_password)
            .set("requires_password_change", false)
            .set_raw("password_last_changed_on", now);
        self.inner.update(stmt, user_id, 0)
    }

    /// Replace the two-factor secret; the new one starts unverified.
    pub fn update_two_factor_secret(&self, user_id: u64, secret: &str) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set(VERIFIED_ON, Value::Null)
            .set("two_factor_secret", secret);
        self.inner.update(stmt, user_id, 0)
    }

    pub fn verify_two_factor_secret(&self, user_id: u64) -> QueryResult<Query> {
        let now = self.inner.builder().dialect().current_time();
        let stmt = self
            .inner
            .update_stmt()
            .set_raw(VERIFIED_ON, now)
            .set("reputation", GOOD_REPUTATION);
        self.inner.update_where(
            stmt,
            ColumnEq::new()
                .with(ARCHIVED_ON, Value::Null)
                .with(ID, user_id)
                .with(VERIFIED_ON, Value::Null),
        )
    }

    pub fn set_reputation(
        &self,
        user_id: u64,
        reputation: &str,
        explanation: &str,
    ) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("reputation", reputation)
            .set("reputation_explanation", explanation);
        self.inner.update(stmt, user_id, 0)
    }

    /// Entries about the user or performed by them, oldest first.
    pub fn audit_log_entries(&self, user_id: u64) -> QueryResult<Query> {
        let about = self.inner.audit_pluck("user_id")?;
        let by = self.inner.audit_pluck("performed_by")?;
        self.inner.audit_log_entries_matching(Expr::or(vec![
            Expr::eq(about, user_id),
            Expr::eq(by, user_id),
        ]))
    }
}
