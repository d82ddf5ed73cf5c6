//! Account/user memberships.
//!
//! Memberships carry no external id and are scoped by account. Removing a
//! user from an account deletes the membership row outright.

use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::qb::{ColumnEq, Select};
use crate::sql::Sql;
use crate::tables::columns::{ARCHIVED_ON, BELONGS_TO_ACCOUNT, BELONGS_TO_USER};
use crate::types::{AccountUserMembershipCreationInput, join_list};
use crate::value::Value;

/// Role granted to the creator of an account.
pub const ACCOUNT_ADMIN_ROLE: &str = "account_admin";

const DEFAULT_ACCOUNT: &str = "default_account";
const ACCOUNT_ROLES: &str = "account_roles";

#[derive(Debug, Clone, Copy)]
pub struct MembershipQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> MembershipQueries<'a> {
    pub(crate) fn new(inner: TableQueries<'a>) -> Self {
        Self { inner }
    }

    impl_table_verbs!(owned: get_all_count, get_batch, get_list);

    /// Live memberships of `user_id`, qualified columns.
    fn for_user(&self, user_id: u64) -> ColumnEq {
        let table = self.inner.table();
        ColumnEq::new()
            .with(table.archived_on(), Value::Null)
            .with(table.qualify(BELONGS_TO_USER), user_id)
    }

    /// Unqualified scope for writes to one user's membership in one account.
    fn membership(&self, user_id: u64, account_id: u64) -> ColumnEq {
        ColumnEq::new()
            .with(ARCHIVED_ON, Value::Null)
            .with(BELONGS_TO_ACCOUNT, account_id)
            .with(BELONGS_TO_USER, user_id)
    }

    /// `belongs_to_account` of the user's default membership.
    pub fn get_default_account_id_for_user(&self, user_id: u64) -> QueryResult<Query> {
        let table = self.inner.table();
        let select = Select::from(table.name)
            .column(table.qualify(BELONGS_TO_ACCOUNT))
            .and_where(self.for_user(user_id).with(table.qualify(DEFAULT_ACCOUNT), true));
        self.inner.builder().build_query(&select)
    }

    pub fn get_for_user(&self, user_id: u64) -> QueryResult<Query> {
        self.inner.get_where(self.for_user(user_id))
    }

    pub fn user_is_member(&self, account_id: u64, user_id: u64) -> QueryResult<Query> {
        let table = self.inner.table();
        let select = Select::from(table.name)
            .column(table.id_column())
            .and_where(
                self.for_user(user_id)
                    .with(table.qualify(BELONGS_TO_ACCOUNT), account_id),
            )
            .exists();
        self.inner.builder().build_query(&select)
    }

    pub fn add_user_to_account(
        &self,
        input: &AccountUserMembershipCreationInput,
    ) -> QueryResult<Query> {
        self.inner.insert(
            &[BELONGS_TO_USER, BELONGS_TO_ACCOUNT, ACCOUNT_ROLES],
            vec![
                input.belongs_to_user.into(),
                input.belongs_to_account.into(),
                join_list(&input.account_roles).into(),
            ],
        )
    }

    /// Default admin membership for a freshly registered user's own account.
    pub fn create_for_new_user(&self, user_id: u64, account_id: u64) -> QueryResult<Query> {
        self.inner.insert(
            &[BELONGS_TO_USER, BELONGS_TO_ACCOUNT, DEFAULT_ACCOUNT, ACCOUNT_ROLES],
            vec![
                user_id.into(),
                account_id.into(),
                true.into(),
                ACCOUNT_ADMIN_ROLE.into(),
            ],
        )
    }

    /// Flag `account_id` as the user's default and clear it on every other
    /// membership, in one statement.
    pub fn mark_as_user_default(&self, user_id: u64, account_id: u64) -> QueryResult<Query> {
        let stmt = self.inner.update_stmt().set_sql(
            DEFAULT_ACCOUNT,
            Sql::new("(belongs_to_account = ").bind(account_id).append(")"),
        );
        self.inner.update_where(
            stmt,
            ColumnEq::new()
                .with(ARCHIVED_ON, Value::Null)
                .with(BELONGS_TO_USER, user_id),
        )
    }

    pub fn modify_permissions(
        &self,
        user_id: u64,
        account_id: u64,
        roles: &[String],
    ) -> QueryResult<Query> {
        let stmt = self.inner.update_stmt().set(ACCOUNT_ROLES, join_list(roles));
        self.inner
            .update_where(stmt, self.membership(user_id, account_id))
    }

    /// Move the memberships of `account_id` from `current_owner` to `new_owner`.
    pub fn transfer_memberships(
        &self,
        current_owner: u64,
        new_owner: u64,
        account_id: u64,
    ) -> QueryResult<Query> {
        let stmt = self.inner.update_stmt().set(BELONGS_TO_USER, new_owner);
        self.inner
            .update_where(stmt, self.membership(current_owner, account_id))
    }

    /// Archive every live membership of `user_id`.
    pub fn archive_for_user(&self, user_id: u64) -> QueryResult<Query> {
        self.inner.archive_where(
            ColumnEq::new()
                .with(ARCHIVED_ON, Value::Null)
                .with(BELONGS_TO_USER, user_id),
        )
    }

    pub fn remove_user_from_account(&self, user_id: u64, account_id: u64) -> QueryResult<Query> {
        self.inner.delete_where(
            ColumnEq::new()
                .with(BELONGS_TO_ACCOUNT, account_id)
                .with(BELONGS_TO_USER, user_id),
        )
    }
}
