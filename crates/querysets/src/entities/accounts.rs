use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::tables::columns::BELONGS_TO_USER;
use crate::types::{Account, AccountCreationInput};

/// Queries over `accounts`, owned by users.
#[derive(Debug, Clone, Copy)]
pub struct AccountQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> AccountQueries<'a> {
    pub(crate) fn new(inner: TableQueries<'a>) -> Self {
        Self { inner }
    }

    impl_table_verbs!(owned:
        exists,
        get,
        get_all_count,
        get_batch,
        get_list,
        get_with_ids,
        archive,
        audit_log_entries,
    );

    pub fn create(&self, input: &AccountCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &[
                "name",
                "billing_status",
                "contact_email",
                "contact_phone",
                "belongs_to_user",
            ],
            vec![
                input.name.as_str().into(),
                input.billing_status.as_str().into(),
                input.contact_email.as_str().into(),
                input.contact_phone.as_str().into(),
                input.belongs_to_user.into(),
            ],
        )
    }

    pub fn update(&self, account: &Account) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("name", account.name.as_str())
            .set("contact_email", account.contact_email.as_str())
            .set("contact_phone", account.contact_phone.as_str());
        self.inner.update(stmt, account.id, account.belongs_to_user)
    }

    /// Hand a live account from `current_owner` to `new_owner`.
    pub fn transfer_ownership(
        &self,
        account_id: u64,
        current_owner: u64,
        new_owner: u64,
    ) -> QueryResult<Query> {
        let stmt = self.inner.update_stmt().set(BELONGS_TO_USER, new_owner);
        self.inner.update(stmt, account_id, current_owner)
    }
}
