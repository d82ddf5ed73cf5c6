//! OAuth2, delegated and API clients. All three are owned by users and can be
//! looked up by their public `client_id`.

use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::qb::ColumnEq;
use crate::types::{
    ApiClient, ApiClientCreationInput, DelegatedClient, DelegatedClientCreationInput,
    OAuth2ClientCreationInput, join_list,
};
use crate::value::Value;

/// Live row with the given `client_id`, any owner.
fn by_client_id(inner: &TableQueries<'_>, client_id: &str) -> QueryResult<Query> {
    let table = inner.table();
    inner.get_where(
        ColumnEq::new()
            .with(table.archived_on(), Value::Null)
            .with(table.qualify("client_id"), client_id),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct OAuth2ClientQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> OAuth2ClientQueries<'a> {
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

    pub fn get_by_client_id(&self, client_id: &str) -> QueryResult<Query> {
        by_client_id(&self.inner, client_id)
    }

    pub fn create(&self, input: &OAuth2ClientCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &[
                "name",
                "client_id",
                "client_secret",
                "redirect_uri",
                "scopes",
                "implicit_allowed",
                "belongs_to_user",
            ],
            vec![
                input.name.as_str().into(),
                input.client_id.as_str().into(),
                input.client_secret.as_str().into(),
                input.redirect_uri.as_str().into(),
                join_list(&input.scopes).into(),
                input.implicit_allowed.into(),
                input.belongs_to_user.into(),
            ],
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DelegatedClientQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> DelegatedClientQueries<'a> {
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

    pub fn get_by_client_id(&self, client_id: &str) -> QueryResult<Query> {
        by_client_id(&self.inner, client_id)
    }

    pub fn create(&self, input: &DelegatedClientCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &["name", "client_id", "client_secret", "belongs_to_user"],
            vec![
                input.name.as_str().into(),
                input.client_id.as_str().into(),
                input.client_secret.as_str().into(),
                input.belongs_to_user.into(),
            ],
        )
    }

    pub fn update(&self, client: &DelegatedClient) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("name", client.name.as_str())
            .set("client_id", client.client_id.as_str())
            .set("client_secret", client.client_secret.as_str());
        self.inner.update(stmt, client.id, client.belongs_to_user)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ApiClientQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> ApiClientQueries<'a> {
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

    pub fn get_by_client_id(&self, client_id: &str) -> QueryResult<Query> {
        by_client_id(&self.inner, client_id)
    }

    pub fn create(&self, input: &ApiClientCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &[
                "name",
                "client_id",
                "secret_key",
                "permissions",
                "admin_permissions",
                "belongs_to_user",
            ],
            vec![
                input.name.as_str().into(),
                input.client_id.as_str().into(),
                input.secret_key.as_str().into(),
                input.permissions.into(),
                input.admin_permissions.into(),
                input.belongs_to_user.into(),
            ],
        )
    }

    pub fn update(&self, client: &ApiClient) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("name", client.name.as_str())
            .set("permissions", client.permissions)
            .set("admin_permissions", client.admin_permissions);
        self.inner.update(stmt, client.id, client.belongs_to_user)
    }
}
