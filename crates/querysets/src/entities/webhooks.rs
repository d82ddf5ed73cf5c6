use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::types::{Webhook, WebhookCreationInput, join_list};

/// Queries over `webhooks`, owned by accounts.
///
/// `events`, `data_types` and `topics` are stored comma-joined.
#[derive(Debug, Clone, Copy)]
pub struct WebhookQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> WebhookQueries<'a> {
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

    pub fn create(&self, input: &WebhookCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &[
                "name",
                "content_type",
                "url",
                "method",
                "events",
                "data_types",
                "topics",
                "belongs_to_account",
            ],
            vec![
                input.name.as_str().into(),
                input.content_type.as_str().into(),
                input.url.as_str().into(),
                input.method.as_str().into(),
                join_list(&input.events).into(),
                join_list(&input.data_types).into(),
                join_list(&input.topics).into(),
                input.belongs_to_account.into(),
            ],
        )
    }

    pub fn update(&self, webhook: &Webhook) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("name", webhook.name.as_str())
            .set("content_type", webhook.content_type.as_str())
            .set("url", webhook.url.as_str())
            .set("method", webhook.method.as_str())
            .set("events", join_list(&webhook.events))
            .set("data_types", join_list(&webhook.data_types))
            .set("topics", join_list(&webhook.topics));
        self.inner
            .update(stmt, webhook.id, webhook.belongs_to_account)
    }
}
