use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::types::AuditLogEntryCreationInput;
use crate::value::Value;

/// Queries over the append-only `audit_log`.
#[derive(Debug, Clone, Copy)]
pub struct AuditLogQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> AuditLogQueries<'a> {
    pub(crate) fn new(inner: TableQueries<'a>) -> Self {
        Self { inner }
    }

    impl_table_verbs!(global: get, get_all_count, get_batch, get_list);

    pub fn create(&self, input: &AuditLogEntryCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &["event_type", "context"],
            vec![
                input.event_type.as_str().into(),
                Value::Json(serde_json::Value::Object(input.context.clone())),
            ],
        )
    }
}
