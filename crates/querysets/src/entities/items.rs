use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::types::{Item, ItemCreationInput};

/// Queries over `items`, owned by accounts.
#[derive(Debug, Clone, Copy)]
pub struct ItemQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> ItemQueries<'a> {
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

    pub fn create(&self, input: &ItemCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &["name", "details", "belongs_to_account"],
            vec![
                input.name.as_str().into(),
                input.details.as_str().into(),
                input.belongs_to_account.into(),
            ],
        )
    }

    pub fn update(&self, item: &Item) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("name", item.name.as_str())
            .set("details", item.details.as_str());
        self.inner.update(stmt, item.id, item.belongs_to_account)
    }
}
