use crate::builder::{Query, TableQueries};
use crate::error::QueryResult;
use crate::types::{AccountSubscriptionPlan, AccountSubscriptionPlanCreationInput};

/// Queries over `account_subscription_plans`. Plans are global.
#[derive(Debug, Clone, Copy)]
pub struct PlanQueries<'a> {
    inner: TableQueries<'a>,
}

impl<'a> PlanQueries<'a> {
    pub(crate) fn new(inner: TableQueries<'a>) -> Self {
        Self { inner }
    }

    impl_table_verbs!(global:
        exists,
        get,
        get_all_count,
        get_batch,
        get_list,
        get_with_ids,
        archive,
        audit_log_entries,
    );

    pub fn create(&self, input: &AccountSubscriptionPlanCreationInput) -> QueryResult<Query> {
        self.inner.create(
            &["name", "description", "price", "period"],
            vec![
                input.name.as_str().into(),
                input.description.as_str().into(),
                input.price.into(),
                input.period.as_str().into(),
            ],
        )
    }

    pub fn update(&self, plan: &AccountSubscriptionPlan) -> QueryResult<Query> {
        let stmt = self
            .inner
            .update_stmt()
            .set("name", plan.name.as_str())
            .set("description", plan.description.as_str())
            .set("price", plan.price)
            .set("period", plan.period.as_str());
        self.inner.update(stmt, plan.id, 0)
    }
}
