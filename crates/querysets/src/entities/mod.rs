//! Per-entity query sets.
//!
//! Each query set is a typed layer over [`TableQueries`](crate::builder::TableQueries)
//! obtained from a [`QueryBuilder`] accessor:
//!
//! ```ignore
//! let qb = QueryBuilder::new(Dialect::Sqlite);
//! let query = qb.items().archive(item_id, account_id)?;
//! ```

#[macro_use]
mod macros;

mod accounts;
mod audit_log;
mod clients;
mod items;
mod memberships;
mod plans;
mod users;
mod webhooks;

#[cfg(test)]
mod tests;

pub use accounts::AccountQueries;
pub use audit_log::AuditLogQueries;
pub use clients::{ApiClientQueries, DelegatedClientQueries, OAuth2ClientQueries};
pub use items::ItemQueries;
pub use memberships::{ACCOUNT_ADMIN_ROLE, MembershipQueries};
pub use plans::PlanQueries;
pub use users::{GOOD_REPUTATION, UserQueries};
pub use webhooks::WebhookQueries;

use crate::builder::QueryBuilder;
use crate::tables;

impl QueryBuilder {
    pub fn users(&self) -> UserQueries<'_> {
        UserQueries::new(self.table(&tables::USERS))
    }

    pub fn accounts(&self) -> AccountQueries<'_> {
        AccountQueries::new(self.table(&tables::ACCOUNTS))
    }

    pub fn memberships(&self) -> MembershipQueries<'_> {
        MembershipQueries::new(self.table(&tables::ACCOUNT_USER_MEMBERSHIPS))
    }

    pub fn plans(&self) -> PlanQueries<'_> {
        PlanQueries::new(self.table(&tables::ACCOUNT_SUBSCRIPTION_PLANS))
    }

    pub fn items(&self) -> ItemQueries<'_> {
        ItemQueries::new(self.table(&tables::ITEMS))
    }

    pub fn webhooks(&self) -> WebhookQueries<'_> {
        WebhookQueries::new(self.table(&tables::WEBHOOKS))
    }

    pub fn oauth2_clients(&self) -> OAuth2ClientQueries<'_> {
        OAuth2ClientQueries::new(self.table(&tables::OAUTH2_CLIENTS))
    }

    pub fn delegated_clients(&self) -> DelegatedClientQueries<'_> {
        DelegatedClientQueries::new(self.table(&tables::DELEGATED_CLIENTS))
    }

    pub fn api_clients(&self) -> ApiClientQueries<'_> {
        ApiClientQueries::new(self.table(&tables::API_CLIENTS))
    }

    pub fn audit_log(&self) -> AuditLogQueries<'_> {
        AuditLogQueries::new(self.table(&tables::AUDIT_LOG))
    }
}
