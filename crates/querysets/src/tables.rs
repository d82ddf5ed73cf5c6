//! Table and column registry.
//!
//! Every projection is built from these lists so that the column order of a
//! query always matches the row shapes in [`crate::types`].

/// Shared column names.
pub mod columns {
    pub const ID: &str = "id";
    pub const EXTERNAL_ID: &str = "external_id";
    pub const CREATED_ON: &str = "created_on";
    pub const LAST_UPDATED_ON: &str = "last_updated_on";
    pub const ARCHIVED_ON: &str = "archived_on";
    pub const BELONGS_TO_USER: &str = "belongs_to_user";
    pub const BELONGS_TO_ACCOUNT: &str = "belongs_to_account";
    pub const AUDIT_LOG_CONTEXT: &str = "context";
}

use columns::{ARCHIVED_ON, BELONGS_TO_ACCOUNT, BELONGS_TO_USER, CREATED_ON, ID, LAST_UPDATED_ON};

/// Static metadata for one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    /// Table-qualified projection, in row order.
    pub columns: &'static [&'static str],
    /// Column that scopes rows to their owner, `None` for global tables.
    pub owner_column: Option<&'static str>,
    /// Append-only tables have neither `last_updated_on` nor `archived_on`.
    pub append_only: bool,
    /// Key under which audit log contexts reference rows of this table.
    pub audit_key: Option<&'static str>,
}

impl Table {
    /// `table.column`
    pub fn qualify(&self, column: &str) -> String {
        format!("{}.{}", self.name, column)
    }

    pub fn id_column(&self) -> String {
        self.qualify(ID)
    }

    pub fn soft_deletes(&self) -> bool {
        !self.append_only
    }

    pub fn tracks_updates(&self) -> bool {
        !self.append_only
    }

    /// `COUNT(table.id)`
    pub fn count_expr(&self) -> String {
        format!("COUNT({})", self.id_column())
    }

    pub fn created_on(&self) -> String {
        self.qualify(CREATED_ON)
    }

    pub fn last_updated_on(&self) -> String {
        self.qualify(LAST_UPDATED_ON)
    }

    pub fn archived_on(&self) -> String {
        self.qualify(ARCHIVED_ON)
    }
}

pub const USERS: Table = Table {
    name: "users",
    columns: &[
        "users.id",
        "users.external_id",
        "users.username",
        "users.avatar_src",
        "users.hashed_password",
        "users.requires_password_change",
        "users.password_last_changed_on",
        "users.two_factor_secret",
        "users.two_factor_secret_verified_on",
        "users.service_roles",
        "users.reputation",
        "users.reputation_explanation",
        "users.created_on",
        "users.last_updated_on",
        "users.archived_on",
    ],
    owner_column: None,
    append_only: false,
    audit_key: Some("user_id"),
};

pub const ACCOUNTS: Table = Table {
    name: "accounts",
    columns: &[
        "accounts.id",
        "accounts.external_id",
        "accounts.name",
        "accounts.billing_status",
        "accounts.contact_email",
        "accounts.contact_phone",
        "accounts.payment_processor_customer_id",
        "accounts.subscription_plan_id",
        "accounts.created_on",
        "accounts.last_updated_on",
        "accounts.archived_on",
        "accounts.belongs_to_user",
    ],
    owner_column: Some(BELONGS_TO_USER),
    append_only: false,
    audit_key: Some("account_id"),
};

pub const ACCOUNT_USER_MEMBERSHIPS: Table = Table {
    name: "account_user_memberships",
    columns: &[
        "account_user_memberships.id",
        "account_user_memberships.belongs_to_user",
        "account_user_memberships.belongs_to_account",
        "account_user_memberships.account_roles",
        "account_user_memberships.default_account",
        "account_user_memberships.created_on",
        "account_user_memberships.last_updated_on",
        "account_user_memberships.archived_on",
    ],
    owner_column: Some(BELONGS_TO_ACCOUNT),
    append_only: false,
    audit_key: None,
};

pub const ACCOUNT_SUBSCRIPTION_PLANS: Table = Table {
    name: "account_subscription_plans",
    columns: &[
        "account_subscription_plans.id",
        "account_subscription_plans.external_id",
        "account_subscription_plans.name",
        "account_subscription_plans.description",
        "account_subscription_plans.price",
        "account_subscription_plans.period",
        "account_subscription_plans.created_on",
        "account_subscription_plans.last_updated_on",
        "account_subscription_plans.archived_on",
    ],
    owner_column: None,
    append_only: false,
    audit_key: Some("account_subscription_plan_id"),
};

pub const ITEMS: Table = Table {
    name: "items",
    columns: &[
        "items.id",
        "items.external_id",
        "items.name",
        "items.details",
        "items.created_on",
        "items.last_updated_on",
        "items.archived_on",
        "items.belongs_to_account",
    ],
    owner_column: Some(BELONGS_TO_ACCOUNT),
    append_only: false,
    audit_key: Some("item_id"),
};

pub const WEBHOOKS: Table = Table {
    name: "webhooks",
    columns: &[
        "webhooks.id",
        "webhooks.external_id",
        "webhooks.name",
        "webhooks.content_type",
        "webhooks.url",
        "webhooks.method",
        "webhooks.events",
        "webhooks.data_types",
        "webhooks.topics",
        "webhooks.created_on",
        "webhooks.last_updated_on",
        "webhooks.archived_on",
        "webhooks.belongs_to_account",
    ],
    owner_column: Some(BELONGS_TO_ACCOUNT),
    append_only: false,
    audit_key: Some("webhook_id"),
};

pub const OAUTH2_CLIENTS: Table = Table {
    name: "oauth2_clients",
    columns: &[
        "oauth2_clients.id",
        "oauth2_clients.external_id",
        "oauth2_clients.name",
        "oauth2_clients.client_id",
        "oauth2_clients.client_secret",
        "oauth2_clients.redirect_uri",
        "oauth2_clients.scopes",
        "oauth2_clients.implicit_allowed",
        "oauth2_clients.created_on",
        "oauth2_clients.last_updated_on",
        "oauth2_clients.archived_on",
        "oauth2_clients.belongs_to_user",
    ],
    owner_column: Some(BELONGS_TO_USER),
    append_only: false,
    audit_key: Some("oauth2_client_id"),
};

pub const DELEGATED_CLIENTS: Table = Table {
    name: "delegated_clients",
    columns: &[
        "delegated_clients.id",
        "delegated_clients.external_id",
        "delegated_clients.name",
        "delegated_clients.client_id",
        "delegated_clients.client_secret",
        "delegated_clients.created_on",
        "delegated_clients.last_updated_on",
        "delegated_clients.archived_on",
        "delegated_clients.belongs_to_user",
    ],
    owner_column: Some(BELONGS_TO_USER),
    append_only: false,
    audit_key: Some("delegated_client_id"),
};

pub const API_CLIENTS: Table = Table {
    name: "api_clients",
    columns: &[
        "api_clients.id",
        "api_clients.external_id",
        "api_clients.name",
        "api_clients.client_id",
        "api_clients.secret_key",
        "api_clients.permissions",
        "api_clients.admin_permissions",
        "api_clients.created_on",
        "api_clients.last_updated_on",
        "api_clients.archived_on",
        "api_clients.belongs_to_user",
    ],
    owner_column: Some(BELONGS_TO_USER),
    append_only: false,
    audit_key: Some("api_client_id"),
};

pub const AUDIT_LOG: Table = Table {
    name: "audit_log",
    columns: &[
        "audit_log.id",
        "audit_log.external_id",
        "audit_log.event_type",
        "audit_log.context",
        "audit_log.created_on",
    ],
    owner_column: None,
    append_only: true,
    audit_key: None,
};

/// Every registered table.
pub const ALL: [&Table; 10] = [
    &USERS,
    &ACCOUNTS,
    &ACCOUNT_USER_MEMBERSHIPS,
    &ACCOUNT_SUBSCRIPTION_PLANS,
    &ITEMS,
    &WEBHOOKS,
    &OAUTH2_CLIENTS,
    &DELEGATED_CLIENTS,
    &API_CLIENTS,
    &AUDIT_LOG,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_are_qualified_with_their_table() {
        for table in ALL {
            assert_eq!(table.columns[0], table.id_column(), "{}", table.name);
            for col in table.columns {
                assert!(
                    col.starts_with(&format!("{}.", table.name)),
                    "{col} not qualified with {}",
                    table.name
                );
            }
        }
    }

    #[test]
    fn bookkeeping_columns_match_flags() {
        for table in ALL {
            let has = |c: &str| table.columns.contains(&table.qualify(c).as_str());
            assert!(has(CREATED_ON), "{}", table.name);
            assert_eq!(has(ARCHIVED_ON), table.soft_deletes(), "{}", table.name);
            assert_eq!(has(LAST_UPDATED_ON), table.tracks_updates(), "{}", table.name);
            if let Some(owner) = table.owner_column {
                assert!(has(owner), "{}", table.name);
            }
        }
    }
}
