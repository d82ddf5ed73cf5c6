//! Entity row shapes and creation inputs.
//!
//! Timestamps are unix seconds. `archived_on == None` means the row is live.

use serde::{Deserialize, Serialize};

/// One page of a list query, as decoded by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub filtered_count: u64,
    pub total_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub external_id: String,
    pub username: String,
    pub avatar_src: Option<String>,
    pub hashed_password: String,
    pub requires_password_change: bool,
    pub password_last_changed_on: Option<u64>,
    pub two_factor_secret: String,
    pub two_factor_secret_verified_on: Option<u64>,
    pub service_roles: String,
    pub reputation: String,
    pub reputation_explanation: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCreationInput {
    pub username: String,
    pub hashed_password: String,
    pub two_factor_secret: String,
    pub service_roles: String,
    pub reputation: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub billing_status: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment_processor_customer_id: String,
    pub subscription_plan_id: Option<u64>,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountCreationInput {
    pub name: String,
    pub billing_status: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUserMembership {
    pub id: u64,
    pub belongs_to_user: u64,
    pub belongs_to_account: u64,
    pub account_roles: String,
    pub default_account: bool,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUserMembershipCreationInput {
    pub belongs_to_user: u64,
    pub belongs_to_account: u64,
    pub account_roles: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSubscriptionPlan {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub description: String,
    /// Price in cents.
    pub price: u32,
    /// Billing period, e.g. `720h0m0s`.
    pub period: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSubscriptionPlanCreationInput {
    pub name: String,
    pub description: String,
    pub price: u32,
    pub period: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub details: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_account: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCreationInput {
    pub name: String,
    pub details: String,
    pub belongs_to_account: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub method: String,
    pub events: Vec<String>,
    pub data_types: Vec<String>,
    pub topics: Vec<String>,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_account: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookCreationInput {
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub method: String,
    pub events: Vec<String>,
    pub data_types: Vec<String>,
    pub topics: Vec<String>,
    pub belongs_to_account: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Client {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub implicit_allowed: bool,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuth2ClientCreationInput {
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub implicit_allowed: bool,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DelegatedClient {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DelegatedClientCreationInput {
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiClient {
    pub id: u64,
    pub external_id: String,
    pub name: String,
    pub client_id: String,
    pub secret_key: String,
    pub permissions: i64,
    pub admin_permissions: i64,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiClientCreationInput {
    pub name: String,
    pub client_id: String,
    pub secret_key: String,
    pub permissions: i64,
    pub admin_permissions: i64,
    pub belongs_to_user: u64,
}

/// Append-only record of a state change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    pub external_id: String,
    pub event_type: String,
    /// Free-form JSON object; referenced rows appear under keys like `item_id`.
    pub context: serde_json::Map<String, serde_json::Value>,
    pub created_on: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntryCreationInput {
    pub event_type: String,
    pub context: serde_json::Map<String, serde_json::Value>,
}

/// Joins a list column (roles, scopes, events) into its stored form.
pub(crate) fn join_list(values: &[String]) -> String {
    values.join(",")
}
