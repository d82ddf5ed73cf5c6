use crate::builder::QueryBuilder;
use crate::dialect::Dialect;
use crate::external_id::FixedExternalId;
use crate::types::{AuditLogEntryCreationInput, Item, ItemCreationInput, User};
use crate::value::Value;
use std::sync::Arc;

const SQLITE_NOW: &str = "(strftime('%s','now'))";

fn sqlite() -> QueryBuilder {
    QueryBuilder::with_external_ids(Dialect::Sqlite, Arc::new(FixedExternalId::new("ext")))
}

fn postgres() -> QueryBuilder {
    QueryBuilder::with_external_ids(Dialect::Postgres, Arc::new(FixedExternalId::new("ext")))
}

#[test]
fn item_create_binds_input_after_external_id() {
    let input = ItemCreationInput {
        name: "name".into(),
        details: "details".into(),
        belongs_to_account: 12,
    };
    let q = sqlite().items().create(&input).unwrap();
    assert_eq!(
        q.sql,
        "INSERT INTO items (external_id, name, details, belongs_to_account) VALUES (?, ?, ?, ?)"
    );
    assert_eq!(
        q.args,
        vec![
            Value::from("ext"),
            Value::from("name"),
            Value::from("details"),
            Value::UInt(12)
        ]
    );
}

#[test]
fn item_update_is_owner_scoped() {
    let item = Item {
        id: 4,
        name: "new".into(),
        details: "d".into(),
        belongs_to_account: 9,
        ..Item::default()
    };
    let q = postgres().items().update(&item).unwrap();
    assert_eq!(
        q.sql,
        "UPDATE items SET name = $1, details = $2, last_updated_on = extract(epoch FROM NOW()) WHERE archived_on IS NULL AND belongs_to_account = $3 AND id = $4"
    );
    assert_eq!(q.args[2..], [Value::UInt(9), Value::UInt(4)]);
}

#[test]
fn user_get_requires_verified_two_factor() {
    let q = sqlite().users().get(3).unwrap();
    assert!(q.sql.ends_with(
        "FROM users WHERE users.archived_on IS NULL AND users.id = ? AND users.two_factor_secret_verified_on IS NOT NULL"
    ));

    let q = sqlite()
        .users()
        .get_with_unverified_two_factor_secret(3)
        .unwrap();
    assert!(q.sql.ends_with(
        "FROM users WHERE users.archived_on IS NULL AND users.id = ? AND users.two_factor_secret_verified_on IS NULL"
    ));
}

#[test]
fn user_search_is_a_prefix_match() {
    let q = sqlite().users().search_by_username("ali").unwrap();
    assert!(q.sql.contains("users.username LIKE ? ESCAPE '\\'"));
    assert_eq!(q.args, vec![Value::from("ali%")]);
}

#[test]
fn user_search_escapes_wildcards() {
    let q = sqlite().users().search_by_username("a_b%c\\").unwrap();
    assert_eq!(q.args, vec![Value::from("a\\_b\\%c\\\\%")]);
    assert_eq!(q.placeholder_count(Dialect::Sqlite), 1);

    let q = postgres().users().search_by_username("x").unwrap();
    assert!(q.sql.contains("users.username LIKE $1 ESCAPE '\\'"));
}

#[test]
fn user_password_update() {
    let q = sqlite().users().update_password(5, "hash").unwrap();
    assert_eq!(
        q.sql,
        format!(
            "UPDATE users SET hashed_password = ?, requires_password_change = ?, password_last_changed_on = {SQLITE_NOW}, last_updated_on = {SQLITE_NOW} WHERE archived_on IS NULL AND id = ?"
        )
    );
    assert_eq!(
        q.args,
        vec![Value::from("hash"), Value::Bool(false), Value::UInt(5)]
    );
}

#[test]
fn user_two_factor_verification() {
    let q = sqlite().users().verify_two_factor_secret(5).unwrap();
    assert_eq!(
        q.sql,
        format!(
            "UPDATE users SET two_factor_secret_verified_on = {SQLITE_NOW}, reputation = ?, last_updated_on = {SQLITE_NOW} WHERE archived_on IS NULL AND id = ? AND two_factor_secret_verified_on IS NULL"
        )
    );
    assert_eq!(q.args, vec![Value::from("good"), Value::UInt(5)]);

    let q = sqlite().users().update_two_factor_secret(5, "s").unwrap();
    assert!(q.sql.starts_with(
        "UPDATE users SET two_factor_secret_verified_on = ?, two_factor_secret = ?,"
    ));
    assert_eq!(q.args[0], Value::Null);
}

#[test]
fn user_update_binds_optional_fields() {
    let user = User {
        id: 2,
        username: "u".into(),
        ..User::default()
    };
    let q = sqlite().users().update(&user).unwrap();
    assert_eq!(q.placeholder_count(Dialect::Sqlite), q.args.len());
    assert_eq!(q.args.last(), Some(&Value::UInt(2)));
}

#[test]
fn user_audit_entries_match_subject_or_actor() {
    let q = postgres().users().audit_log_entries(8).unwrap();
    assert!(q.sql.ends_with(
        "FROM audit_log WHERE (audit_log.context->'user_id' = $1 OR audit_log.context->'performed_by' = $2) ORDER BY audit_log.created_on"
    ));
    assert_eq!(q.args, vec![Value::UInt(8), Value::UInt(8)]);
}

#[test]
fn account_ownership_transfer() {
    let q = sqlite().accounts().transfer_ownership(1, 2, 3).unwrap();
    assert_eq!(
        q.sql,
        format!(
            "UPDATE accounts SET belongs_to_user = ?, last_updated_on = {SQLITE_NOW} WHERE archived_on IS NULL AND belongs_to_user = ? AND id = ?"
        )
    );
    assert_eq!(
        q.args,
        vec![Value::UInt(3), Value::UInt(2), Value::UInt(1)]
    );
}

#[test]
fn membership_default_account_lookup() {
    let q = sqlite()
        .memberships()
        .get_default_account_id_for_user(7)
        .unwrap();
    assert_eq!(
        q.sql,
        "SELECT account_user_memberships.belongs_to_account FROM account_user_memberships WHERE account_user_memberships.archived_on IS NULL AND account_user_memberships.belongs_to_user = ? AND account_user_memberships.default_account = ?"
    );
    assert_eq!(q.args, vec![Value::UInt(7), Value::Bool(true)]);
}

#[test]
fn membership_check_is_an_exists_query() {
    let q = sqlite().memberships().user_is_member(4, 7).unwrap();
    assert_eq!(
        q.sql,
        "SELECT EXISTS ( SELECT account_user_memberships.id FROM account_user_memberships WHERE account_user_memberships.archived_on IS NULL AND account_user_memberships.belongs_to_account = ? AND account_user_memberships.belongs_to_user = ? )"
    );
    assert_eq!(q.args, vec![Value::UInt(4), Value::UInt(7)]);
}

#[test]
fn membership_mark_as_default() {
    let q = sqlite().memberships().mark_as_user_default(7, 4).unwrap();
    assert_eq!(
        q.sql,
        format!(
            "UPDATE account_user_memberships SET default_account = (belongs_to_account = ?), last_updated_on = {SQLITE_NOW} WHERE archived_on IS NULL AND belongs_to_user = ?"
        )
    );
    assert_eq!(q.args, vec![Value::UInt(4), Value::UInt(7)]);

    let q = postgres().memberships().mark_as_user_default(7, 4).unwrap();
    assert!(q.sql.contains("default_account = (belongs_to_account = $1)"));
    assert!(q.sql.ends_with("belongs_to_user = $2"));
}

#[test]
fn membership_new_user_gets_admin_default() {
    let q = sqlite().memberships().create_for_new_user(7, 4).unwrap();
    assert_eq!(
        q.sql,
        "INSERT INTO account_user_memberships (belongs_to_user, belongs_to_account, default_account, account_roles) VALUES (?, ?, ?, ?)"
    );
    assert_eq!(
        q.args,
        vec![
            Value::UInt(7),
            Value::UInt(4),
            Value::Bool(true),
            Value::from("account_admin")
        ]
    );
}

#[test]
fn membership_removal_is_physical() {
    let q = sqlite().memberships().remove_user_from_account(7, 4).unwrap();
    assert_eq!(
        q.sql,
        "DELETE FROM account_user_memberships WHERE belongs_to_account = ? AND belongs_to_user = ?"
    );
    assert_eq!(q.args, vec![Value::UInt(4), Value::UInt(7)]);
}

#[test]
fn membership_archive_for_user() {
    let q = sqlite().memberships().archive_for_user(7).unwrap();
    assert_eq!(
        q.sql,
        format!(
            "UPDATE account_user_memberships SET last_updated_on = {SQLITE_NOW}, archived_on = {SQLITE_NOW} WHERE archived_on IS NULL AND belongs_to_user = ?"
        )
    );
}

#[test]
fn client_lookup_by_client_id_is_unowned() {
    let q = sqlite().oauth2_clients().get_by_client_id("abc").unwrap();
    assert!(q.sql.ends_with(
        "FROM oauth2_clients WHERE oauth2_clients.archived_on IS NULL AND oauth2_clients.client_id = ?"
    ));
    assert_eq!(q.args, vec![Value::from("abc")]);

    let q = postgres().api_clients().get_by_client_id("abc").unwrap();
    assert!(q.sql.ends_with("api_clients.client_id = $1"));
}

#[test]
fn plans_are_not_owner_scoped() {
    let q = sqlite().plans().get(3).unwrap();
    assert!(q.sql.ends_with(
        "FROM account_subscription_plans WHERE account_subscription_plans.archived_on IS NULL AND account_subscription_plans.id = ?"
    ));
    assert_eq!(q.args, vec![Value::UInt(3)]);

    let q = sqlite().plans().archive(3).unwrap();
    assert!(q.sql.ends_with("WHERE archived_on IS NULL AND id = ?"));
}

#[test]
fn audit_log_is_append_only() {
    let q = sqlite().audit_log().get(1).unwrap();
    assert!(q.sql.ends_with("FROM audit_log WHERE audit_log.id = ?"));

    let mut context = serde_json::Map::new();
    context.insert("item_id".into(), serde_json::json!(4));
    let input = AuditLogEntryCreationInput {
        event_type: "item_created".into(),
        context,
    };
    let q = postgres().audit_log().create(&input).unwrap();
    assert_eq!(
        q.sql,
        "INSERT INTO audit_log (external_id, event_type, context) VALUES ($1, $2, $3) RETURNING id"
    );
    assert_eq!(q.args[2], Value::Json(serde_json::json!({"item_id": 4})));
}
