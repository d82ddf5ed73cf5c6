//! Every built query carries exactly one argument per placeholder, for every
//! entity verb in both dialects.

use querysets::types::*;
use querysets::{Dialect, FixedExternalId, Query, QueryBuilder, QueryFilter, QueryResult, SortBy};
use std::sync::Arc;

fn builder(dialect: Dialect) -> QueryBuilder {
    QueryBuilder::with_external_ids(dialect, Arc::new(FixedExternalId::new("ext")))
}

fn filters() -> Vec<Option<QueryFilter>> {
    vec![
        None,
        Some(QueryFilter::new()),
        Some(
            QueryFilter::new()
                .page(3)
                .limit(20)
                .created_after(1)
                .created_before(2)
                .updated_after(3)
                .updated_before(4)
                .sort_by(SortBy::Desc)
                .include_archived(true),
        ),
    ]
}

fn check(dialect: Dialect, label: &str, result: QueryResult<Query>) {
    let query = result.unwrap_or_else(|e| panic!("{dialect} {label}: {e}"));
    assert!(!query.sql.is_empty(), "{dialect} {label}: empty sql");
    assert_eq!(
        query.placeholder_count(dialect),
        query.args.len(),
        "{dialect} {label}: {}",
        query.sql
    );
}

#[test]
fn list_and_count_queries() {
    for dialect in Dialect::ALL {
        let qb = builder(dialect);
        for table in querysets::tables::ALL {
            for filter in filters() {
                for for_admin in [false, true] {
                    let label = format!("{} admin={for_admin} filter={filter:?}", table.name);
                    check(
                        dialect,
                        &label,
                        qb.build_list_query(table, table.columns, 7, for_admin, filter.as_ref()),
                    );
                    check(
                        dialect,
                        &label,
                        qb.build_filtered_count_query(table, 7, for_admin, true, filter.as_ref()),
                    );
                }
            }
            check(dialect, table.name, qb.build_total_count_query(table, 7, false, false));
        }
    }
}

#[test]
fn generic_verbs() {
    for dialect in Dialect::ALL {
        let qb = builder(dialect);
        for table in querysets::tables::ALL {
            let t = qb.table(table);
            check(dialect, table.name, t.exists(1, 2));
            check(dialect, table.name, t.get(1, 2));
            check(dialect, table.name, t.get_batch(1, 100));
            check(dialect, table.name, t.get_with_ids(2, 5, &[5, 3, 9], false));
            check(dialect, table.name, t.get_with_ids(2, 0, &[5], true));
            if table.soft_deletes() {
                check(dialect, table.name, t.archive(1, 2));
            }
            if table.audit_key.is_some() {
                check(dialect, table.name, t.audit_log_entries(1));
            }
            assert!(!t.get_all_count().unwrap().is_empty());
        }
    }
}

#[test]
fn user_verbs() {
    for dialect in Dialect::ALL {
        let users = builder(dialect);
        let users = users.users();
        let user = User {
            id: 1,
            username: "u".into(),
            avatar_src: Some("a.png".into()),
            two_factor_secret_verified_on: Some(10),
            ..User::default()
        };
        check(dialect, "users.get", users.get(1));
        check(dialect, "users.unverified", users.get_with_unverified_two_factor_secret(1));
        check(dialect, "users.by_username", users.get_by_username("u"));
        check(dialect, "users.search", users.search_by_username("u"));
        check(dialect, "users.create", users.create(&UserCreationInput::default()));
        check(dialect, "users.update", users.update(&user));
        check(dialect, "users.password", users.update_password(1, "h"));
        check(dialect, "users.2fa", users.update_two_factor_secret(1, "s"));
        check(dialect, "users.verify", users.verify_two_factor_secret(1));
        check(dialect, "users.reputation", users.set_reputation(1, "banned", "spam"));
        check(dialect, "users.archive", users.archive(1));
        check(dialect, "users.audit", users.audit_log_entries(1));
        check(dialect, "users.list", users.get_list(true, None));
    }
}

#[test]
fn account_and_membership_verbs() {
    for dialect in Dialect::ALL {
        let qb = builder(dialect);
        let accounts = qb.accounts();
        check(dialect, "accounts.create", accounts.create(&AccountCreationInput::default()));
        check(dialect, "accounts.update", accounts.update(&Account::default()));
        check(dialect, "accounts.transfer", accounts.transfer_ownership(1, 2, 3));
        check(dialect, "accounts.list", accounts.get_list(2, false, None));

        let memberships = qb.memberships();
        let input = AccountUserMembershipCreationInput {
            belongs_to_user: 1,
            belongs_to_account: 2,
            account_roles: vec!["account_member".into()],
        };
        check(dialect, "m.default", memberships.get_default_account_id_for_user(1));
        check(dialect, "m.for_user", memberships.get_for_user(1));
        check(dialect, "m.is_member", memberships.user_is_member(2, 1));
        check(dialect, "m.add", memberships.add_user_to_account(&input));
        check(dialect, "m.new_user", memberships.create_for_new_user(1, 2));
        check(dialect, "m.mark_default", memberships.mark_as_user_default(1, 2));
        check(dialect, "m.permissions", memberships.modify_permissions(1, 2, &["a".into()]));
        check(dialect, "m.transfer", memberships.transfer_memberships(1, 3, 2));
        check(dialect, "m.archive", memberships.archive_for_user(1));
        check(dialect, "m.remove", memberships.remove_user_from_account(1, 2));
        check(dialect, "m.list", memberships.get_list(2, false, None));
    }
}

#[test]
fn remaining_entity_verbs() {
    for dialect in Dialect::ALL {
        let qb = builder(dialect);

        check(dialect, "items.create", qb.items().create(&ItemCreationInput::default()));
        check(dialect, "items.update", qb.items().update(&Item::default()));

        let webhook = WebhookCreationInput {
            events: vec!["created".into(), "updated".into()],
            ..WebhookCreationInput::default()
        };
        check(dialect, "webhooks.create", qb.webhooks().create(&webhook));
        check(dialect, "webhooks.update", qb.webhooks().update(&Webhook::default()));

        check(dialect, "plans.create", qb.plans().create(&AccountSubscriptionPlanCreationInput::default()));
        check(dialect, "plans.update", qb.plans().update(&AccountSubscriptionPlan::default()));
        check(dialect, "plans.ids", qb.plans().get_with_ids(10, &[3, 1]));

        check(dialect, "oauth2.by_client", qb.oauth2_clients().get_by_client_id("c"));
        check(dialect, "oauth2.create", qb.oauth2_clients().create(&OAuth2ClientCreationInput::default()));
        check(dialect, "delegated.by_client", qb.delegated_clients().get_by_client_id("c"));
        check(dialect, "delegated.create", qb.delegated_clients().create(&DelegatedClientCreationInput::default()));
        check(dialect, "delegated.update", qb.delegated_clients().update(&DelegatedClient::default()));
        check(dialect, "api.by_client", qb.api_clients().get_by_client_id("c"));
        check(dialect, "api.create", qb.api_clients().create(&ApiClientCreationInput::default()));
        check(dialect, "api.update", qb.api_clients().update(&ApiClient::default()));

        check(dialect, "audit.get", qb.audit_log().get(1));
        check(dialect, "audit.create", qb.audit_log().create(&AuditLogEntryCreationInput::default()));
        check(dialect, "audit.list", qb.audit_log().get_list(true, None));
    }
}
