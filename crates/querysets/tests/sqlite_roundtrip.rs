//! Built queries executed against an in-memory SQLite database migrated with
//! the embedded scripts.

#![cfg(all(feature = "sqlite", feature = "migrate"))]

use querysets::types::{
    AccountCreationInput, AccountUserMembershipCreationInput, AuditLogEntryCreationInput, Item,
    ItemCreationInput, UserCreationInput,
};
use querysets::{Dialect, Query, QueryBuilder, QueryFilter, SortBy, migrate};
use rusqlite::Connection;

struct Fixture {
    conn: Connection,
    qb: QueryBuilder,
    user: u64,
    account: u64,
}

impl Fixture {
    fn new() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        for (name, sql) in migrate::scripts(Dialect::Sqlite) {
            conn.execute_batch(sql)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
        }
        let qb = QueryBuilder::new(Dialect::Sqlite);

        let mut fixture = Self {
            conn,
            qb,
            user: 0,
            account: 0,
        };
        fixture.user = fixture.insert(
            &fixture.qb.users().create(&UserCreationInput {
                username: "alice".into(),
                hashed_password: "hash".into(),
                two_factor_secret: "secret".into(),
                service_roles: "service_user".into(),
                reputation: "unverified".into(),
            })
            .unwrap(),
        );
        fixture.account = fixture.new_account("acme");
        fixture
    }

    fn new_account(&self, name: &str) -> u64 {
        let q = self
            .qb
            .accounts()
            .create(&AccountCreationInput {
                name: name.into(),
                belongs_to_user: self.user,
                ..AccountCreationInput::default()
            })
            .unwrap();
        self.insert(&q)
    }

    fn new_item(&self, account: u64, name: &str) -> u64 {
        let q = self
            .qb
            .items()
            .create(&ItemCreationInput {
                name: name.into(),
                details: String::new(),
                belongs_to_account: account,
            })
            .unwrap();
        self.insert(&q)
    }

    fn insert(&self, q: &Query) -> u64 {
        self.execute(q);
        u64::try_from(self.conn.last_insert_rowid()).unwrap()
    }

    fn execute(&self, q: &Query) -> usize {
        self.conn
            .execute(&q.sql, q.sqlite_params())
            .unwrap_or_else(|e| panic!("{}: {e}", q.sql))
    }

    fn scalar(&self, q: &Query) -> i64 {
        self.conn
            .query_row(&q.sql, q.sqlite_params(), |row| row.get(0))
            .unwrap_or_else(|e| panic!("{}: {e}", q.sql))
    }

    fn first_column(&self, q: &Query) -> Vec<u64> {
        let mut stmt = self.conn.prepare(&q.sql).unwrap();
        let ids = stmt
            .query_map(q.sqlite_params(), |row| row.get::<_, i64>(0))
            .unwrap()
            .map(|id| u64::try_from(id.unwrap()).unwrap())
            .collect();
        ids
    }

    fn set_created_on(&self, item: u64, ts: i64) {
        self.conn
            .execute(
                "UPDATE items SET created_on = ?1 WHERE id = ?2",
                rusqlite::params![ts, item as i64],
            )
            .unwrap();
    }
}

#[test]
fn get_with_ids_preserves_order_and_limit() {
    let f = Fixture::new();
    let a = f.new_item(f.account, "a");
    let b = f.new_item(f.account, "b");
    let c = f.new_item(f.account, "c");
    let items = f.qb.items();

    let q = items.get_with_ids(f.account, 2, &[c, a, b], false).unwrap();
    assert_eq!(f.first_column(&q), vec![c, a]);

    let q = items.get_with_ids(f.account, 0, &[b, c, a, b], false).unwrap();
    assert_eq!(f.first_column(&q), vec![b, c, a]);

    f.execute(&items.archive(a, f.account).unwrap());
    let q = items.get_with_ids(f.account, 0, &[c, a, b], false).unwrap();
    assert_eq!(f.first_column(&q), vec![c, b]);
}

#[test]
fn get_with_ids_respects_ownership() {
    let f = Fixture::new();
    let other_account = f.new_account("other");
    let mine = f.new_item(f.account, "mine");
    let theirs = f.new_item(other_account, "theirs");

    let q = f
        .qb
        .items()
        .get_with_ids(f.account, 0, &[theirs, mine], false)
        .unwrap();
    assert_eq!(f.first_column(&q), vec![mine]);

    let q = f
        .qb
        .items()
        .get_with_ids(f.account, 0, &[theirs, mine], true)
        .unwrap();
    assert_eq!(f.first_column(&q), vec![theirs, mine]);
}

#[test]
fn list_reports_filtered_and_total_counts() {
    let f = Fixture::new();
    let a = f.new_item(f.account, "a");
    let b = f.new_item(f.account, "b");
    let c = f.new_item(f.account, "c");
    f.new_item(f.new_account("other"), "elsewhere");
    f.set_created_on(a, 100);
    f.set_created_on(b, 200);
    f.set_created_on(c, 300);

    let filter = QueryFilter::new().created_after(150).sort_by(SortBy::Asc);
    let q = f.qb.items().get_list(f.account, false, Some(&filter)).unwrap();

    let mut stmt = f.conn.prepare(&q.sql).unwrap();
    let rows: Vec<(u64, i64, i64)> = stmt
        .query_map(q.sqlite_params(), |row| {
            Ok((
                row.get::<_, i64>(0)? as u64,
                row.get::<_, i64>(8)?,
                row.get::<_, i64>(9)?,
            ))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(rows, vec![(b, 2, 3), (c, 2, 3)]);

    let page = QueryFilter::new().limit(1).page(2).sort_by(SortBy::Desc);
    let q = f.qb.items().get_list(f.account, false, Some(&page)).unwrap();
    assert_eq!(f.first_column(&q), vec![b]);

    let total = f
        .qb
        .build_total_count_query(&querysets::tables::ITEMS, f.account, false, false)
        .unwrap();
    assert_eq!(f.scalar(&total), 3);
}

#[test]
fn archived_items_disappear_for_owners() {
    let f = Fixture::new();
    let item = f.new_item(f.account, "thing");
    let items = f.qb.items();

    assert_eq!(f.scalar(&items.exists(item, f.account).unwrap()), 1);
    assert_eq!(f.execute(&items.archive(item, f.account).unwrap()), 1);
    assert_eq!(f.scalar(&items.exists(item, f.account).unwrap()), 0);
    assert_eq!(f.execute(&items.archive(item, f.account).unwrap()), 0);

    assert!(f.first_column(&items.get(item, f.account).unwrap()).is_empty());
    assert!(
        f.first_column(&items.get_list(f.account, true, None).unwrap())
            .is_empty()
    );

    let include = QueryFilter::new().include_archived(true);
    let q = items.get_list(f.account, true, Some(&include)).unwrap();
    assert_eq!(f.first_column(&q), vec![item]);
}

#[test]
fn update_touches_last_updated_on() {
    let f = Fixture::new();
    let id = f.new_item(f.account, "before");
    let item = Item {
        id,
        name: "after".into(),
        details: "d".into(),
        belongs_to_account: f.account,
        ..Item::default()
    };
    assert_eq!(f.execute(&f.qb.items().update(&item).unwrap()), 1);

    let (name, updated): (String, Option<i64>) = f
        .conn
        .query_row(
            "SELECT name, last_updated_on FROM items WHERE id = ?1",
            [id as i64],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "after");
    assert!(updated.is_some());

    let foreign = Item {
        belongs_to_account: f.account + 100,
        ..item
    };
    assert_eq!(f.execute(&f.qb.items().update(&foreign).unwrap()), 0);
}

#[test]
fn audit_entries_found_through_json_context() {
    let f = Fixture::new();
    let a = f.new_item(f.account, "a");
    let b = f.new_item(f.account, "b");

    let mut context = serde_json::Map::new();
    context.insert("item_id".into(), serde_json::json!(a));
    context.insert("performed_by".into(), serde_json::json!(f.user));
    let entry = f
        .qb
        .audit_log()
        .create(&AuditLogEntryCreationInput {
            event_type: "item_created".into(),
            context,
        })
        .unwrap();
    let entry_id = f.insert(&entry);

    assert_eq!(
        f.first_column(&f.qb.items().audit_log_entries(a).unwrap()),
        vec![entry_id]
    );
    assert!(
        f.first_column(&f.qb.items().audit_log_entries(b).unwrap())
            .is_empty()
    );
    assert_eq!(
        f.first_column(&f.qb.users().audit_log_entries(f.user).unwrap()),
        vec![entry_id]
    );
}

#[test]
fn users_need_verified_two_factor() {
    let f = Fixture::new();
    let users = f.qb.users();

    assert!(f.first_column(&users.get(f.user).unwrap()).is_empty());
    assert_eq!(
        f.first_column(&users.get_with_unverified_two_factor_secret(f.user).unwrap()),
        vec![f.user]
    );

    assert_eq!(f.execute(&users.verify_two_factor_secret(f.user).unwrap()), 1);
    assert_eq!(f.first_column(&users.get(f.user).unwrap()), vec![f.user]);
    assert_eq!(
        f.first_column(&users.search_by_username("ali").unwrap()),
        vec![f.user]
    );
    assert!(
        f.first_column(&users.search_by_username("a_i").unwrap())
            .is_empty()
    );
    assert!(
        f.first_column(&users.search_by_username("%").unwrap())
            .is_empty()
    );

    let reputation: String = f
        .conn
        .query_row("SELECT reputation FROM users WHERE id = ?1", [f.user as i64], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(reputation, "good");
}

#[test]
fn memberships_track_the_default_account() {
    let f = Fixture::new();
    let second = f.new_account("second");
    let memberships = f.qb.memberships();

    f.insert(&memberships.create_for_new_user(f.user, f.account).unwrap());
    f.insert(
        &memberships
            .add_user_to_account(&AccountUserMembershipCreationInput {
                belongs_to_user: f.user,
                belongs_to_account: second,
                account_roles: vec!["account_member".into()],
            })
            .unwrap(),
    );

    let default_account = memberships.get_default_account_id_for_user(f.user).unwrap();
    assert_eq!(f.first_column(&default_account), vec![f.account]);

    assert_eq!(
        f.execute(&memberships.mark_as_user_default(f.user, second).unwrap()),
        2
    );
    assert_eq!(f.first_column(&default_account), vec![second]);

    assert_eq!(f.scalar(&memberships.user_is_member(second, f.user).unwrap()), 1);
    assert_eq!(
        f.execute(&memberships.remove_user_from_account(f.user, second).unwrap()),
        1
    );
    assert_eq!(f.scalar(&memberships.user_is_member(second, f.user).unwrap()), 0);
}
