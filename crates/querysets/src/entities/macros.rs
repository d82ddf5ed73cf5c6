/// Generate the shared verbs of an entity query set by delegating to its
/// `inner: TableQueries` field.
///
/// `owned` verbs take the owning user/account id; `global` verbs don't.
///
/// Usage:
/// ```ignore
/// impl<'a> ItemQueries<'a> {
///     impl_table_verbs!(owned: exists, get, get_list, archive);
/// }
/// ```
macro_rules! impl_table_verbs {
    ($scope:ident: $($verb:ident),+ $(,)?) => {
        $( impl_table_verbs!(@$scope $verb); )+
    };

    (@owned exists) => {
        /// `SELECT EXISTS ( ... )` for a live row owned by `owner_id`.
        pub fn exists(&self, id: u64, owner_id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.exists(id, owner_id)
        }
    };
    (@global exists) => {
        /// `SELECT EXISTS ( ... )` for a live row.
        pub fn exists(&self, id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.exists(id, 0)
        }
    };

    (@owned get) => {
        /// One live row owned by `owner_id`.
        pub fn get(&self, id: u64, owner_id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get(id, owner_id)
        }
    };
    (@global get) => {
        pub fn get(&self, id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get(id, 0)
        }
    };

    (@owned get_list) => {
        /// One page of rows; admins see every owner.
        pub fn get_list(
            &self,
            owner_id: u64,
            for_admin: bool,
            filter: Option<&$crate::filter::QueryFilter>,
        ) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get_list(owner_id, for_admin, filter)
        }
    };
    (@global get_list) => {
        pub fn get_list(
            &self,
            for_admin: bool,
            filter: Option<&$crate::filter::QueryFilter>,
        ) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get_list(0, for_admin, filter)
        }
    };

    (@owned get_with_ids) => {
        /// Rows in `ids` order, capped at `limit`.
        pub fn get_with_ids(
            &self,
            owner_id: u64,
            limit: u8,
            ids: &[u64],
            for_admin: bool,
        ) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get_with_ids(owner_id, limit, ids, for_admin)
        }
    };
    (@global get_with_ids) => {
        pub fn get_with_ids(&self, limit: u8, ids: &[u64]) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get_with_ids(0, limit, ids, true)
        }
    };

    (@owned archive) => {
        /// Soft delete one live row owned by `owner_id`.
        pub fn archive(&self, id: u64, owner_id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.archive(id, owner_id)
        }
    };
    (@global archive) => {
        pub fn archive(&self, id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.archive(id, 0)
        }
    };

    (@$scope:ident get_all_count) => {
        /// Global count of live rows (SQL only, no arguments).
        pub fn get_all_count(&self) -> $crate::error::QueryResult<String> {
            self.inner.get_all_count()
        }
    };

    (@$scope:ident get_batch) => {
        /// Rows with `begin_id < id < end_id`, for background scans.
        pub fn get_batch(&self, begin_id: u64, end_id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.get_batch(begin_id, end_id)
        }
    };

    (@$scope:ident audit_log_entries) => {
        /// Audit log entries referencing row `id`, oldest first.
        pub fn audit_log_entries(&self, id: u64) -> $crate::error::QueryResult<$crate::builder::Query> {
            self.inner.audit_log_entries(id)
        }
    };
}
