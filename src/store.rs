//! Event store the summary calculators and the proximity ranker draw from.
//! Protein logs are written and deleted through it too, so handlers never
//! touch the pool for event data.

use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::{
    protein_logs::repo::{self as logs, LogStats, ProteinLog},
    stores::{
        proximity::BoundingBox,
        repo::{self as stores, Store},
    },
    users::repo::{self as users, ProfileChanges, User},
};

#[async_trait]
pub trait ProteinStore: Send + Sync {
    async fn insert_event(
        &self,
        user_id: Uuid,
        food_name: &str,
        protein_amount: f64,
    ) -> anyhow::Result<ProteinLog>;

    /// Returns false when no log with this id belongs to the user.
    async fn delete_event(&self, user_id: Uuid, log_id: Uuid) -> anyhow::Result<bool>;

    /// Newest first, optionally restricted to one UTC calendar day.
    async fn list_events(
        &self,
        user_id: Uuid,
        on: Option<Date>,
        limit: i64,
    ) -> anyhow::Result<Vec<ProteinLog>>;

    /// Logs of one user on one UTC calendar day.
    async fn fetch_events_on(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<ProteinLog>>;

    /// Logs of one user between two UTC calendar days, both inclusive.
    async fn fetch_events_between(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> anyhow::Result<Vec<ProteinLog>>;

    /// Lifetime log count plus totals for days on or after `since`.
    async fn log_stats_since(&self, user_id: Uuid, since: Date) -> anyhow::Result<LogStats>;

    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<User>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        changes: &ProfileChanges<'_>,
    ) -> anyhow::Result<User>;

    /// Stores with both coordinates set, inside `bounds` when given.
    async fn fetch_store_catalog(&self, bounds: Option<BoundingBox>) -> anyhow::Result<Vec<Store>>;
}

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProteinStore for PgStore {
    async fn insert_event(
        &self,
        user_id: Uuid,
        food_name: &str,
        protein_amount: f64,
    ) -> anyhow::Result<ProteinLog> {
        logs::insert(&self.db, user_id, food_name, protein_amount).await
    }

    async fn delete_event(&self, user_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        logs::delete(&self.db, user_id, log_id).await
    }

    async fn list_events(
        &self,
        user_id: Uuid,
        on: Option<Date>,
        limit: i64,
    ) -> anyhow::Result<Vec<ProteinLog>> {
        logs::list_by_user(&self.db, user_id, on, limit).await
    }

    async fn fetch_events_on(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<ProteinLog>> {
        logs::list_between(&self.db, user_id, date, date).await
    }

    async fn fetch_events_between(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> anyhow::Result<Vec<ProteinLog>> {
        logs::list_between(&self.db, user_id, start, end).await
    }

    async fn log_stats_since(&self, user_id: Uuid, since: Date) -> anyhow::Result<LogStats> {
        logs::stats_since(&self.db, user_id, since).await
    }

    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<User> {
        users::find_or_provision(&self.db, user_id).await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        changes: &ProfileChanges<'_>,
    ) -> anyhow::Result<User> {
        users::update(&self.db, user_id, changes).await
    }

    async fn fetch_store_catalog(&self, bounds: Option<BoundingBox>) -> anyhow::Result<Vec<Store>> {
        stores::catalog(&self.db, bounds).await
    }
}

#[cfg(test)]
pub use memory::InMemoryStore;

#[cfg(test)]
mod memory {
    use super::*;
    use crate::{dates::utc_day, users::repo::DEFAULT_PROTEIN_GOAL};
    use std::collections::BTreeSet;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    /// Behaves like `PgStore` over a vector of rows, for handler tests.
    #[derive(Default)]
    pub struct InMemoryStore {
        profiles: Mutex<Vec<User>>,
        logs: Mutex<Vec<ProteinLog>>,
        stores: Vec<Store>,
    }

    impl InMemoryStore {
        pub fn profile(user_id: Uuid, protein_goal: i32) -> User {
            User {
                id: user_id,
                full_name: None,
                location: None,
                protein_goal,
                is_active: true,
                created_at: OffsetDateTime::UNIX_EPOCH,
                updated_at: None,
            }
        }

        pub fn with_profile(self, user: User) -> Self {
            self.profiles.lock().unwrap().push(user);
            self
        }

        pub fn with_log(self, log: ProteinLog) -> Self {
            self.logs.lock().unwrap().push(log);
            self
        }

        pub fn with_store(mut self, store: Store) -> Self {
            self.stores.push(store);
            self
        }

        fn logs_of(&self, user_id: Uuid) -> Vec<ProteinLog> {
            self.logs
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl ProteinStore for InMemoryStore {
        async fn insert_event(
            &self,
            user_id: Uuid,
            food_name: &str,
            protein_amount: f64,
        ) -> anyhow::Result<ProteinLog> {
            let log = ProteinLog {
                id: Uuid::new_v4(),
                user_id,
                food_name: food_name.to_string(),
                protein_amount,
                logged_at: OffsetDateTime::now_utc(),
            };
            self.logs.lock().unwrap().push(log.clone());
            Ok(log)
        }

        async fn delete_event(&self, user_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
            let mut logs = self.logs.lock().unwrap();
            let before = logs.len();
            logs.retain(|l| !(l.id == log_id && l.user_id == user_id));
            Ok(logs.len() < before)
        }

        async fn list_events(
            &self,
            user_id: Uuid,
            on: Option<Date>,
            limit: i64,
        ) -> anyhow::Result<Vec<ProteinLog>> {
            let mut rows: Vec<ProteinLog> = self
                .logs_of(user_id)
                .into_iter()
                .filter(|l| on.map_or(true, |day| utc_day(l.logged_at) == day))
                .collect();
            rows.sort_by_key(|l| std::cmp::Reverse(l.logged_at));
            rows.truncate(usize::try_from(limit).unwrap_or(0));
            Ok(rows)
        }

        async fn fetch_events_on(
            &self,
            user_id: Uuid,
            date: Date,
        ) -> anyhow::Result<Vec<ProteinLog>> {
            self.fetch_events_between(user_id, date, date).await
        }

        async fn fetch_events_between(
            &self,
            user_id: Uuid,
            start: Date,
            end: Date,
        ) -> anyhow::Result<Vec<ProteinLog>> {
            let mut rows: Vec<ProteinLog> = self
                .logs_of(user_id)
                .into_iter()
                .filter(|l| (start..=end).contains(&utc_day(l.logged_at)))
                .collect();
            rows.sort_by_key(|l| l.logged_at);
            Ok(rows)
        }

        async fn log_stats_since(&self, user_id: Uuid, since: Date) -> anyhow::Result<LogStats> {
            let all = self.logs_of(user_id);
            let recent: Vec<&ProteinLog> =
                all.iter().filter(|l| utc_day(l.logged_at) >= since).collect();
            let days: BTreeSet<Date> = recent.iter().map(|l| utc_day(l.logged_at)).collect();
            Ok(LogStats {
                total_logs: all.len() as i64,
                weekly_protein: recent.iter().map(|l| l.protein_amount).sum(),
                days_logged: days.len() as i64,
            })
        }

        async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<User> {
            let mut profiles = self.profiles.lock().unwrap();
            if let Some(user) = profiles.iter().find(|u| u.id == user_id) {
                return Ok(user.clone());
            }
            let user = Self::profile(user_id, DEFAULT_PROTEIN_GOAL);
            profiles.push(user.clone());
            Ok(user)
        }

        async fn update_profile(
            &self,
            user_id: Uuid,
            changes: &ProfileChanges<'_>,
        ) -> anyhow::Result<User> {
            let mut profiles = self.profiles.lock().unwrap();
            let user = profiles
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| anyhow::anyhow!("no profile for {user_id}"))?;
            if let Some(name) = changes.full_name {
                user.full_name = Some(name.to_string());
            }
            if let Some(location) = changes.location {
                user.location = Some(location.to_string());
            }
            if let Some(goal) = changes.protein_goal {
                user.protein_goal = goal;
            }
            user.updated_at = Some(OffsetDateTime::now_utc());
            Ok(user.clone())
        }

        async fn fetch_store_catalog(
            &self,
            bounds: Option<BoundingBox>,
        ) -> anyhow::Result<Vec<Store>> {
            Ok(self
                .stores
                .iter()
                .filter(|s| match (s.coordinate(), bounds) {
                    (Some(point), Some(b)) => b.contains(point),
                    (Some(_), None) => true,
                    (None, _) => false,
                })
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn catalog_honours_bounding_box() {
        use crate::stores::proximity::Coordinate;

        let store = |name: &str, lat: Option<f64>| Store {
            id: Uuid::new_v4(),
            name: name.into(),
            address: None,
            latitude: lat,
            longitude: Some(-122.0),
        };
        let memory = InMemoryStore::default()
            .with_store(store("inside", Some(37.0)))
            .with_store(store("outside", Some(39.0)))
            .with_store(store("unknown", None));
        let bounds = BoundingBox::around(
            Coordinate {
                latitude: 37.0,
                longitude: -122.0,
            },
            5.0,
        );

        let all = memory.fetch_store_catalog(None).await.unwrap();
        assert_eq!(all.len(), 2);
        let boxed = memory.fetch_store_catalog(Some(bounds)).await.unwrap();
        assert_eq!(boxed.len(), 1);
        assert_eq!(boxed[0].name, "inside");
    }

    #[tokio::test]
    async fn delete_only_touches_the_owners_log() {
        let owner = Uuid::new_v4();
        let memory = InMemoryStore::default();
        let log = memory.insert_event(owner, "Tofu", 17.3).await.unwrap();

        assert!(!memory.delete_event(Uuid::new_v4(), log.id).await.unwrap());
        assert!(memory.delete_event(owner, log.id).await.unwrap());
        assert!(!memory.delete_event(owner, log.id).await.unwrap());
    }
}
