//! In-memory user and record store.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use chrono::NaiveDate;
use sleep_model::SleepRecord;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::model::{RecordStore, User, UserId, UserStore};

type TableRows = BTreeMap<(UserId, NaiveDate), SleepRecord>;

/// A store held in memory, used for dry runs and tests.
///
/// Rows are keyed by `(user_id, date)`, so upserting the same pair again
/// replaces the row. Conflict keys passed to [`RecordStore::upsert`] are
/// ignored.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RefCell<Vec<User>>,
    tables: RefCell<BTreeMap<String, TableRows>>,
    next_id: Cell<usize>,
    upsert_calls: Cell<usize>,
    fail_upsert_call: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing user.
    #[must_use]
    pub fn with_user(self, email: &str) -> Self {
        self.insert_user(email);
        self
    }

    /// Make the `call`-th upsert (1-based) fail.
    #[must_use]
    pub fn with_failing_upsert(mut self, call: usize) -> Self {
        self.fail_upsert_call = Some(call);
        self
    }

    /// Users currently held.
    pub fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    /// Rows of `table`, ordered by user and date.
    pub fn rows(&self, table: &str) -> Vec<SleepRecord> {
        self.tables
            .borrow()
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    fn insert_user(&self, email: &str) -> User {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let user = User {
            id: UserId::new(format!("memory-user-{id}")),
            email: Some(email.to_string()),
        };
        self.users.borrow_mut().push(user.clone());
        user
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, email: &str, _password: &str) -> Result<User> {
        if self.users.borrow().iter().any(|user| user.has_email(email)) {
            return Err(StoreError::Conflict {
                email: email.to_string(),
            });
        }
        Ok(self.insert_user(email))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users())
    }

    fn update_user_email(&self, id: &UserId, email: &str) -> Result<User> {
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or_else(|| StoreError::Http {
                status: 404,
                body: format!("user {id} not found"),
            })?;
        user.email = Some(email.to_string());
        Ok(user.clone())
    }
}

impl RecordStore for MemoryStore {
    fn upsert(
        &self,
        table: &str,
        records: &[SleepRecord],
        _conflict_keys: &[&str],
    ) -> Result<usize> {
        let call = self.upsert_calls.get() + 1;
        self.upsert_calls.set(call);
        if self.fail_upsert_call == Some(call) {
            return Err(StoreError::Http {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        let mut keyed = Vec::with_capacity(records.len());
        for record in records {
            let (user_id, date) = record
                .natural_key()
                .ok_or_else(|| StoreError::MissingNaturalKey {
                    uid: record.uid.to_string(),
                })?;
            keyed.push(((UserId::new(user_id), date), record.clone()));
        }

        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(table.to_string()).or_default();
        rows.extend(keyed);
        debug!(table, records = records.len(), rows = rows.len(), "records upserted");
        Ok(records.len())
    }

    fn count_for_user(&self, table: &str, user_id: &UserId) -> Result<usize> {
        Ok(self
            .tables
            .borrow()
            .get(table)
            .map(|rows| rows.keys().filter(|(owner, _)| owner == user_id).count())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(user_id: &str, date: Option<NaiveDate>, rating: &str) -> SleepRecord {
        SleepRecord {
            user_id: user_id.to_string(),
            date,
            date_unix: json!(0),
            uid: json!("u"),
            comments: Value::Null,
            time_got_into_bed: None,
            time_tried_to_sleep: None,
            time_to_fall_asleep_mins: None,
            times_woke_up_count: None,
            total_awake_time_mins: None,
            final_awakening_time: None,
            time_in_bed_after_final_awakening_mins: None,
            time_got_out_of_bed: None,
            sleep_quality_rating: json!(rating),
        }
    }

    #[test]
    fn duplicate_email_conflicts_case_insensitively() {
        let store = MemoryStore::new().with_user("a@example.com");
        let error = store.create_user("A@Example.com", "pw").unwrap_err();
        assert!(error.is_conflict());
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn upsert_overwrites_same_key() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 5);
        store.upsert("t", &[record("u1", date, "Poor")], &["user_id", "date"]).unwrap();
        store.upsert("t", &[record("u1", date, "Good")], &["user_id", "date"]).unwrap();
        store.upsert("t", &[record("u2", date, "Fair")], &["user_id", "date"]).unwrap();

        assert_eq!(store.count_for_user("t", &UserId::new("u1")).unwrap(), 1);
        assert_eq!(store.rows("t")[0].sleep_quality_rating, json!("Good"));
        assert_eq!(store.rows("t").len(), 2);
    }

    #[test]
    fn undated_records_are_rejected() {
        let store = MemoryStore::new();
        let result = store.upsert("t", &[record("u1", None, "Good")], &[]);
        assert!(matches!(result, Err(StoreError::MissingNaturalKey { .. })));
        assert!(store.rows("t").is_empty());
    }

    #[test]
    fn injected_failure_hits_only_that_call() {
        let store = MemoryStore::new().with_failing_upsert(2);
        let date = NaiveDate::from_ymd_opt(2025, 1, 5);
        assert!(store.upsert("t", &[record("u", date, "x")], &[]).is_ok());
        assert!(store.upsert("t", &[record("u", date, "x")], &[]).is_err());
        assert!(store.upsert("t", &[record("u", date, "x")], &[]).is_ok());
    }
}
