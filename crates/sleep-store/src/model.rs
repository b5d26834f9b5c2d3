//! Store-side user types and collaborator traits.

use std::fmt;

use serde::{Deserialize, Serialize};
use sleep_model::SleepRecord;

use crate::error::Result;

/// Identity assigned to a user by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Absent for accounts created without an email (e.g. phone sign-up).
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Whether the account's email matches `email`, ignoring ASCII case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(email))
    }
}

/// Account administration.
pub trait UserStore {
    /// Create a confirmed user. An existing email yields
    /// [`StoreError::Conflict`](crate::StoreError::Conflict).
    fn create_user(&self, email: &str, password: &str) -> Result<User>;

    /// Every user account.
    fn list_users(&self) -> Result<Vec<User>>;

    /// Replace a user's email, marking it confirmed.
    fn update_user_email(&self, id: &UserId, email: &str) -> Result<User>;
}

/// Storage of typed diary records.
pub trait RecordStore {
    /// Insert `records` into `table`, overwriting rows that share the
    /// `conflict_keys` columns. Returns the number of records written.
    fn upsert(&self, table: &str, records: &[SleepRecord], conflict_keys: &[&str])
    -> Result<usize>;

    /// Number of rows in `table` belonging to `user_id`.
    fn count_for_user(&self, table: &str, user_id: &UserId) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_decodes_from_auth_payload() {
        let user: User = serde_json::from_value(json!({
            "id": "9b1c",
            "aud": "authenticated",
            "email": "Sleeper@Example.com",
            "email_confirmed_at": "2025-01-01T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(user.id, UserId::new("9b1c"));
        assert!(user.has_email("sleeper@example.com"));
        assert!(!user.has_email("other@example.com"));
    }

    #[test]
    fn user_without_email_matches_nothing() {
        let user: User = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(!user.has_email(""));
    }
}
