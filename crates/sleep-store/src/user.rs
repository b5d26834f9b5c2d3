//! User provisioning on top of a [`UserStore`].

use rand::Rng;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::model::{User, UserStore};

/// Email the import targets when none is given.
pub const DEFAULT_USER_EMAIL: &str = "test@sleeptracker.local";

/// Length of generated passwords.
pub const PASSWORD_LENGTH: usize = 16;

const PASSWORD_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Random password drawn from letters, digits and `!@#$%^&*`.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())]))
        .collect()
}

/// A user that is guaranteed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredUser {
    pub user: User,
    /// Password of a newly created account; `None` when an existing account
    /// was reused and its password left unchanged.
    pub password: Option<String>,
}

impl EnsuredUser {
    pub fn created(&self) -> bool {
        self.password.is_some()
    }
}

/// Look a user up by email, ignoring ASCII case.
pub fn find_user_by_email<S: UserStore + ?Sized>(store: &S, email: &str) -> Result<Option<User>> {
    Ok(store
        .list_users()?
        .into_iter()
        .find(|user| user.has_email(email)))
}

/// Create the user, or reuse the existing account with that email.
///
/// A random password is generated when `password` is `None`.
pub fn ensure_user<S: UserStore + ?Sized>(
    store: &S,
    email: &str,
    password: Option<&str>,
) -> Result<EnsuredUser> {
    let password = password.map_or_else(|| generate_password(PASSWORD_LENGTH), str::to_string);

    match store.create_user(email, &password) {
        Ok(user) => Ok(EnsuredUser {
            user,
            password: Some(password),
        }),
        Err(error) if error.is_conflict() => {
            info!("user already exists, looking it up");
            let user = find_user_by_email(store, email)?.ok_or_else(|| {
                warn!("existing user not found in listing");
                StoreError::UserNotFound {
                    email: email.to_string(),
                }
            })?;
            Ok(EnsuredUser {
                user,
                password: None,
            })
        }
        Err(error) => Err(error),
    }
}

/// Move the account registered under `old_email` to `new_email`.
pub fn change_user_email<S: UserStore + ?Sized>(
    store: &S,
    old_email: &str,
    new_email: &str,
) -> Result<User> {
    let user = find_user_by_email(store, old_email)?.ok_or_else(|| StoreError::UserNotFound {
        email: old_email.to_string(),
    })?;
    store.update_user_email(&user.id, new_email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn passwords_use_the_alphabet() {
        let password = generate_password(PASSWORD_LENGTH);
        assert_eq!(password.len(), PASSWORD_LENGTH);
        assert!(password.bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));
        assert_ne!(password, generate_password(PASSWORD_LENGTH));
    }

    #[test]
    fn new_user_gets_a_password() {
        let store = MemoryStore::new();
        let ensured = ensure_user(&store, "new@example.com", None).unwrap();
        assert!(ensured.created());
        assert_eq!(ensured.password.as_ref().map(String::len), Some(PASSWORD_LENGTH));
    }

    #[test]
    fn explicit_password_is_used() {
        let store = MemoryStore::new();
        let ensured = ensure_user(&store, "new@example.com", Some("hunter2")).unwrap();
        assert_eq!(ensured.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn existing_user_is_reused() {
        let store = MemoryStore::new().with_user("test@sleeptracker.local");
        let existing = store.users()[0].clone();

        let ensured = ensure_user(&store, "TEST@sleeptracker.local", None).unwrap();

        assert!(!ensured.created());
        assert_eq!(ensured.user, existing);
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn email_change_requires_the_old_account() {
        let store = MemoryStore::new().with_user(DEFAULT_USER_EMAIL);

        let updated = change_user_email(&store, DEFAULT_USER_EMAIL, "me@example.com").unwrap();
        assert!(updated.has_email("me@example.com"));

        let missing = change_user_email(&store, DEFAULT_USER_EMAIL, "x@example.com");
        assert!(matches!(missing, Err(StoreError::UserNotFound { .. })));
    }
}
