//! Local accounts with bcrypt-hashed passwords.
//!
//! Login never reveals whether a username exists: unknown users and wrong
//! passwords produce the same `invalid_credentials` error, differing only in
//! an extra recovery hint.

use std::path::Path;

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, ffi::ErrorCode, params};
use serde::Serialize;
use tracing::{info, warn};

use crate::audit::TIMESTAMP_FORMAT;
use crate::config::{AuthSection, DEFAULT_ADMIN_USERNAME};
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

pub trait CredentialStore {
    fn exists(&self, username: &str) -> ClientResult<bool>;
    fn verify(&self, username: &str, password: &str) -> ClientResult<bool>;
    fn create(&self, username: &str, password: &str) -> ClientResult<()>;
}

pub struct SqliteCredentialStore<'a> {
    connection: &'a Connection,
    db_path: &'a Path,
    hash_cost: u32,
}

impl<'a> SqliteCredentialStore<'a> {
    pub fn new(connection: &'a Connection, db_path: &'a Path, hash_cost: u32) -> Self {
        Self {
            connection,
            db_path,
            hash_cost,
        }
    }

    fn stored_hash(&self, username: &str) -> ClientResult<Option<String>> {
        self.connection
            .query_row(
                "SELECT password_hash FROM users WHERE username = ?1 LIMIT 1",
                [username],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(self.db_path, &error))
    }
}

impl CredentialStore for SqliteCredentialStore<'_> {
    fn exists(&self, username: &str) -> ClientResult<bool> {
        Ok(self.stored_hash(username)?.is_some())
    }

    fn verify(&self, username: &str, password: &str) -> ClientResult<bool> {
        let Some(hash) = self.stored_hash(username)? else {
            return Ok(false);
        };
        match bcrypt::verify(password, &hash) {
            Ok(matches) => Ok(matches),
            Err(error) => {
                warn!(username, %error, "stored password hash is unreadable");
                Ok(false)
            }
        }
    }

    fn create(&self, username: &str, password: &str) -> ClientResult<()> {
        let hash = bcrypt::hash(password, self.hash_cost)
            .map_err(|error| ClientError::internal_credentials(&error.to_string()))?;
        let created_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.connection
            .execute(
                "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
                params![username, hash, created_at],
            )
            .map_err(|error| {
                if error.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
                    ClientError::user_exists(username)
                } else {
                    map_sqlite_error(self.db_path, &error)
                }
            })?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub username: String,
    pub recovery_mode: bool,
}

pub fn create_user(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
    confirmation: &str,
) -> ClientResult<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Username must not be empty.",
            Some("user create"),
        ));
    }
    if password.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Password must not be empty.",
            Some("user create"),
        ));
    }
    if password != confirmation {
        return Err(ClientError::invalid_argument_for_command(
            "Password and confirmation do not match.",
            Some("user create"),
        ));
    }
    if store.exists(username)? {
        return Err(ClientError::user_exists(username));
    }

    store.create(username, password)?;
    info!(username, "created user");
    Ok(username.to_string())
}

pub fn login(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
    auth: &AuthSection,
) -> ClientResult<LoginOutcome> {
    let username = username.trim();
    if !username.is_empty() && store.verify(username, password)? {
        info!(username, "login succeeded");
        return Ok(LoginOutcome {
            username: username.to_string(),
            recovery_mode: false,
        });
    }

    if auth.recovery_mode
        && username == DEFAULT_ADMIN_USERNAME
        && !auth.recovery_password.is_empty()
        && password == auth.recovery_password
    {
        warn!(username, "login accepted through recovery mode");
        return Ok(LoginOutcome {
            username: username.to_string(),
            recovery_mode: true,
        });
    }

    let known = !username.is_empty() && store.exists(username)?;
    Err(ClientError::invalid_credentials(!known))
}

/// Creates the default `admin` account when it is missing. Returns whether a
/// row was written.
pub fn seed_admin(store: &dyn CredentialStore, password: &str) -> ClientResult<bool> {
    if store.exists(DEFAULT_ADMIN_USERNAME)? {
        return Ok(false);
    }
    store.create(DEFAULT_ADMIN_USERNAME, password)?;
    info!("seeded default admin account");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::{CredentialStore, create_user, login, seed_admin};
    use crate::config::AuthSection;
    use crate::{ClientError, ClientResult};

    #[derive(Default)]
    struct MemoryStore {
        users: RefCell<BTreeMap<String, String>>,
    }

    impl CredentialStore for MemoryStore {
        fn exists(&self, username: &str) -> ClientResult<bool> {
            Ok(self.users.borrow().contains_key(username))
        }

        fn verify(&self, username: &str, password: &str) -> ClientResult<bool> {
            Ok(self.users.borrow().get(username).map(String::as_str) == Some(password))
        }

        fn create(&self, username: &str, password: &str) -> ClientResult<()> {
            let mut users = self.users.borrow_mut();
            if users.contains_key(username) {
                return Err(ClientError::user_exists(username));
            }
            users.insert(username.to_string(), password.to_string());
            Ok(())
        }
    }

    fn auth(recovery_mode: bool) -> AuthSection {
        AuthSection {
            recovery_mode,
            ..AuthSection::default()
        }
    }

    #[test]
    fn create_then_login() {
        let store = MemoryStore::default();
        assert_eq!(create_user(&store, " ana ", "pw", "pw").ok(), Some("ana".to_string()));

        let outcome = login(&store, "ana", "pw", &auth(false));
        assert!(outcome.is_ok());
        if let Ok(value) = outcome {
            assert!(!value.recovery_mode);
            assert_eq!(value.username, "ana");
        }
    }

    #[test]
    fn create_rejects_bad_input_and_duplicates() {
        let store = MemoryStore::default();
        let empty_user = create_user(&store, "  ", "pw", "pw");
        assert_eq!(empty_user.err().map(|e| e.code), Some("invalid_argument".to_string()));

        let mismatch = create_user(&store, "ana", "pw", "px");
        assert_eq!(mismatch.err().map(|e| e.code), Some("invalid_argument".to_string()));

        assert!(create_user(&store, "ana", "pw", "pw").is_ok());
        let duplicate = create_user(&store, "ana", "other", "other");
        assert_eq!(duplicate.err().map(|e| e.code), Some("user_exists".to_string()));
    }

    #[test]
    fn unknown_user_and_wrong_password_share_one_outcome() {
        let store = MemoryStore::default();
        assert!(create_user(&store, "ana", "pw", "pw").is_ok());

        let wrong = login(&store, "ana", "nope", &auth(false)).err();
        let unknown = login(&store, "bob", "nope", &auth(false)).err();
        assert!(wrong.is_some());
        assert!(unknown.is_some());
        if let (Some(wrong), Some(unknown)) = (wrong, unknown) {
            assert_eq!(wrong.code, "invalid_credentials");
            assert_eq!(wrong.code, unknown.code);
            assert_eq!(wrong.message, unknown.message);
            assert!(unknown.recovery_steps.len() > wrong.recovery_steps.len());
        }
    }

    #[test]
    fn recovery_password_only_works_when_enabled() {
        let store = MemoryStore::default();
        assert_eq!(seed_admin(&store, "changed").ok(), Some(true));
        assert_eq!(seed_admin(&store, "changed").ok(), Some(false));

        assert!(login(&store, "admin", "1234", &auth(false)).is_err());

        let recovered = login(&store, "admin", "1234", &auth(true));
        assert_eq!(recovered.map(|o| o.recovery_mode).ok(), Some(true));

        let other_user = login(&store, "ana", "1234", &auth(true));
        assert!(other_user.is_err());
    }
}
