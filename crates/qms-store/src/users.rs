//! Management accounts with Argon2 password hashes.

use std::path::PathBuf;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use qms_model::{NewUser, RecordId, RecordKind, User, UserRole, UserStatus};
use rand_core::OsRng;

use crate::error::{AuthError, Result, StoreError};
use crate::journal::Journal;

/// Username given to the account created by [`UserRegistry::ensure_bootstrap_admin`].
pub const BOOTSTRAP_USERNAME: &str = "admin";

/// Registered users, persisted as a journal.
///
/// Unlike the form collections, users can be disabled, re-enabled and deleted.
#[derive(Debug, Clone)]
pub struct UserRegistry {
    journal: Journal<User>,
}

impl UserRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            journal: Journal::open(path)?,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            journal: Journal::in_memory(),
        }
    }

    pub fn list(&self) -> &[User] {
        self.journal.records()
    }

    pub fn get(&self, id: &RecordId) -> Option<&User> {
        self.list().iter().find(|user| &user.id == id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.list().iter().find(|user| user.username == username)
    }

    pub fn find_by_mobile(&self, mobile: &str) -> Option<&User> {
        let mobile = mobile.trim();
        if mobile.is_empty() {
            return None;
        }
        self.list().iter().find(|user| user.mobile == mobile)
    }

    pub fn is_username_available(&self, username: &str) -> bool {
        self.find_by_username(username.trim()).is_none()
    }

    /// Register a new active account.
    pub fn add_user(&mut self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let username = new_user.username.trim().to_string();
        let employee_id = new_user.employee_id.trim().to_string();
        if !self.is_username_available(&username) {
            return Err(StoreError::UserExists {
                field: "username",
                value: username,
            });
        }
        if self
            .list()
            .iter()
            .any(|user| user.employee_id == employee_id)
        {
            return Err(StoreError::UserExists {
                field: "employee id",
                value: employee_id,
            });
        }

        let user = User {
            id: RecordId::generate(RecordKind::User),
            name: new_user.name.trim().to_string(),
            employee_id,
            username,
            mobile: new_user.mobile.trim().to_string(),
            email: new_user.email.trim().to_string(),
            role: new_user.role,
            password_hash: Some(hash_password(&new_user.password)?),
            status: UserStatus::Active,
            created_at: Utc::now(),
            last_login_at: None,
        };
        let stored = self.journal.push(user)?;
        tracing::info!(id = %stored.id, username = %stored.username, role = %stored.role, "user registered");
        Ok(stored.clone())
    }

    /// Check a login attempt and stamp `last_login_at` on success.
    pub fn validate_credentials(
        &mut self,
        username: &str,
        password: &str,
    ) -> std::result::Result<User, AuthError> {
        let Some(user) = self.find_by_username(username.trim()) else {
            tracing::warn!(username, "login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };
        let matches = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));
        if !matches {
            tracing::warn!(username, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active() {
            tracing::warn!(username, "login rejected: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        let id = user.id.clone();
        let now = Utc::now();
        let user = self.journal.update(|users| {
            users.iter_mut().find(|user| user.id == id).map(|user| {
                user.last_login_at = Some(now);
                user.clone()
            })
        })?;
        user.ok_or_else(|| AuthError::Store(StoreError::UnknownUser(id.to_string())))
    }

    /// Enable or disable an account, addressed by id or username.
    pub fn set_status(&mut self, user: &str, status: UserStatus) -> Result<User> {
        let id = self.resolve(user)?;
        let updated = self.journal.update(|users| {
            users.iter_mut().find(|user| user.id == id).map(|user| {
                user.status = status;
                user.clone()
            })
        })?;
        let updated = updated.ok_or_else(|| StoreError::UnknownUser(user.to_string()))?;
        tracing::info!(id = %updated.id, status = %status, "user status changed");
        Ok(updated)
    }

    /// Remove an account, addressed by id or username.
    pub fn delete_user(&mut self, user: &str) -> Result<User> {
        let id = self.resolve(user)?;
        let removed = self.journal.update(|users| {
            users
                .iter()
                .position(|user| user.id == id)
                .map(|index| users.remove(index))
        })?;
        let removed = removed.ok_or_else(|| StoreError::UnknownUser(user.to_string()))?;
        tracing::info!(id = %removed.id, username = %removed.username, "user deleted");
        Ok(removed)
    }

    /// Create the `admin` manager account when no users exist yet.
    ///
    /// Returns `None` when the registry already has users.
    pub fn ensure_bootstrap_admin(&mut self, password: &str) -> Result<Option<User>> {
        if !self.list().is_empty() {
            return Ok(None);
        }
        let admin = self.add_user(NewUser {
            name: "Administrator".to_string(),
            employee_id: "ADMIN".to_string(),
            username: BOOTSTRAP_USERNAME.to_string(),
            mobile: String::new(),
            email: String::new(),
            role: UserRole::Manager,
            password: password.to_string(),
        })?;
        Ok(Some(admin))
    }

    fn resolve(&self, key: &str) -> Result<RecordId> {
        let key = key.trim();
        self.list()
            .iter()
            .find(|user| user.id.as_str() == key || user.username == key)
            .map(|user| user.id.clone())
            .ok_or_else(|| StoreError::UnknownUser(key.to_string()))
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "stored password hash is malformed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_phc_strings() {
        let first = hash_password("line-4-secret").unwrap();
        let second = hash_password("line-4-secret").unwrap();
        assert!(first.starts_with("$argon2"));
        assert_ne!(first, second);
        assert!(verify_password("line-4-secret", &first));
        assert!(!verify_password("wrong", &first));
        assert!(!verify_password("line-4-secret", "plain-text"));
    }
}
