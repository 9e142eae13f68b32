//! User directory and the demo login flow.
//!
//! Credentials are demo-grade on purpose: the only password in the system is
//! the hardcoded admin pair, compared as a plain string. Regular users carry
//! no stored password at all; their login is gated on the verified and
//! approved flags.

use log::{info, warn};
use std::sync::RwLock;
use tankmon_types::User;
use thiserror::Error;

/// The built-in super-user, outside the directory entirely
pub const ADMIN_EMAIL: &str = "joemarian3010@gmail.com";
pub const ADMIN_PASSWORD: &str = "admin";

/// How a successful login resolves
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The hardcoded super-user; sees every channel
    Admin,
    /// Verified and approved; sees assigned channels
    Member(User),
    /// Verified but still waiting for approval; sees nothing yet
    PendingApproval(User),
}

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("account not found or not verified")]
    UnknownOrUnverified,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("user directory lock poisoned")]
    LockPoisoned,
}

/// In-memory registry of dashboard users, keyed by email
pub struct UserDirectory {
    users: RwLock<Vec<User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Directory preloaded with the given users
    pub fn with_seed(users: Vec<User>) -> Self {
        info!("Seeded user directory with {} users", users.len());
        Self {
            users: RwLock::new(users),
        }
    }

    /// Resolve a login attempt.
    ///
    /// The hardcoded admin pair bypasses the directory. Everyone else must
    /// supply both entries and resolve to a verified user; approval decides
    /// between a member session and the pending screen.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            info!("Admin login");
            return Ok(LoginOutcome::Admin);
        }
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .find(email)
            .filter(|u| u.verified)
            .ok_or(AuthError::UnknownOrUnverified)?;

        if user.approved {
            info!("User '{}' logged in", user.username);
            Ok(LoginOutcome::Member(user))
        } else {
            warn!("User '{}' logged in but is awaiting approval", user.username);
            Ok(LoginOutcome::PendingApproval(user))
        }
    }

    /// Register a new account. It starts unverified and unapproved with no
    /// assignments; an admin has to flip both flags before it can log in.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let Ok(mut users) = self.users.write() else {
            return Err(AuthError::LockPoisoned);
        };
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::DuplicateEmail);
        }
        info!("Registered user '{}' <{}>", username, email);
        users.push(User::new(username, email));
        Ok(())
    }

    /// Grant dashboard access. Also marks the account verified, matching
    /// the admin approval action. Idempotent; false for unknown emails.
    pub fn approve(&self, email: &str) -> bool {
        let Ok(mut users) = self.users.write() else {
            return false;
        };
        match users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.verified = true;
                user.approved = true;
                info!("Approved user '{}'", user.username);
                true
            }
            None => false,
        }
    }

    /// Remove an account. Idempotent; false when the email is unknown.
    pub fn remove(&self, email: &str) -> bool {
        let Ok(mut users) = self.users.write() else {
            return false;
        };
        let before = users.len();
        users.retain(|u| u.email != email);
        let removed = users.len() < before;
        if removed {
            info!("Removed user <{}>", email);
        }
        removed
    }

    pub fn find(&self, email: &str) -> Option<User> {
        let users = self.users.read().ok()?;
        users.iter().find(|u| u.email == email).cloned()
    }

    /// All users in registration order
    pub fn list(&self) -> Vec<User> {
        self.users
            .read()
            .map(|users| users.clone())
            .unwrap_or_default()
    }

    /// Verified and approved users, the set offered in assignment pickers
    pub fn approved_users(&self) -> Vec<User> {
        self.list().into_iter().filter(|u| u.is_active()).collect()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
