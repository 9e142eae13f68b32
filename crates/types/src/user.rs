//! User records for the login and channel-assignment model

use serde::{Deserialize, Serialize};

/// A registered dashboard user. The email is the identity key; no
/// credentials are stored on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    /// Email ownership has been confirmed
    #[serde(default)]
    pub verified: bool,
    /// An admin has granted dashboard access
    #[serde(default)]
    pub approved: bool,
    /// Channel names this user is assigned to, for the admin overview
    #[serde(default)]
    pub assigned_dashboards: Vec<String>,
}

impl User {
    /// Create a fresh registration: unverified, unapproved, no assignments
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            verified: false,
            approved: false,
            assigned_dashboards: Vec::new(),
        }
    }

    /// Whether this user may appear in assignment pickers
    pub fn is_active(&self) -> bool {
        self.verified && self.approved
    }
}
