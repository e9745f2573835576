//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length for new user accounts.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Username of the built-in demo administrator.
    ///
    /// The demo credential is a fallback for environments where no user
    /// accounts have been provisioned yet. It never touches the database.
    #[serde(default = "default_demo_username")]
    pub demo_username: String,
    /// Password of the built-in demo administrator.
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            demo_username: default_demo_username(),
            demo_password: default_demo_password(),
        }
    }
}

fn default_password_min() -> usize {
    8
}

fn default_demo_username() -> String {
    "admin".to_string()
}

fn default_demo_password() -> String {
    "admin123".to_string()
}
