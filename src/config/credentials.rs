//! Mail relay credentials, read from the environment at startup

use std::fmt;
use std::path::Path;

use crate::error::{Result, SiteError};

pub const USERNAME_VAR: &str = "GMAIL_USERNAME";
pub const PASSWORD_VAR: &str = "GMAIL_PASSWORD";

/// Username/password pair for the SMTP relay
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl SmtpCredentials {
    /// Load `.env` from the site directory (if present), then read the
    /// credentials from the process environment
    pub fn from_env(base_dir: &Path) -> Result<Self> {
        let env_file = base_dir.join(".env");
        if env_file.exists() {
            dotenv::from_path(&env_file)
                .map_err(|e| SiteError::Config(format!("{:?}: {}", env_file, e)))?;
            tracing::debug!("Loaded environment from {:?}", env_file);
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(SiteError::MissingCredential(key))
        };

        Ok(Self {
            username: read(USERNAME_VAR)?,
            password: read(PASSWORD_VAR)?,
        })
    }
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
