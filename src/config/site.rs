//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,

    // Content source
    pub posts_url: String,
    pub fetch_timeout_secs: u64,

    // Directory
    pub static_dir: String,
    pub theme_dir: Option<String>,

    // Contact
    pub owner_email: Option<String>,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Angela's Blog".to_string(),
            subtitle: "A collection of random musings.".to_string(),
            author: "Angela Yu".to_string(),

            posts_url: "https://api.npoint.io/4af156202f984d3464c3".to_string(),
            fetch_timeout_secs: 30,

            static_dir: "static".to_string(),
            theme_dir: None,

            owner_email: None,
            smtp: SmtpConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Theme override directory, resolved against the site directory
    pub fn theme_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.theme_dir.as_ref().map(|dir| base_dir.join(dir))
    }
}

/// Outbound mail relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub subject: String,
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            subject: "Day-60-Contact".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SmtpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
