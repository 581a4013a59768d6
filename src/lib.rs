//! capstone-blog: a small personal blog server
//!
//! Posts are fetched once from a JSON endpoint when the server starts and
//! rendered with Tera templates. The contact page posts to a handler that
//! relays the message to the site owner over SMTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod mail;
pub mod server;
pub mod templates;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use error::SiteError;

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static assets (CSS, images, JS)
    pub static_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)
                .with_context(|| format!("Failed to load {:?}", config_path))?
        } else {
            config::SiteConfig::default()
        };

        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            static_dir,
        })
    }

    /// Fetch the post list from the configured source
    pub async fn fetch_posts(&self) -> Result<content::PostStore> {
        content::PostStore::fetch(&self.config.posts_url, self.config.fetch_timeout())
            .await
            .with_context(|| format!("Could not load blog posts from {}", self.config.posts_url))
    }

    /// Run the web server
    pub async fn serve(&self, ip: &str, port: u16, open: bool) -> Result<()> {
        server::start(self, ip, port, open).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.smtp.port, 587);
        assert_eq!(blog.static_dir, dir.path().join("static"));
    }

    #[test]
    fn test_new_with_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Notes\nstatic_dir: public\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "Notes");
        assert_eq!(blog.static_dir, dir.path().join("public"));
    }

    #[test]
    fn test_new_with_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "fetch_timeout_secs: soon\n").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
