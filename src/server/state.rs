//! Application context shared by every request

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::SmtpCredentials;
use crate::content::PostStore;
use crate::mail::{ContactRelay, SmtpMailer};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Everything a request handler needs. Built once before the server
/// starts listening and never mutated afterwards.
pub struct AppState {
    pub store: PostStore,
    pub renderer: TemplateRenderer,
    pub relay: ContactRelay,
}

impl AppState {
    pub fn new(store: PostStore, renderer: TemplateRenderer, relay: ContactRelay) -> Self {
        Self {
            store,
            renderer,
            relay,
        }
    }

    /// Load credentials and templates, then fetch the posts. Any failure
    /// stops the server before it serves traffic.
    pub async fn build(blog: &Blog) -> Result<Self> {
        let credentials = SmtpCredentials::from_env(&blog.base_dir)
            .context("Mail relay credentials are not configured")?;
        let owner = blog
            .config
            .owner_email
            .clone()
            .unwrap_or_else(|| credentials.username.clone());
        let mailer = SmtpMailer::new(&blog.config.smtp, credentials)?;
        let relay = ContactRelay::new(Arc::new(mailer), owner, blog.config.smtp.subject.clone());

        let renderer = TemplateRenderer::load(&blog.config, &blog.base_dir)
            .context("Failed to load templates")?;

        let store = blog.fetch_posts().await?;

        Ok(Self::new(store, renderer, relay))
    }
}
