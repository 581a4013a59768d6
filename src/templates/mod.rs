//! Page rendering with Tera templates
//!
//! The built-in theme is embedded directly in the binary. A site can point
//! `theme_dir` at a directory of its own templates instead; those must
//! provide every [`View`] and may use the same layout/partials structure.

use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::{Result, SiteError};

/// The pages the blog can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    About,
    Contact,
    Post,
    Error,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Index,
        View::About,
        View::Contact,
        View::Post,
        View::Error,
    ];

    /// Get the template name for this view
    pub fn template_name(&self) -> &'static str {
        match self {
            View::Index => "index.html",
            View::About => "about.html",
            View::Contact => "contact.html",
            View::Post => "post.html",
            View::Error => "error.html",
        }
    }
}

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            author: config.author.clone(),
        }
    }
}

/// Template renderer
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in theme
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("about.html", include_str!("theme/about.html")),
            ("contact.html", include_str!("theme/contact.html")),
            ("post.html", include_str!("theme/post.html")),
            ("error.html", include_str!("theme/error.html")),
            // Partials
            ("partials/nav.html", include_str!("theme/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("theme/partials/footer.html"),
            ),
        ])?;

        Ok(Self {
            tera,
            site: SiteData::from(config),
        })
    }

    /// Create a renderer from a theme directory on disk
    pub fn from_dir(dir: &Path, config: &SiteConfig) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SiteError::TemplateMissing(dir.display().to_string()));
        }

        let pattern = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&pattern)?;

        let names: Vec<&str> = tera.get_template_names().collect();
        if let Some(missing) = View::ALL
            .iter()
            .map(View::template_name)
            .find(|name| !names.contains(name))
        {
            return Err(SiteError::TemplateMissing(
                dir.join(missing).display().to_string(),
            ));
        }

        tracing::debug!("Loaded {} templates from {:?}", names.len(), dir);
        Ok(Self {
            tera,
            site: SiteData::from(config),
        })
    }

    /// Pick the theme directory from config, or the built-in theme
    pub fn load(config: &SiteConfig, base_dir: &Path) -> Result<Self> {
        match config.theme_path(base_dir) {
            Some(dir) => Self::from_dir(&dir, config),
            None => Self::new(config),
        }
    }

    /// Render a view with the given context; `site` is always available
    pub fn render(&self, view: View, context: &Context) -> Result<String> {
        let mut ctx = context.clone();
        ctx.insert("site", &self.site);
        Ok(self.tera.render(view.template_name(), &ctx)?)
    }

    /// Landing page listing every post, in order
    pub fn render_index(&self, posts: &[Post]) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("posts", posts);
        self.render(View::Index, &ctx)
    }

    /// Single post page
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("post", post);
        self.render(View::Post, &ctx)
    }

    /// A page that takes no data (about, contact)
    pub fn render_page(&self, view: View) -> Result<String> {
        self.render(view, &Context::new())
    }

    pub fn render_error(&self, status: u16, message: &str) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("status", &status);
        ctx.insert("message", message);
        self.render(View::Error, &ctx)
    }
}
