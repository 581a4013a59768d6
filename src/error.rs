//! Error types shared by the content store, renderer and contact relay

use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while serving the blog
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Failed to fetch posts from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Post source {url} answered with status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Post source did not return a list of posts: {0}")]
    InvalidPosts(#[from] serde_json::Error),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid contact form: {0}")]
    InvalidForm(String),

    #[error("Could not build contact message: {0}")]
    MessageBuild(String),

    #[error("Mail relay failed: {0}")]
    Relay(String),

    #[error("Template not found: {0}")]
    TemplateMissing(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Missing environment variable: {0}")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SiteError {
    /// HTTP status used when this error reaches a visitor
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::PostNotFound(_) | SiteError::PageNotFound(_) => StatusCode::NOT_FOUND,
            SiteError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            SiteError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            SiteError::MessageBuild(_) | SiteError::Relay(_) => StatusCode::BAD_GATEWAY,
            SiteError::Fetch { .. } | SiteError::FetchStatus { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show on the error page
    pub fn public_message(&self) -> String {
        match self {
            SiteError::PostNotFound(_) => "Sorry, that post does not exist.".to_string(),
            SiteError::PageNotFound(_) => "Sorry, that page does not exist.".to_string(),
            SiteError::MethodNotAllowed(_) => {
                "That page does not accept this kind of request.".to_string()
            }
            SiteError::InvalidForm(reason) => format!("Your message could not be sent: {}.", reason),
            SiteError::MessageBuild(_) | SiteError::Relay(_) => {
                "Your message could not be delivered right now. Please try again later."
                    .to_string()
            }
            _ => "Something went wrong on our side.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SiteError::PostNotFound("5".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SiteError::InvalidForm("name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SiteError::MethodNotAllowed("GET /form-entry".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            SiteError::Relay("connection refused".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            SiteError::TemplateMissing("post.html".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_relay_details() {
        let err = SiteError::Relay("535 bad credentials for owner@example.com".into());
        assert!(!err.public_message().contains("535"));
        let err = SiteError::InvalidForm("phone is required".into());
        assert!(err.public_message().contains("phone is required"));
    }
}
