//! Post store - the post list fetched once at startup

use std::time::Duration;

use super::Post;
use crate::error::{Result, SiteError};

/// Immutable, ordered list of posts
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Fetch the post list from `url`.
    ///
    /// A single GET is issued; there is no retry. Any transport failure,
    /// non-success status or unparseable body is returned as an error.
    pub async fn fetch(url: &str, timeout: Duration) -> Result<Self> {
        let fetch_error = |source| SiteError::Fetch {
            url: url.to_string(),
            source,
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(fetch_error)?;

        tracing::debug!("Fetching posts from {}", url);
        let response = client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(fetch_error)?;
        let store = Self::from_json(&body)?;
        tracing::info!("Fetched {} posts from {}", store.len(), url);

        Ok(store)
    }

    /// Parse a JSON array of post objects
    pub fn from_json(body: &str) -> Result<Self> {
        let posts: Vec<Post> = serde_json::from_str(body)?;
        Ok(Self::new(posts))
    }

    /// All posts, in source order
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Post at a zero-based position
    pub fn get(&self, index: usize) -> Result<&Post> {
        self.posts
            .get(index)
            .ok_or_else(|| SiteError::PostNotFound(index.to_string()))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    /// Serve `app` on an ephemeral local port and return its base URL
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_from_json_keeps_order() {
        let store = PostStore::from_json(r#"[{"title":"A"},{"title":"B"}]"#).unwrap();
        let titles: Vec<_> = store.all().iter().filter_map(Post::title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_get_in_and_out_of_range() {
        let store = PostStore::from_json(r#"[{"title":"A"},{"title":"B"}]"#).unwrap();
        assert_eq!(store.get(1).unwrap().title(), Some("B"));
        assert!(matches!(store.get(2), Err(SiteError::PostNotFound(_))));
        assert!(matches!(store.get(usize::MAX), Err(SiteError::PostNotFound(_))));
    }

    #[test]
    fn test_empty_store() {
        let store = PostStore::from_json("[]").unwrap();
        assert!(store.is_empty());
        assert!(store.get(0).is_err());
    }

    #[test]
    fn test_from_json_rejects_non_list() {
        assert!(matches!(
            PostStore::from_json(r#"{"title":"A"}"#),
            Err(SiteError::InvalidPosts(_))
        ));
        assert!(matches!(
            PostStore::from_json(r#"["just a string"]"#),
            Err(SiteError::InvalidPosts(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let app = Router::new().route(
            "/posts",
            get(|| async { r#"[{"id":1,"title":"First"},{"id":2,"title":"Second"}]"# }),
        );
        let base = serve(app).await;

        let store = PostStore::fetch(&format!("{}/posts", base), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title(), Some("First"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let app = Router::new().route(
            "/posts",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = serve(app).await;

        let err = PostStore::fetch(&format!("{}/posts", base), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::FetchStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_unparseable_body() {
        let app = Router::new().route("/posts", get(|| async { "<html>not json</html>" }));
        let base = serve(app).await;

        let err = PostStore::fetch(&format!("{}/posts", base), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::InvalidPosts(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Reserve a port, then release it so nothing is listening there
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = PostStore::fetch(&format!("http://{}/posts", addr), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::Fetch { .. }));
    }
}
