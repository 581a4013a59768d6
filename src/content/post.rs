//! Post model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A blog post as delivered by the post source.
///
/// Attributes are kept verbatim (and in source order); a post has no identity
/// other than its position in the [`PostStore`](super::PostStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post {
    fields: Map<String, Value>,
}

impl Post {
    /// Look up a single attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Post title, when the source provides one as a string
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    /// All attributes
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
