//! List the posts the blog would serve

use anyhow::Result;

use crate::content::PostStore;
use crate::Blog;

/// Fetch the posts and print one line per post
pub async fn run(blog: &Blog) -> Result<()> {
    let store = blog.fetch_posts().await?;
    for line in listing(&store) {
        println!("{}", line);
    }
    Ok(())
}

/// Post listing, with the index used by `/blogpost/{index}`
pub fn listing(store: &PostStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.len() + 1);
    lines.push(format!("Posts ({}):", store.len()));
    for (index, post) in store.all().iter().enumerate() {
        lines.push(format!("  {} - {}", index, post.title().unwrap_or("(untitled)")));
    }
    lines
}
