//! Content module - the posts served by the blog

mod post;
mod store;

pub use post::Post;
pub use store::PostStore;
