//! Content module - posts, front-matter parsing, sources and queries

mod frontmatter;
mod post;
pub mod related;
pub mod repository;
pub mod source;

pub use frontmatter::FrontMatter;
pub use post::Post;
pub use repository::{ContentRepository, Listing};
pub use source::{ContentSource, DirSource, MemorySource};
