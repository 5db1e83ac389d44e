//! Post model

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FrontMatter;
use crate::config::SiteConfig;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier, the content file name without its extension
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary used in listings and previews
    pub excerpt: String,

    /// Publication date as written in the front-matter
    pub date: String,

    /// Publication date resolved to an instant, used for ordering
    #[serde(skip_serializing)]
    pub published: DateTime<Utc>,

    /// Reading time estimate, e.g. "5 min read"
    pub read_time: String,

    /// Taxonomy label
    pub category: String,

    /// Post author
    pub author: String,

    /// Raw body, handed to the renderer untouched
    pub content: String,

    /// Cover image URL or path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Keywords, for SEO and relatedness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Post {
    /// Build a post from its slug, parsed front-matter and body
    pub fn new(slug: impl Into<String>, fm: FrontMatter, body: &str) -> Self {
        Self {
            slug: slug.into(),
            title: fm.title,
            excerpt: fm.excerpt,
            date: fm.date,
            published: fm.published,
            read_time: fm.read_time,
            category: fm.category,
            author: fm.author,
            content: body.to_string(),
            image: fm.image,
            keywords: fm.keywords,
        }
    }

    /// Parse a post from the raw text of its content file
    pub fn parse(slug: impl Into<String>, raw: &str) -> Result<Self, crate::error::ParseError> {
        let (fm, body) = FrontMatter::parse(raw)?;
        Ok(Self::new(slug, fm, body))
    }

    /// Keywords of the post, empty when none are set
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// URL path of the post, e.g. `/blog/my-post`
    pub fn path(&self, config: &SiteConfig) -> String {
        let dir = config.blog_dir.trim_matches('/');
        if dir.is_empty() {
            format!("/{}", self.slug)
        } else {
            format!("/{}/{}", dir, self.slug)
        }
    }

    /// Full permalink URL
    pub fn permalink(&self, config: &SiteConfig) -> String {
        format!("{}{}", config.url.trim_end_matches('/'), self.path(config))
    }
}
