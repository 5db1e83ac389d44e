//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::Folio;

/// List posts, newest first, optionally limited to one category
pub fn run(folio: &Folio, category: Option<&str>, json: bool) -> Result<()> {
    let repo = folio.repository();
    let posts = match category {
        Some(category) => repo.by_category(category)?,
        None => repo.list_all()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", summary_line(post));
    }

    Ok(())
}

/// List categories with their post counts
pub fn categories(folio: &Folio) -> Result<()> {
    let categories = folio.repository().categories()?;
    println!("Categories ({}):", categories.len());
    for (category, count) in categories {
        println!("  {} ({})", category, count);
    }
    Ok(())
}

/// One-line summary of a post for listings
pub(crate) fn summary_line(post: &Post) -> String {
    format!(
        "{} - {} [{}] ({})",
        post.published.format("%Y-%m-%d"),
        post.title,
        post.slug,
        post.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let raw = "---\ntitle: Hello\nexcerpt: E\ndate: 2024-03-05T09:00:00Z\nreadTime: 1 min read\ncategory: Notes\nauthor: A\n---\n";
        let post = Post::parse("hello", raw).unwrap();
        assert_eq!(summary_line(&post), "2024-03-05 - Hello [hello] (Notes)");
    }
}
