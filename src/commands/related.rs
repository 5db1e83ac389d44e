//! Show posts related to a given one

use anyhow::Result;

use super::list::summary_line;
use crate::Folio;

/// Print the posts most related to `slug`
pub fn run(folio: &Folio, slug: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let limit = limit.unwrap_or(folio.config.related_limit);
    let posts = folio.repository().get_related(slug, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Related to {} ({}):", slug, posts.len());
    for post in &posts {
        println!("  {}", summary_line(post));
    }

    Ok(())
}
