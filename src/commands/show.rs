//! Show a single post

use anyhow::Result;

use crate::Folio;

/// Print one post's metadata and body
pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let Some(post) = folio.repository().get_by_slug(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!("  slug:      {}", post.slug);
    println!("  url:       {}", post.permalink(&folio.config));
    println!("  date:      {}", post.date);
    println!("  author:    {}", post.author);
    println!("  category:  {}", post.category);
    println!("  read time: {}", post.read_time);
    if let Some(image) = &post.image {
        println!("  image:     {}", image);
    }
    if !post.keywords().is_empty() {
        println!("  keywords:  {}", post.keywords().join(", "));
    }
    println!();
    println!("{}", post.excerpt);
    println!();
    print!("{}", post.content);

    Ok(())
}
