//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::DirSource;
use crate::Folio;

/// Front-matter written into a freshly scaffolded post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    excerpt: &'a str,
    date: String,
    #[serde(rename = "readTime")]
    read_time: &'a str,
    category: &'a str,
    author: &'a str,
    keywords: Vec<String>,
}

/// Create a new post file named after the slugified title
pub fn create_post(folio: &Folio, title: &str, category: &str, author: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    let source = DirSource::new(&folio.content_dir, &folio.config.extension);

    let Some(file_path) = source.path_for(&slug) else {
        anyhow::bail!("Cannot derive a slug from title: {:?}", title);
    };

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = serde_yaml::to_string(&Scaffold {
        title,
        excerpt: "",
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        read_time: "1 min read",
        category,
        author,
        keywords: Vec::new(),
    })?;

    fs::create_dir_all(&folio.content_dir)?;
    fs::write(&file_path, format!("---\n{}---\n\n", front_matter))?;

    tracing::info!("Created post {:?} at {:?}", slug, file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, category: &str, author: &str) -> Result<()> {
    let path = create_post(folio, title, category, author)?;
    println!("Created: {:?}", path);
    Ok(())
}
