//! folio: a file-based blog content repository
//!
//! Posts live in a single directory, one front-matter file per post. This
//! crate parses them into typed [`content::Post`] values and answers three
//! queries over them: list everything newest first, look one up by slug, and
//! rank the posts most related to a given one.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentRepository, DirSource};

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding the posts
    pub content_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Repository over the site's content directory
    pub fn repository(&self) -> ContentRepository<DirSource> {
        ContentRepository::new(DirSource::new(&self.content_dir, &self.config.extension))
    }
}
