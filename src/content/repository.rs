//! Content repository - listing, lookup and related-post queries

use std::collections::HashMap;
use std::io;

use super::source::{ContentSource, DirSource};
use super::{related, Post};
use crate::error::ContentError;

/// Result of a listing pass: the posts that loaded and the files that did not
#[derive(Debug, Default)]
pub struct Listing {
    /// Valid posts, newest first
    pub posts: Vec<Post>,
    /// One error per file that failed to load
    pub failures: Vec<ContentError>,
}

/// Read-only queries over a content source. Every call re-reads the source.
#[derive(Debug, Clone)]
pub struct ContentRepository<S = DirSource> {
    source: S,
}

impl<S: ContentSource> ContentRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Load every post, collecting per-file failures instead of aborting.
    ///
    /// A file whose contents are unusable (bad front-matter, not UTF-8) or
    /// that disappeared after enumeration is a per-file failure. Any other
    /// I/O error means the source itself is unavailable.
    pub fn list_report(&self) -> Result<Listing, ContentError> {
        let slugs = self
            .source
            .list_slugs()
            .map_err(|source| self.unavailable(source))?;

        let mut listing = Listing::default();

        for slug in slugs {
            match self.load(&slug) {
                Ok(post) => listing.posts.push(post),
                Err(ContentError::Read { source, .. }) if !is_per_file(&source) => {
                    return Err(self.unavailable(source));
                }
                Err(e) => listing.failures.push(e),
            }
        }

        // Stable sort, so equal dates keep the source's slug order
        listing.posts.sort_by(|a, b| b.published.cmp(&a.published));

        Ok(listing)
    }

    /// All valid posts, newest first. Files that fail to load are logged and skipped.
    pub fn list_all(&self) -> Result<Vec<Post>, ContentError> {
        let listing = self.list_report()?;
        for failure in &listing.failures {
            tracing::warn!("Skipping post: {}", failure);
        }
        Ok(listing.posts)
    }

    /// Slugs of all valid posts, newest first
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.list_all()?.into_iter().map(|p| p.slug).collect())
    }

    /// Look up one post. `Ok(None)` means no file exists for `slug`.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let exists = self
            .source
            .exists(slug)
            .map_err(|source| ContentError::Read {
                slug: slug.to_string(),
                source,
            })?;

        if !exists {
            tracing::debug!("No post for slug {:?}", slug);
            return Ok(None);
        }

        match self.load(slug) {
            Ok(post) => Ok(Some(post)),
            Err(ContentError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Up to `limit` posts most relevant to the post at `slug`, never including it.
    ///
    /// When `slug` is not among the valid posts, no scoring happens and the
    /// newest posts other than `slug` are returned instead.
    pub fn get_related(&self, slug: &str, limit: usize) -> Result<Vec<Post>, ContentError> {
        let posts = self.list_all()?;
        let candidates = posts.iter().filter(|p| p.slug != slug);

        let Some(current) = posts.iter().find(|p| p.slug == slug) else {
            tracing::debug!("Post {:?} not found, falling back to recent posts", slug);
            return Ok(candidates.take(limit).cloned().collect());
        };

        Ok(related::rank(current, candidates, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Posts in `category`, newest first
    pub fn by_category(&self, category: &str) -> Result<Vec<Post>, ContentError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Each category with its post count, most used first, ties by name
    pub fn categories(&self) -> Result<Vec<(String, usize)>, ContentError> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for post in self.list_all()? {
            *counts.entry(post.category).or_insert(0) += 1;
        }

        let mut categories: Vec<_> = counts.into_iter().collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(categories)
    }

    fn unavailable(&self, source: io::Error) -> ContentError {
        ContentError::SourceUnavailable {
            path: self.source.location().to_path_buf(),
            source,
        }
    }

    fn load(&self, slug: &str) -> Result<Post, ContentError> {
        let raw = self
            .source
            .read_raw(slug)
            .map_err(|source| ContentError::Read {
                slug: slug.to_string(),
                source,
            })?;

        Post::parse(slug, &raw).map_err(|source| ContentError::Parse {
            slug: slug.to_string(),
            source,
        })
    }
}

/// Read errors scoped to a single file rather than the whole source
fn is_per_file(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::NotFound | io::ErrorKind::InvalidData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;
    use crate::error::ParseError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Source whose reads of one slug fail with a given error kind
    struct FailingSource {
        inner: MemorySource,
        slug: &'static str,
        kind: io::ErrorKind,
    }

    impl ContentSource for FailingSource {
        fn location(&self) -> &Path {
            Path::new("<failing>")
        }

        fn list_slugs(&self) -> io::Result<Vec<String>> {
            let mut slugs = self.inner.list_slugs()?;
            slugs.push(self.slug.to_string());
            slugs.sort();
            Ok(slugs)
        }

        fn read_raw(&self, slug: &str) -> io::Result<String> {
            if slug == self.slug {
                return Err(io::Error::new(self.kind, "injected"));
            }
            self.inner.read_raw(slug)
        }

        fn exists(&self, slug: &str) -> io::Result<bool> {
            Ok(slug == self.slug || self.inner.exists(slug)?)
        }
    }

    fn failing(kind: io::ErrorKind) -> ContentRepository<FailingSource> {
        ContentRepository::new(FailingSource {
            inner: MemorySource::new().with("good", raw("2024-01-01", "X", &[])),
            slug: "flaky",
            kind,
        })
    }

    fn raw(date: &str, category: &str, keywords: &[&str]) -> String {
        let mut text = format!(
            "---\ntitle: Post from {date}\nexcerpt: Summary\ndate: {date}\nreadTime: 4 min read\ncategory: {category}\nauthor: Test Author\n"
        );
        if !keywords.is_empty() {
            text.push_str("keywords:\n");
            for k in keywords {
                text.push_str(&format!("  - {k}\n"));
            }
        }
        text.push_str("---\n\nSome <Callout>content</Callout>.\n");
        text
    }

    const CORRUPT: &str = "---\ntitle: [broken\n---\nbody\n";

    fn scenario() -> ContentRepository<MemorySource> {
        ContentRepository::new(
            MemorySource::new()
                .with("c", raw("2023-06-01", "Y", &[]))
                .with("a", raw("2024-01-10", "X", &["k1", "k2"]))
                .with("b", raw("2024-01-05", "X", &["k1"])),
        )
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_list_all_newest_first() {
        let repo = scenario();
        let posts = repo.list_all().unwrap();
        assert_eq!(slugs(&posts), vec!["a", "b", "c"]);
        for pair in posts.windows(2) {
            assert!(pair[0].published >= pair[1].published);
        }
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let repo = scenario();
        assert_eq!(repo.list_all().unwrap(), repo.list_all().unwrap());
    }

    #[test]
    fn test_equal_dates_keep_slug_order() {
        let repo = ContentRepository::new(
            MemorySource::new()
                .with("zeta", raw("2024-02-01", "X", &[]))
                .with("alpha", raw("2024-02-01", "X", &[]))
                .with("mid", raw("2024-02-01", "X", &[])),
        );
        assert_eq!(
            slugs(&repo.list_all().unwrap()),
            vec!["alpha", "mid", "zeta"]
        );
    }

    #[test]
    fn test_empty_source() {
        let repo = ContentRepository::new(MemorySource::new());
        assert!(repo.list_all().unwrap().is_empty());
        assert!(repo.get_related("anything", 2).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_does_not_abort_listing() {
        let repo = ContentRepository::new(
            MemorySource::new()
                .with("one", raw("2024-01-01", "X", &[]))
                .with("two", raw("2024-01-02", "X", &[]))
                .with("bad", CORRUPT)
                .with("three", raw("2024-01-03", "X", &[])),
        );

        let listing = repo.list_report().unwrap();
        assert_eq!(slugs(&listing.posts), vec!["three", "two", "one"]);
        assert_eq!(listing.failures.len(), 1);
        assert_eq!(listing.failures[0].slug(), Some("bad"));

        assert_eq!(repo.list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_lookup_matches_listing() {
        let repo = scenario();
        for post in repo.list_all().unwrap() {
            assert_eq!(repo.get_by_slug(&post.slug).unwrap(), Some(post));
        }
    }

    #[test]
    fn test_lookup_not_found() {
        let repo = scenario();
        assert!(repo.get_by_slug("nonexistent-slug").unwrap().is_none());
    }

    #[test]
    fn test_lookup_corrupt_is_parse_error() {
        let repo = ContentRepository::new(MemorySource::new().with("bad", CORRUPT));
        let err = repo.get_by_slug("bad").unwrap_err();
        assert!(matches!(
            err,
            ContentError::Parse {
                source: ParseError::Yaml(_),
                ..
            }
        ));
    }

    #[test]
    fn test_related_scenario() {
        let repo = scenario();
        let related = repo.get_related("a", 2).unwrap();
        assert_eq!(slugs(&related), vec!["b", "c"]);
    }

    #[test]
    fn test_related_excludes_current_and_respects_limit() {
        let repo = scenario();
        for slug in ["a", "b", "c", "missing"] {
            for limit in 1..=4 {
                let related = repo.get_related(slug, limit).unwrap();
                assert!(related.len() <= limit);
                assert!(related.iter().all(|p| p.slug != slug));
            }
        }
    }

    #[test]
    fn test_related_prefers_category_and_keywords() {
        let repo = ContentRepository::new(
            MemorySource::new()
                .with("current", raw("2024-01-01", "Engineering", &["react", "performance"]))
                .with("x", raw("2022-01-01", "Engineering", &["react"]))
                .with("y", raw("2023-12-30", "Design", &[])),
        );
        let related = repo.get_related("current", 2).unwrap();
        assert_eq!(slugs(&related), vec!["x", "y"]);
    }

    #[test]
    fn test_related_returns_zero_scores() {
        let repo = ContentRepository::new(
            MemorySource::new()
                .with("current", raw("2024-01-01", "A", &[]))
                .with("far", raw("2020-01-01", "B", &[])),
        );
        assert_eq!(slugs(&repo.get_related("current", 2).unwrap()), vec!["far"]);
    }

    #[test]
    fn test_related_falls_back_for_unknown_slug() {
        let repo = scenario();
        let related = repo.get_related("missing", 2).unwrap();
        assert_eq!(slugs(&related), vec!["a", "b"]);
    }

    #[test]
    fn test_related_only_post() {
        let repo = ContentRepository::new(
            MemorySource::new().with("alone", raw("2024-01-01", "A", &[])),
        );
        assert!(repo.get_related("alone", 2).unwrap().is_empty());
    }

    #[test]
    fn test_by_category_and_categories() {
        let repo = scenario();
        assert_eq!(slugs(&repo.by_category("X").unwrap()), vec!["a", "b"]);
        assert!(repo.by_category("Z").unwrap().is_empty());
        assert_eq!(
            repo.categories().unwrap(),
            vec![("X".to_string(), 2), ("Y".to_string(), 1)]
        );
    }

    #[test]
    fn test_slugs() {
        assert_eq!(scenario().slugs().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_directory_backed_repository() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.mdx"), raw("2024-01-10", "X", &["k1", "k2"])).unwrap();
        fs::write(tmp.path().join("b.mdx"), raw("2024-01-05", "X", &["k1"])).unwrap();
        fs::write(tmp.path().join("c.mdx"), raw("2023-06-01", "Y", &[])).unwrap();
        fs::write(tmp.path().join("broken.mdx"), CORRUPT).unwrap();
        fs::write(tmp.path().join("readme.txt"), "not a post").unwrap();

        let repo = ContentRepository::new(DirSource::new(tmp.path(), "mdx"));
        assert_eq!(slugs(&repo.list_all().unwrap()), vec!["a", "b", "c"]);
        assert_eq!(slugs(&repo.get_related("a", 2).unwrap()), vec!["b", "c"]);

        let a = repo.get_by_slug("a").unwrap().unwrap();
        assert_eq!(a.keywords(), ["k1", "k2"]);
        assert!(repo.get_by_slug("readme").unwrap().is_none());
        assert!(repo.get_by_slug("../a").unwrap().is_none());
        assert!(matches!(
            repo.get_by_slug("broken"),
            Err(ContentError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_directory_is_source_unavailable() {
        let tmp = TempDir::new().unwrap();
        let repo = ContentRepository::new(DirSource::new(tmp.path().join("nope"), "mdx"));
        assert!(matches!(
            repo.list_all(),
            Err(ContentError::SourceUnavailable { .. })
        ));
        assert!(matches!(
            repo.get_related("a", 2),
            Err(ContentError::SourceUnavailable { .. })
        ));
        assert!(repo.get_by_slug("a").unwrap().is_none());
    }

    #[test]
    fn test_read_error_is_distinct_from_not_found() {
        let repo = failing(io::ErrorKind::PermissionDenied);
        assert!(matches!(
            repo.get_by_slug("flaky"),
            Err(ContentError::Read { ref slug, .. }) if slug == "flaky"
        ));
        assert!(repo.get_by_slug("good").unwrap().is_some());
        assert!(repo.get_by_slug("absent").unwrap().is_none());
    }

    #[test]
    fn test_read_error_makes_listing_unavailable() {
        let repo = failing(io::ErrorKind::PermissionDenied);
        assert!(matches!(
            repo.list_report(),
            Err(ContentError::SourceUnavailable { .. })
        ));
        assert!(matches!(
            repo.get_related("good", 2),
            Err(ContentError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_vanished_file_is_reported_per_file() {
        let listing = failing(io::ErrorKind::NotFound).list_report().unwrap();
        assert_eq!(slugs(&listing.posts), vec!["good"]);
        assert_eq!(listing.failures.len(), 1);
        assert_eq!(listing.failures[0].slug(), Some("flaky"));
    }

    #[test]
    fn test_non_utf8_file_is_reported_per_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("good.mdx"), raw("2024-01-01", "X", &[])).unwrap();
        fs::write(tmp.path().join("binary.mdx"), b"\xff\xfe\x00\x80").unwrap();

        let repo = ContentRepository::new(DirSource::new(tmp.path(), "mdx"));
        let listing = repo.list_report().unwrap();
        assert_eq!(slugs(&listing.posts), vec!["good"]);
        assert_eq!(listing.failures.len(), 1);
        assert!(matches!(
            listing.failures[0],
            ContentError::Read { ref slug, .. } if slug == "binary"
        ));

        assert!(matches!(
            repo.get_by_slug("binary"),
            Err(ContentError::Read { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("good.mdx"), raw("2024-01-01", "X", &[])).unwrap();
        std::os::unix::fs::symlink("loop.mdx", tmp.path().join("loop.mdx")).unwrap();

        let repo = ContentRepository::new(DirSource::new(tmp.path(), "mdx"));
        assert!(matches!(
            repo.get_by_slug("loop"),
            Err(ContentError::Read { .. })
        ));
        assert!(matches!(
            repo.list_all(),
            Err(ContentError::SourceUnavailable { .. })
        ));
        assert!(repo.get_by_slug("good").unwrap().is_some());
    }
}
