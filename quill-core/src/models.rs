//! Content model structs for posts, authors, and the site index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a document is a dated blog post or a standalone page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Lives under `blog/` in the content tree; dated, listed, syndicated.
    Post,
    /// Everything else (about, contact, ...); rendered but never fed.
    Page,
}

/// Frontmatter metadata from markdown files.
///
/// Field names are part of the content contract; existing files must keep
/// parsing unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Frontmatter {
    pub title: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub draft: bool,

    /// Key into the author records file.
    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Overrides the slug derived from the file stem.
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A single rendered document in the site.
///
/// Immutable once the build pass has produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Canonical site-absolute route with trailing slash, e.g. "/blog/why-rust/".
    pub slug: String,

    pub title: String,

    pub kind: PostKind,

    /// Publication date (required for posts, optional for pages).
    pub date: Option<NaiveDate>,

    pub draft: bool,

    pub tags: Vec<String>,

    /// Resolved author display name, per the configured missing-key policy.
    pub author_name: Option<String>,

    pub description: Option<String>,

    /// Final HTML after the full transform chain.
    pub content_html: String,

    /// Plain-text excerpt derived from the final HTML.
    pub excerpt: String,

    /// Original frontmatter as parsed.
    pub frontmatter: Frontmatter,

    /// Source path relative to the content root.
    pub source_path: String,
}

impl Post {
    /// Relative output path for this document (no leading slash).
    pub fn output_rel_path(&self) -> String {
        let trimmed = self.slug.trim_matches('/');
        if trimmed.is_empty() {
            "index.html".to_string()
        } else {
            format!("{}/index.html", trimmed)
        }
    }

    /// Absolute URL of this document for a given site base URL.
    pub fn absolute_url(&self, site_url: &str) -> String {
        format!("{}{}", site_url.trim_end_matches('/'), self.slug)
    }

    pub fn is_draft(&self) -> bool {
        self.draft
    }
}

/// An asset (image or linked file) recorded by the transform chain for
/// copying into the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Absolute path of the source file.
    pub source: std::path::PathBuf,
    /// Target path relative to the output root.
    pub rel_target: String,
}

/// Complete site index produced by a build: every document plus the assets
/// the transform chain asked to have copied.
#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    pub posts: Vec<Post>,
    pub assets: Vec<AssetRef>,
}

impl SiteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a document by its canonical route.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Non-draft blog posts, newest first. Equal dates keep input order.
    pub fn published_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| p.kind == PostKind::Post && !p.is_draft())
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Non-draft standalone pages in discovery order.
    pub fn published_pages(&self) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.kind == PostKind::Page && !p.is_draft())
            .collect()
    }
}
