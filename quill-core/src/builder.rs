//! Site building logic - scans content, derives fields, runs the transform
//! chain, and assembles the site index.

use crate::{
    authors::{AuthorDirectory, AuthorError, AuthorResolver},
    config::Config,
    excerpt::{excerpt_from_html, DEFAULT_EXCERPT_LEN},
    frontmatter::{parse_frontmatter, FrontmatterError},
    markdown::{MarkdownProcessor, SnippetEmbedder},
    models::*,
    slug::derive_route,
    transform::{TransformChain, TransformContext},
};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        source: FrontmatterError,
    },

    #[error("{path}: field 'date' has invalid value '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { path: String, value: String },

    #[error("{path}: field 'date' is required for blog posts")]
    MissingDate { path: String },

    #[error("Duplicate slug '{slug}' derived from both {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("{path}: route '{route}' is reserved for a generated page")]
    ReservedRoute { route: String, path: String },

    #[error(transparent)]
    Author(#[from] AuthorError),
}

/// Routes claimed by generated listing pages. A content file deriving to one
/// of these would be silently shadowed, so it is rejected up front.
const RESERVED_ROUTES: &[&str] = &["/", "/archive/"];

/// Main site builder.
///
/// The build is a single batch pass: every document is processed
/// independently, and the aggregating generators only ever see the finished
/// index.
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
    embedder: SnippetEmbedder,
    chain: TransformChain,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        let processor = MarkdownProcessor::new(&config.highlight_theme);
        let embedder = SnippetEmbedder::new(config.snippets_dir());
        let chain = TransformChain::from_config(&config.transforms, &config.asset_prefix);
        Self {
            config,
            processor,
            embedder,
            chain,
        }
    }

    /// Build the full site index.
    pub fn build(&self) -> Result<SiteIndex, BuildError> {
        let authors = match self.config.authors_path() {
            Some(path) => AuthorDirectory::load(&path)?,
            None => AuthorDirectory::empty(),
        };
        let resolver = AuthorResolver::new(authors, self.config.on_missing_author);

        let markdown_files = self.discover_markdown_files()?;
        tracing::info!("Found {} markdown files", markdown_files.len());

        let content_dir = self.config.content_dir();
        let mut posts = Vec::new();
        let mut assets: Vec<AssetRef> = Vec::new();
        let mut slug_map: HashMap<String, String> = HashMap::new();

        for file_path in &markdown_files {
            let rel_path = file_path
                .strip_prefix(&content_dir)
                .unwrap_or(file_path)
                .to_path_buf();
            let rel_str = rel_path.to_string_lossy().to_string();

            let content = fs::read_to_string(file_path)?;
            let (frontmatter, body) =
                parse_frontmatter(&content).map_err(|source| BuildError::Frontmatter {
                    path: rel_str.clone(),
                    source,
                })?;

            let slug = derive_route(&rel_path, frontmatter.slug.as_deref());
            if RESERVED_ROUTES.contains(&slug.as_str()) {
                return Err(BuildError::ReservedRoute {
                    route: slug,
                    path: rel_str,
                });
            }
            if let Some(first) = slug_map.get(&slug) {
                return Err(BuildError::DuplicateSlug {
                    slug,
                    first: first.clone(),
                    second: rel_str,
                });
            }
            slug_map.insert(slug.clone(), rel_str.clone());

            let kind = if rel_path.starts_with("blog") {
                PostKind::Post
            } else {
                PostKind::Page
            };

            let date = self.parse_date(&frontmatter, kind, &rel_str)?;
            let author_name = resolver.resolve(frontmatter.author.as_deref(), &rel_str)?;

            // Per-document transform phase; failures inside it degrade
            // per-node instead of aborting the build.
            let markdown = self.embedder.expand(&body);
            let html = self.processor.convert(&markdown);

            let source_dir = file_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            let mut ctx = TransformContext::new(source_dir);
            let content_html = self.chain.apply(&html, &mut ctx);

            for asset in ctx.assets {
                if !assets.contains(&asset) {
                    assets.push(asset);
                }
            }

            let excerpt = excerpt_from_html(&content_html, DEFAULT_EXCERPT_LEN);

            posts.push(Post {
                slug,
                title: frontmatter.title.clone(),
                kind,
                date,
                draft: frontmatter.draft,
                tags: frontmatter.tags.clone(),
                author_name,
                description: frontmatter.description.clone(),
                content_html,
                excerpt,
                frontmatter,
                source_path: rel_str,
            });
        }

        tracing::info!("Built site index with {} documents", posts.len());

        Ok(SiteIndex { posts, assets })
    }

    fn parse_date(
        &self,
        frontmatter: &Frontmatter,
        kind: PostKind,
        rel_str: &str,
    ) -> Result<Option<NaiveDate>, BuildError> {
        match &frontmatter.date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| BuildError::InvalidDate {
                    path: rel_str.to_string(),
                    value: raw.clone(),
                }),
            None if kind == PostKind::Post => Err(BuildError::MissingDate {
                path: rel_str.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Discover all markdown files under the content root, in a stable order.
    fn discover_markdown_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let content_dir = self.config.content_dir();
        let ignore_patterns = compile_ignore_patterns(&self.config.ignore_patterns);
        let mut files = Vec::new();

        for entry in WalkDir::new(&content_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if entry.path().extension().map(|ext| ext == "md").unwrap_or(false) {
                let rel = entry
                    .path()
                    .strip_prefix(&content_dir)
                    .unwrap_or(entry.path())
                    .to_string_lossy()
                    .to_string();
                if should_ignore(&rel, &ignore_patterns) {
                    tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                    continue;
                }

                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}
