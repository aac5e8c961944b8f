//! Check command implementation.

use anyhow::{Context, Result};
use quill_core::{Config, SiteBuilder};
use std::path::Path;

/// Parse and transform all content without writing anything.
///
/// A check run exercises the same code path as a build, so anything fatal in
/// a build (bad frontmatter, slug collisions, unknown authors under the
/// strict policy) fails here too.
pub fn check_site(config_path: &Path) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let builder = SiteBuilder::new(config);
    let site_index = builder.build().context("Check failed")?;

    let posts = site_index
        .posts
        .iter()
        .filter(|p| p.kind == quill_core::PostKind::Post)
        .count();
    let pages = site_index.posts.len() - posts;
    let drafts = site_index.posts.iter().filter(|p| p.is_draft()).count();

    println!("✓ {} documents parsed cleanly", site_index.posts.len());
    println!("  - {} blog posts ({} drafts)", posts, drafts);
    println!("  - {} pages", pages);
    println!("  - {} referenced assets", site_index.assets.len());

    Ok(())
}
