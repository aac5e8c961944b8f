//! Build command implementation.

use anyhow::{Context, Result};
use askama::Template;
use chrono::Datelike;
use quill_core::artifacts::{default_generators, ArtifactGenerator};
use quill_core::{Config, SiteBuilder, SiteIndex};
use quill_render::{ArchiveTemplate, DocumentTemplate, IndexTemplate, NotFoundTemplate};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Build the static site (writes output) and discard the in-memory index
pub fn build_site(config_path: &Path) -> Result<()> {
    build_site_with_index(config_path).map(|_| ())
}

/// Build the static site and return the in-memory index alongside the loaded config
pub fn build_site_with_index(config_path: &Path) -> Result<(Config, SiteIndex)> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    tracing::info!("Building site: {}", config.site.title);

    let builder = SiteBuilder::new(config.clone());
    let site_index = builder.build().context("Failed to build site")?;

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let year = chrono::Utc::now().year();

    // Render individual document pages. Drafts get a standalone page at
    // their route but never appear in listings or syndication.
    for post in &site_index.posts {
        if post.is_draft() {
            tracing::debug!("Rendering draft (unlisted): {}", post.slug);
        }
        let template = DocumentTemplate::from_post(post, &config, year);
        let html = template
            .render()
            .context("Failed to render document template")?;
        write_page(&output_dir, &post.output_rel_path(), &html)?;
        tracing::debug!("Rendered: {}", post.slug);
    }

    // Generated listing pages
    let index_html = IndexTemplate::from_site(&site_index, &config, year)
        .render()
        .context("Failed to render index template")?;
    write_page(&output_dir, "index.html", &index_html)?;

    let archive_html = ArchiveTemplate::from_site(&site_index, &config, year)
        .render()
        .context("Failed to render archive template")?;
    write_page(&output_dir, "archive/index.html", &archive_html)?;

    let not_found_html = NotFoundTemplate {
        site_title: config.site.title.clone(),
        feed_path: config.feed.path.clone(),
        feed_enabled: config.feed.enabled,
        year,
    }
    .render()
    .context("Failed to render 404 template")?;
    write_page(&output_dir, "404.html", &not_found_html)?;

    // Feed, sitemap, header manifest
    for generator in default_generators(&config) {
        let artifact = generator
            .generate(&site_index, &config)
            .with_context(|| format!("Failed to generate {}", generator.name()))?;
        write_page(&output_dir, &artifact.path, &artifact.content)?;
        tracing::info!("Generated {}", artifact.path);
    }

    copy_assets(&config, &site_index)?;

    let published = site_index.published_posts().len() + site_index.published_pages().len();
    tracing::info!("✓ Built {} pages ({} published)", site_index.posts.len(), published);
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok((config, site_index))
}

/// Write a file under the output root, creating parent directories.
fn write_page(output_dir: &Path, rel_path: &str, contents: &str) -> Result<()> {
    let path = output_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Copy referenced and static assets into the output tree.
fn copy_assets(config: &Config, site_index: &SiteIndex) -> Result<()> {
    let output_dir = config.output_dir();

    // Files the transform chain recorded (images, linked attachments)
    for asset in &site_index.assets {
        let target = output_dir.join(asset.rel_target.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        match fs::copy(&asset.source, &target) {
            Ok(_) => tracing::debug!("Copied asset {:?}", asset.source),
            Err(err) => tracing::warn!("Failed to copy asset {:?}: {}", asset.source, err),
        }
    }
    if !site_index.assets.is_empty() {
        tracing::info!("Copied {} referenced assets", site_index.assets.len());
    }

    // Static files copied verbatim (css, favicons, ...)
    if let Some(assets_dir) = config.assets_dir() {
        if assets_dir.exists() {
            copy_dir(&assets_dir, &output_dir)?;
            tracing::info!("Copied static files from {:?}", assets_dir);
        } else {
            tracing::warn!("Configured assets path {:?} does not exist", assets_dir);
        }
    }

    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Failed to relativize {:?}", entry.path()))?;
        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
    }
    Ok(())
}
