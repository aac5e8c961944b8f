//! Askama template definitions.
//!
//! Every field a template touches is precomputed here; the templates
//! themselves only ever read strings and loop over lists.

use askama::Template;
use quill_core::config::Config;
use quill_core::models::{Post, PostKind, SiteIndex};

/// A listing entry for the index and archive pages.
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub url: String,
    pub title: String,
    pub date: Option<String>,
    pub excerpt: String,
}

impl PostEntry {
    pub fn from_post(post: &Post) -> Self {
        Self {
            url: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.map(|d| d.format("%B %-d, %Y").to_string()),
            excerpt: post.excerpt.clone(),
        }
    }
}

/// Archive posts grouped by publication year, newest year first.
#[derive(Debug, Clone)]
pub struct YearGroup {
    pub year: String,
    pub posts: Vec<PostEntry>,
}

/// Rendered page for a single document (blog post or standalone page).
#[derive(Template)]
#[template(path = "post.html")]
pub struct DocumentTemplate {
    // Page metadata
    pub title: String,
    pub meta_description: String,
    pub canonical: String,
    pub date: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub is_post: bool,
    pub draft: bool,

    // Final transformed HTML, inserted verbatim
    pub content: String,

    // Site metadata
    pub site_title: String,
    pub feed_path: String,
    pub feed_enabled: bool,
    pub year: i32,
}

impl DocumentTemplate {
    pub fn from_post(post: &Post, config: &Config, year: i32) -> Self {
        Self {
            title: post.title.clone(),
            meta_description: post
                .description
                .clone()
                .unwrap_or_else(|| post.excerpt.clone()),
            canonical: config.site.absolute_url(&post.slug),
            date: post.date.map(|d| d.format("%B %-d, %Y").to_string()),
            author: post.author_name.clone(),
            tags: post.tags.clone(),
            is_post: post.kind == PostKind::Post,
            draft: post.is_draft(),
            content: post.content_html.clone(),
            site_title: config.site.title.clone(),
            feed_path: config.feed.path.clone(),
            feed_enabled: config.feed.enabled,
            year,
        }
    }
}

/// Front page: site intro plus the latest posts.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub site_description: String,
    pub site_intro: Option<String>,
    pub canonical: String,
    pub feed_path: String,
    pub feed_enabled: bool,
    pub year: i32,

    pub posts: Vec<PostEntry>,
}

impl IndexTemplate {
    pub fn from_site(site: &SiteIndex, config: &Config, year: i32) -> Self {
        Self {
            site_title: config.site.title.clone(),
            site_description: config.site.description.clone(),
            site_intro: config.site.intro.clone(),
            canonical: config.site.absolute_url("/"),
            feed_path: config.feed.path.clone(),
            feed_enabled: config.feed.enabled,
            year,
            posts: site
                .published_posts()
                .iter()
                .map(|p| PostEntry::from_post(p))
                .collect(),
        }
    }
}

/// Archive page: every published post, grouped by year.
#[derive(Template)]
#[template(path = "archive.html")]
pub struct ArchiveTemplate {
    pub site_title: String,
    pub canonical: String,
    pub feed_path: String,
    pub feed_enabled: bool,
    pub year: i32,

    pub groups: Vec<YearGroup>,
}

impl ArchiveTemplate {
    pub fn from_site(site: &SiteIndex, config: &Config, year: i32) -> Self {
        let mut groups: Vec<YearGroup> = Vec::new();
        // published_posts is already newest first, so groups come out in
        // descending year order.
        for post in site.published_posts() {
            let post_year = post
                .date
                .map(|d| d.format("%Y").to_string())
                .unwrap_or_else(|| "Undated".to_string());
            match groups.last_mut() {
                Some(group) if group.year == post_year => {
                    group.posts.push(PostEntry::from_post(post));
                }
                _ => groups.push(YearGroup {
                    year: post_year,
                    posts: vec![PostEntry::from_post(post)],
                }),
            }
        }

        Self {
            site_title: config.site.title.clone(),
            canonical: config.site.absolute_url("/archive/"),
            feed_path: config.feed.path.clone(),
            feed_enabled: config.feed.enabled,
            year,
            groups,
        }
    }
}

/// 404 error page template.
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub site_title: String,
    pub feed_path: String,
    pub feed_enabled: bool,
    pub year: i32,
}
