//! RSS 2.0 feed generation.

use super::{escape_xml, Artifact, ArtifactGenerator, GeneratorError};
use crate::config::Config;
use crate::models::{Post, PostKind, SiteIndex};
use chrono::NaiveDate;

/// Ephemeral projection of a post used only for feed serialization.
#[derive(Debug, Clone)]
struct FeedEntry {
    title: String,
    url: String,
    date: Option<NaiveDate>,
    description: String,
    body_html: String,
}

pub struct FeedGenerator;

/// Select and order the posts eligible for the feed: non-draft, route under
/// the configured prefix, newest first. `sort_by` is stable, so posts
/// sharing a date keep their input order.
fn collect_entries(site: &SiteIndex, config: &Config) -> Vec<FeedEntry> {
    let mut eligible: Vec<&Post> = site
        .posts
        .iter()
        .filter(|p| {
            p.kind == PostKind::Post
                && !p.is_draft()
                && p.slug.starts_with(&config.feed.match_prefix)
        })
        .collect();

    eligible.sort_by(|a, b| b.date.cmp(&a.date));

    eligible
        .into_iter()
        .map(|post| FeedEntry {
            title: post.title.clone(),
            url: config.site.absolute_url(&post.slug),
            date: post.date,
            description: post
                .description
                .clone()
                .unwrap_or_else(|| post.excerpt.clone()),
            body_html: post.content_html.clone(),
        })
        .collect()
}

impl ArtifactGenerator for FeedGenerator {
    fn name(&self) -> &'static str {
        "feed"
    }

    fn generate(&self, site: &SiteIndex, config: &Config) -> Result<Artifact, GeneratorError> {
        let entries = collect_entries(site, config);

        let mut items = String::new();
        for entry in &entries {
            items.push_str("    <item>\n");
            items.push_str(&format!(
                "      <title>{}</title>\n",
                escape_xml(&entry.title)
            ));
            items.push_str(&format!("      <link>{}</link>\n", escape_xml(&entry.url)));
            items.push_str(&format!("      <guid>{}</guid>\n", escape_xml(&entry.url)));
            items.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(&entry.description)
            ));
            if let Some(date) = entry.date {
                let pub_date = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| GeneratorError::Feed(format!("invalid date {}", date)))?
                    .and_utc()
                    .to_rfc2822();
                items.push_str(&format!("      <pubDate>{}</pubDate>\n", pub_date));
            }
            items.push_str(&format!(
                "      <content:encoded><![CDATA[{}]]></content:encoded>\n",
                // Close and reopen the CDATA section around any literal "]]>"
                entry.body_html.replace("]]>", "]]]]><![CDATA[>")
            ));
            items.push_str("    </item>\n");
        }

        let channel_title = config
            .feed
            .title
            .clone()
            .unwrap_or_else(|| config.site.title.clone());

        let rss = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>{}</title>
    <link>{}</link>
    <description>{}</description>
{}  </channel>
</rss>
"#,
            escape_xml(&channel_title),
            escape_xml(&config.site.absolute_url("/")),
            escape_xml(&config.site.description),
            items
        );

        tracing::info!("Generated feed with {} entries", entries.len());

        Ok(Artifact {
            path: config.feed.path.clone(),
            content: rss,
        })
    }
}
