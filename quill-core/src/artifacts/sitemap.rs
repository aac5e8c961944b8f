//! Sitemap generation.

use super::{escape_xml, Artifact, ArtifactGenerator, GeneratorError};
use crate::config::Config;
use crate::models::SiteIndex;

pub struct SitemapGenerator;

impl ArtifactGenerator for SitemapGenerator {
    fn name(&self) -> &'static str {
        "sitemap"
    }

    fn generate(&self, site: &SiteIndex, config: &Config) -> Result<Artifact, GeneratorError> {
        let mut urls = String::new();

        // Generated listing pages
        for route in ["/", "/archive/"] {
            urls.push_str(&format!(
                "  <url><loc>{}</loc></url>\n",
                escape_xml(&config.site.absolute_url(route))
            ));
        }

        let mut skipped = 0usize;
        for post in &site.posts {
            if post.is_draft() {
                skipped += 1;
                continue;
            }
            urls.push_str("  <url>");
            urls.push_str(&format!(
                "<loc>{}</loc>",
                escape_xml(&config.site.absolute_url(&post.slug))
            ));
            if let Some(date) = post.date {
                urls.push_str(&format!("<lastmod>{}</lastmod>", date.format("%Y-%m-%d")));
            }
            urls.push_str("</url>\n");
        }

        if skipped > 0 {
            tracing::debug!("Sitemap excluded {} draft documents", skipped);
        }

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}</urlset>
"#,
            urls
        );

        Ok(Artifact {
            path: "sitemap.xml".to_string(),
            content: xml,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frontmatter, Post, PostKind};
    use chrono::NaiveDate;

    fn config() -> Config {
        serde_yaml::from_str(
            r#"
site:
  title: "T"
  description: "D"
  url: "https://example.com"
paths:
  content: content
  output: dist
"#,
        )
        .unwrap()
    }

    fn post(slug: &str, draft: bool) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            kind: PostKind::Post,
            date: NaiveDate::parse_from_str("2024-05-01", "%Y-%m-%d").ok(),
            draft,
            tags: vec![],
            author_name: None,
            description: None,
            content_html: String::new(),
            excerpt: String::new(),
            frontmatter: Frontmatter::default(),
            source_path: String::new(),
        }
    }

    #[test]
    fn test_sitemap_lists_public_routes_only() {
        let site = SiteIndex {
            posts: vec![post("/blog/public/", false), post("/blog/hidden/", true)],
            assets: vec![],
        };

        let artifact = SitemapGenerator.generate(&site, &config()).unwrap();
        assert_eq!(artifact.path, "sitemap.xml");
        assert!(artifact
            .content
            .contains("<loc>https://example.com/blog/public/</loc>"));
        assert!(!artifact.content.contains("hidden"));
        assert!(artifact.content.contains("<loc>https://example.com/</loc>"));
        assert!(artifact
            .content
            .contains("<loc>https://example.com/archive/</loc>"));
        assert!(artifact.content.contains("<lastmod>2024-05-01</lastmod>"));
    }
}
