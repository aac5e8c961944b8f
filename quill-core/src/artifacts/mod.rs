//! Artifact generators: feed, sitemap, and the header-policy manifest.
//!
//! Generators are pure: they read the finished [`SiteIndex`] and the config
//! and return artifact contents; the caller writes files. They only run once
//! the per-document transform phase is complete.

pub mod feed;
pub mod headers;
pub mod sitemap;

use crate::config::Config;
use crate::models::SiteIndex;
use thiserror::Error;

pub use feed::FeedGenerator;
pub use headers::HeadersGenerator;
pub use sitemap::SitemapGenerator;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Feed generation failed: {0}")]
    Feed(String),
}

/// One generated output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the output root.
    pub path: String,
    pub content: String,
}

pub trait ArtifactGenerator {
    fn name(&self) -> &'static str;

    fn generate(&self, site: &SiteIndex, config: &Config) -> Result<Artifact, GeneratorError>;
}

/// The ordered generator list for a given configuration. Disabled generators
/// are left out here, with a log line, rather than silently at run time.
pub fn default_generators(config: &Config) -> Vec<Box<dyn ArtifactGenerator>> {
    let mut generators: Vec<Box<dyn ArtifactGenerator>> = Vec::new();

    if config.feed.enabled {
        generators.push(Box::new(FeedGenerator));
    } else {
        tracing::info!("Feed disabled; skipping {}", config.feed.path);
    }

    if config.enable_sitemap {
        generators.push(Box::new(SitemapGenerator));
    } else {
        tracing::info!("Sitemap disabled; skipping sitemap.xml");
    }

    generators.push(Box::new(HeadersGenerator));

    generators
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_generator_list_honors_flags() {
        let base = r#"
site:
  title: "T"
  description: "D"
  url: "https://example.com"
paths:
  content: content
  output: dist
"#;
        let all = default_generators(&config(base));
        let names: Vec<_> = all.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["feed", "sitemap", "headers"]);

        let no_feed = format!("{}\nfeed:\n  enabled: false\n", base);
        let names: Vec<_> = default_generators(&config(&no_feed))
            .iter()
            .map(|g| g.name())
            .collect();
        assert_eq!(names, vec!["sitemap", "headers"]);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b&c>\"d\""), "a&lt;b&amp;c&gt;&quot;d&quot;");
    }
}
