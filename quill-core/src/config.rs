//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Main configuration struct matching the quill.yml schema.
///
/// Built once at startup and passed by reference to every stage; no stage
/// mutates it after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteMetadata,
    pub paths: PathsConfig,

    /// URL prefix under which copied assets (images, linked files) land.
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,

    /// What to do when a post references an author key that does not exist.
    #[serde(default)]
    pub on_missing_author: MissingAuthorPolicy,

    /// Syntect theme name for fenced code blocks.
    #[serde(default = "default_highlight_theme")]
    pub highlight_theme: String,

    /// Ordered HTML transform stages applied to every rendered document.
    /// Serialized as a list of singleton maps (`- emoji: {...}`) rather than
    /// YAML enum tags.
    #[serde(
        default = "TransformConfig::default_chain",
        with = "serde_yaml::with::singleton_map_recursive"
    )]
    pub transforms: Vec<TransformConfig>,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default = "default_true")]
    pub enable_sitemap: bool,

    /// Header policy table rendered into the `_headers` manifest.
    #[serde(default = "HeaderRule::default_policy")]
    pub headers: Vec<HeaderRule>,

    /// Regex patterns for content paths to skip during discovery.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_asset_prefix() -> String {
    String::from("/assets/")
}

fn default_highlight_theme() -> String {
    String::from("InspiredGitHub")
}

fn default_true() -> bool {
    true
}

/// Global site metadata, read by every artifact generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    /// Absolute base URL of the deployed site, e.g. "https://example.com".
    pub url: String,

    #[serde(default)]
    pub intro: Option<String>,
}

impl SiteMetadata {
    /// Join the site URL with a site-absolute route, producing exactly one
    /// slash at the joint.
    pub fn absolute_url(&self, route: &str) -> String {
        let root = self.url.trim_end_matches('/');
        if route.starts_with('/') {
            format!("{}{}", root, route)
        } else {
            format!("{}/{}", root, route)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub content: PathBuf,
    pub output: PathBuf,

    /// Directory of embeddable snippets (None disables embedding).
    #[serde(default)]
    pub snippets: Option<PathBuf>,

    /// Static assets copied verbatim into the output root.
    #[serde(default)]
    pub assets: Option<PathBuf>,

    /// YAML author records. Defaults to authors.yml next to the config file
    /// when that file exists.
    #[serde(default)]
    pub authors: Option<PathBuf>,
}

/// Policy for an `author` key with no matching record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingAuthorPolicy {
    /// Fail the build.
    Error,
    /// Substitute a visible placeholder and keep going.
    #[default]
    Placeholder,
}

/// One stage of the HTML transform chain, in configured order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformConfig {
    Emoji(EmojiOptions),
    Images(ImageOptions),
    Iframes(IframeOptions),
    Smartypants(SmartypantsOptions),
    CopyLinks(LinkOptions),
}

impl TransformConfig {
    /// The stock chain used when quill.yml does not spell one out.
    pub fn default_chain() -> Vec<TransformConfig> {
        vec![
            TransformConfig::Emoji(EmojiOptions::default()),
            TransformConfig::Images(ImageOptions::default()),
            TransformConfig::Iframes(IframeOptions::default()),
            TransformConfig::Smartypants(SmartypantsOptions::default()),
            TransformConfig::CopyLinks(LinkOptions::default()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojiOptions {
    /// CSS class attached to the wrapping span.
    #[serde(default = "default_emoji_class")]
    pub class: String,
}

fn default_emoji_class() -> String {
    String::from("emoji-icon")
}

impl Default for EmojiOptions {
    fn default() -> Self {
        Self {
            class: default_emoji_class(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOptions {
    /// Upper bound (px) applied as a layout constraint, not a re-encode.
    #[serde(default = "default_max_width")]
    pub max_width: u32,
}

fn default_max_width() -> u32 {
    2000
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IframeOptions {
    /// Inline style attached to the wrapping div.
    #[serde(default = "default_iframe_wrapper_style")]
    pub wrapper_style: String,
}

fn default_iframe_wrapper_style() -> String {
    String::from("margin-bottom:1rem")
}

impl Default for IframeOptions {
    fn default() -> Self {
        Self {
            wrapper_style: default_iframe_wrapper_style(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartypantsOptions {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOptions {
    /// File extensions treated as copyable attachments.
    #[serde(default = "default_link_extensions")]
    pub extensions: Vec<String>,
}

fn default_link_extensions() -> Vec<String> {
    ["pdf", "zip", "txt"].iter().map(|s| s.to_string()).collect()
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            extensions: default_link_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Output path relative to the output root.
    #[serde(default = "default_feed_path")]
    pub path: String,

    /// Only routes starting with this prefix are eligible for the feed.
    #[serde(default = "default_match_prefix")]
    pub match_prefix: String,

    /// Channel title override (defaults to the site title).
    #[serde(default)]
    pub title: Option<String>,
}

fn default_feed_path() -> String {
    String::from("rss.xml")
}

fn default_match_prefix() -> String {
    String::from("/blog/")
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_feed_path(),
            match_prefix: default_match_prefix(),
            title: None,
        }
    }
}

/// One entry of the header policy table: a URL pattern and the header lines
/// served for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderRule {
    pub pattern: String,
    pub values: Vec<String>,
}

impl HeaderRule {
    /// Default policy: strict transport + framing + sniffing protections.
    pub fn default_policy() -> Vec<HeaderRule> {
        vec![HeaderRule {
            pattern: "/*".to_string(),
            values: vec![
                "X-Frame-Options: DENY".to_string(),
                "X-Content-Type-Options: nosniff".to_string(),
                "Strict-Transport-Security: max-age=31536000; includeSubDomains; preload"
                    .to_string(),
                "Referrer-Policy: no-referrer-when-downgrade".to_string(),
                "Content-Security-Policy: default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self'; frame-ancestors 'none'; base-uri 'self'; form-action 'self'".to_string(),
                "Permissions-Policy: geolocation=(), microphone=()".to_string(),
            ],
        }]
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Malformed configuration is fatal here, before any content is read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "site.url".to_string(),
                message: "must be a non-empty absolute URL".to_string(),
            });
        }
        if !self.site.url.starts_with("http://") && !self.site.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "site.url".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        if !self.feed.match_prefix.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "feed.match_prefix".to_string(),
                message: "must start with '/'".to_string(),
            });
        }
        if !self.asset_prefix.starts_with('/') || !self.asset_prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "asset_prefix".to_string(),
                message: "must start and end with '/'".to_string(),
            });
        }
        Ok(())
    }

    /// Get the content directory, resolved relative to the config file.
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to the config file.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the snippets directory, if configured.
    pub fn snippets_dir(&self) -> Option<PathBuf> {
        self.paths.snippets.as_ref().map(|p| self.resolve_path(p))
    }

    /// Get the static assets directory, if configured.
    pub fn assets_dir(&self) -> Option<PathBuf> {
        self.paths.assets.as_ref().map(|p| self.resolve_path(p))
    }

    /// Path to the author records file.
    ///
    /// Falls back to `authors.yml` next to the config file when present.
    pub fn authors_path(&self) -> Option<PathBuf> {
        if let Some(p) = &self.paths.authors {
            return Some(self.resolve_path(p));
        }
        let fallback = self.resolve_path(Path::new("authors.yml"));
        fallback.exists().then_some(fallback)
    }

    /// Resolve a path relative to the config file location.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_yaml() -> &'static str {
        r#"
site:
  title: "Test Blog"
  description: "A test blog"
  url: "https://example.com"
paths:
  content: content
  output: dist
"#
    }

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str(minimal_yaml()).unwrap();
        assert_eq!(config.asset_prefix, "/assets/");
        assert_eq!(config.on_missing_author, MissingAuthorPolicy::Placeholder);
        assert_eq!(config.highlight_theme, "InspiredGitHub");
        assert!(config.feed.enabled);
        assert_eq!(config.feed.path, "rss.xml");
        assert_eq!(config.feed.match_prefix, "/blog/");
        assert!(config.enable_sitemap);
        assert_eq!(config.transforms.len(), 5);
        assert_eq!(config.headers.len(), 1);
    }

    #[test]
    fn test_ordered_transform_list() {
        let yaml = format!(
            "{}{}",
            minimal_yaml(),
            r#"
transforms:
  - smartypants: {}
  - emoji:
      class: emo
  - images:
      max_width: 800
  - iframes:
      wrapper_style: "margin-bottom:2rem"
"#
        );
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.transforms.len(), 4);
        assert!(matches!(
            config.transforms[0],
            TransformConfig::Smartypants(_)
        ));
        match &config.transforms[1] {
            TransformConfig::Emoji(opts) => assert_eq!(opts.class, "emo"),
            other => panic!("expected emoji, got {:?}", other),
        }
        match &config.transforms[2] {
            TransformConfig::Images(opts) => assert_eq!(opts.max_width, 800),
            other => panic!("expected images, got {:?}", other),
        }
        match &config.transforms[3] {
            TransformConfig::Iframes(opts) => {
                assert_eq!(opts.wrapper_style, "margin-bottom:2rem")
            }
            other => panic!("expected iframes, got {:?}", other),
        }
    }

    #[test]
    fn test_transform_list_round_trips_as_singleton_maps() {
        let config: Config = serde_yaml::from_str(minimal_yaml()).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("- emoji:"));
        assert!(!yaml.contains("!emoji"));

        let reparsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reparsed.transforms.len(), config.transforms.len());
    }

    #[test]
    fn test_invalid_site_url_rejected() {
        let yaml = minimal_yaml().replace("https://example.com", "example.com");
        let mut config: Config = serde_yaml::from_str(&yaml).unwrap();
        config.config_path = None;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "site.url"));
    }

    #[test]
    fn test_absolute_url_join() {
        let site = SiteMetadata {
            title: "T".into(),
            description: "D".into(),
            url: "https://example.com/".into(),
            intro: None,
        };
        assert_eq!(
            site.absolute_url("/blog/my-post/"),
            "https://example.com/blog/my-post/"
        );
        assert_eq!(site.absolute_url("rss.xml"), "https://example.com/rss.xml");
    }
}
