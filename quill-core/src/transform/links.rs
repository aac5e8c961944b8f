//! Linked-file copying: local attachments moved under the asset prefix.

use super::{get_attr, set_attr, HtmlTransform, TransformContext};
use crate::config::LinkOptions;
use crate::models::AssetRef;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static ANCHOR_TAG: OnceLock<Regex> = OnceLock::new();

fn anchor_tag() -> &'static Regex {
    ANCHOR_TAG.get_or_init(|| Regex::new(r"<a\b[^>]*>").unwrap())
}

fn is_non_local(href: &str) -> bool {
    href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("//")
        || href.starts_with("mailto:")
        || href.starts_with('#')
        || href.starts_with('/')
}

/// Rewrites relative links to copyable attachments (by extension) to the
/// asset prefix and records the files for copying.
pub struct LinkCopyTransform {
    options: LinkOptions,
    asset_prefix: String,
}

impl LinkCopyTransform {
    pub fn new(options: LinkOptions, asset_prefix: &str) -> Self {
        Self {
            options,
            asset_prefix: asset_prefix.to_string(),
        }
    }

    fn copyable(&self, href: &str) -> bool {
        let ext = href.rsplit('.').next().unwrap_or_default().to_lowercase();
        self.options.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }

    fn rewrite_tag(&self, tag: &str, ctx: &mut TransformContext) -> String {
        let Some(href) = get_attr(tag, "href") else {
            return tag.to_string();
        };

        // Site-absolute hrefs include anything already under the asset
        // prefix, so a second pass is a no-op.
        if is_non_local(&href) || !self.copyable(&href) {
            return tag.to_string();
        }

        let rel = href.trim_start_matches("./");
        let source = ctx.source_dir.join(rel);
        if !source.is_file() {
            tracing::warn!("Linked file '{}' not found under {:?}; leaving markup as-is", href, ctx.source_dir);
            return tag.to_string();
        }

        let Some(filename) = rel.rsplit('/').next().filter(|f| !f.is_empty()) else {
            return tag.to_string();
        };

        let new_href = format!("{}{}", self.asset_prefix, filename);
        ctx.assets.push(AssetRef {
            source,
            rel_target: new_href.trim_start_matches('/').to_string(),
        });

        set_attr(tag, "href", &new_href)
    }
}

impl HtmlTransform for LinkCopyTransform {
    fn name(&self) -> &'static str {
        "copy_links"
    }

    fn apply(&self, html: &str, ctx: &mut TransformContext) -> String {
        anchor_tag()
            .replace_all(html, |caps: &Captures| self.rewrite_tag(&caps[0], ctx))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn transform() -> LinkCopyTransform {
        LinkCopyTransform::new(LinkOptions::default(), "/assets/")
    }

    #[test]
    fn test_local_attachment_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("slides.pdf"), b"pdf").unwrap();

        let mut ctx = TransformContext::new(dir.path().to_path_buf());
        let out = transform().apply(r#"<a href="slides.pdf">slides</a>"#, &mut ctx);

        assert!(out.contains(r#"href="/assets/slides.pdf""#));
        assert_eq!(ctx.assets.len(), 1);
        assert_eq!(ctx.assets[0].rel_target, "assets/slides.pdf");
    }

    #[test]
    fn test_page_links_untouched() {
        let mut ctx = TransformContext::new(std::env::temp_dir());
        for html in [
            r#"<a href="/blog/other-post/">other</a>"#,
            r#"<a href="https://example.com/x.pdf">ext</a>"#,
            r##"<a href="#section">anchor</a>"##,
            r#"<a href="other-page.html">page</a>"#,
        ] {
            assert_eq!(transform().apply(html, &mut ctx), html);
        }
        assert!(ctx.assets.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.zip"), b"zip").unwrap();

        let t = transform();
        let mut ctx = TransformContext::new(dir.path().to_path_buf());
        let once = t.apply(r#"<a href="a.zip">dl</a>"#, &mut ctx);

        let mut ctx2 = TransformContext::new(dir.path().to_path_buf());
        assert_eq!(t.apply(&once, &mut ctx2), once);
        assert!(ctx2.assets.is_empty());
    }
}
