//! Image rewriting: relative sources moved under the asset prefix.

use super::{add_attr, get_attr, set_attr, HtmlTransform, TransformContext};
use crate::config::ImageOptions;
use crate::models::AssetRef;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static IMG_TAG: OnceLock<Regex> = OnceLock::new();

fn img_tag() -> &'static Regex {
    IMG_TAG.get_or_init(|| Regex::new(r"<img\b[^>]*?/?>").unwrap())
}

fn is_external(src: &str) -> bool {
    src.starts_with("http://")
        || src.starts_with("https://")
        || src.starts_with("//")
        || src.starts_with("data:")
}

/// Rewrites relative `<img>` sources to the site asset prefix, attaches lazy
/// loading attributes and the configured max-width, and records the source
/// file for copying.
pub struct ImageTransform {
    options: ImageOptions,
    asset_prefix: String,
}

impl ImageTransform {
    pub fn new(options: ImageOptions, asset_prefix: &str) -> Self {
        Self {
            options,
            asset_prefix: asset_prefix.to_string(),
        }
    }

    fn rewrite_tag(&self, tag: &str, ctx: &mut TransformContext) -> String {
        let Some(src) = get_attr(tag, "src") else {
            return tag.to_string();
        };

        // External and already-rewritten sources stay as they are; skipping
        // the latter makes the stage idempotent.
        if is_external(&src) || src.starts_with(&self.asset_prefix) {
            return tag.to_string();
        }

        let rel = src.trim_start_matches("./");
        let source = ctx.source_dir.join(rel);
        if !source.is_file() {
            tracing::warn!("Image '{}' not found under {:?}; leaving markup as-is", src, ctx.source_dir);
            return tag.to_string();
        }

        let Some(filename) = rel.rsplit('/').next().filter(|f| !f.is_empty()) else {
            return tag.to_string();
        };

        let new_src = format!("{}{}", self.asset_prefix, filename);
        ctx.assets.push(AssetRef {
            source,
            rel_target: new_src.trim_start_matches('/').to_string(),
        });

        let tag = set_attr(tag, "src", &new_src);
        let tag = add_attr(&tag, "loading", "lazy");
        let tag = add_attr(&tag, "decoding", "async");
        add_attr(
            &tag,
            "style",
            &format!("max-width:{}px;width:100%", self.options.max_width),
        )
    }
}

impl HtmlTransform for ImageTransform {
    fn name(&self) -> &'static str {
        "images"
    }

    fn apply(&self, html: &str, ctx: &mut TransformContext) -> String {
        img_tag()
            .replace_all(html, |caps: &Captures| self.rewrite_tag(&caps[0], ctx))
            .into_owned()
    }
}
