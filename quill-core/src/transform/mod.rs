//! The ordered HTML transform chain.
//!
//! Each stage is a pure function from an HTML fragment to an HTML fragment,
//! configured once at startup and applied in a fixed order. Stages that need
//! files copied into the output record them on the [`TransformContext`]
//! instead of touching the filesystem themselves.

pub mod emoji;
pub mod iframes;
pub mod images;
pub mod links;
pub mod smartypants;

use crate::config::TransformConfig;
use crate::models::AssetRef;
use std::path::PathBuf;

pub use emoji::EmojiTransform;
pub use iframes::IframeTransform;
pub use images::ImageTransform;
pub use links::LinkCopyTransform;
pub use smartypants::SmartypantsTransform;

/// Per-document context handed through the chain.
pub struct TransformContext {
    /// Directory of the source markdown file, for resolving relative paths.
    pub source_dir: PathBuf,
    /// Files the chain wants copied into the output tree.
    pub assets: Vec<AssetRef>,
}

impl TransformContext {
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            assets: Vec::new(),
        }
    }
}

/// One stage of the chain.
pub trait HtmlTransform {
    fn name(&self) -> &'static str;

    /// Transform an HTML fragment. Must be idempotent: applying the stage to
    /// its own output is a fixed point.
    fn apply(&self, html: &str, ctx: &mut TransformContext) -> String;
}

/// An explicit, ordered, immutable list of transform stages.
pub struct TransformChain {
    stages: Vec<Box<dyn HtmlTransform>>,
}

impl TransformChain {
    /// Assemble the chain from typed configuration, preserving order exactly.
    pub fn from_config(transforms: &[TransformConfig], asset_prefix: &str) -> Self {
        let stages = transforms
            .iter()
            .map(|t| -> Box<dyn HtmlTransform> {
                match t {
                    TransformConfig::Emoji(opts) => Box::new(EmojiTransform::new(opts.clone())),
                    TransformConfig::Images(opts) => {
                        Box::new(ImageTransform::new(opts.clone(), asset_prefix))
                    }
                    TransformConfig::Iframes(opts) => {
                        Box::new(IframeTransform::new(opts.clone()))
                    }
                    TransformConfig::Smartypants(opts) => {
                        Box::new(SmartypantsTransform::new(opts.clone()))
                    }
                    TransformConfig::CopyLinks(opts) => {
                        Box::new(LinkCopyTransform::new(opts.clone(), asset_prefix))
                    }
                }
            })
            .collect();
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order.
    pub fn apply(&self, html: &str, ctx: &mut TransformContext) -> String {
        let mut current = html.to_string();
        for stage in &self.stages {
            current = stage.apply(&current, ctx);
        }
        current
    }
}

/// Apply `f` to every prose text segment of `html`, leaving tags, comments,
/// and anything inside `<pre>`, `<code>`, `<script>` or `<style>` untouched.
pub(crate) fn map_prose_segments<F>(html: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    let mut protect_depth = 0usize;

    while let Some(lt) = rest.find('<') {
        let (text, tail) = rest.split_at(lt);
        if !text.is_empty() {
            if protect_depth == 0 {
                out.push_str(&f(text));
            } else {
                out.push_str(text);
            }
        }

        if tail.starts_with("<!--") {
            let end = tail.find("-->").map(|i| i + 3).unwrap_or(tail.len());
            out.push_str(&tail[..end]);
            rest = &tail[end..];
            continue;
        }

        let gt = tail.find('>').map(|i| i + 1).unwrap_or(tail.len());
        let tag = &tail[..gt];

        let inner = tag.trim_start_matches('<');
        let closing = inner.starts_with('/');
        let name: String = inner
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if matches!(name.as_str(), "pre" | "code" | "script" | "style") {
            if closing {
                protect_depth = protect_depth.saturating_sub(1);
            } else if !tag.ends_with("/>") {
                protect_depth += 1;
            }
        }

        out.push_str(tag);
        rest = &tail[gt..];
    }

    if !rest.is_empty() {
        if protect_depth == 0 {
            out.push_str(&f(rest));
        } else {
            out.push_str(rest);
        }
    }

    out
}

/// Pull a double-quoted attribute value out of a raw tag string.
pub(crate) fn get_attr(tag: &str, attr: &str) -> Option<String> {
    let needle = format!("{}=\"", attr);
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')? + start;
    Some(tag[start..end].to_string())
}

/// Replace the value of an existing double-quoted attribute.
pub(crate) fn set_attr(tag: &str, attr: &str, value: &str) -> String {
    let needle = format!("{}=\"", attr);
    let Some(start) = tag.find(&needle) else {
        return tag.to_string();
    };
    let value_start = start + needle.len();
    let Some(rel_end) = tag[value_start..].find('"') else {
        return tag.to_string();
    };
    format!(
        "{}{}{}",
        &tag[..value_start],
        value,
        &tag[value_start + rel_end..]
    )
}

/// Insert an attribute before the tag's closing bracket if it is absent.
pub(crate) fn add_attr(tag: &str, attr: &str, value: &str) -> String {
    if tag.contains(&format!("{}=\"", attr)) {
        return tag.to_string();
    }
    let insert_at = if tag.ends_with("/>") {
        tag.len() - 2
    } else if tag.ends_with('>') {
        tag.len() - 1
    } else {
        tag.len()
    };
    format!(
        "{} {}=\"{}\"{}",
        tag[..insert_at].trim_end(),
        attr,
        value,
        &tag[insert_at..]
    )
}
