//! Iframe wrapping: embeds get a styled wrapper block.

use super::{HtmlTransform, TransformContext};
use crate::config::IframeOptions;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static IFRAME_BLOCK: OnceLock<Regex> = OnceLock::new();

fn iframe_block() -> &'static Regex {
    // Group 1 captures an existing wrapper opening so a second pass leaves
    // already-wrapped embeds alone.
    IFRAME_BLOCK.get_or_init(|| {
        Regex::new(r#"(?s)(<div class="iframe-wrapper"[^>]*>\s*)?<iframe\b.*?</iframe>"#).unwrap()
    })
}

/// Wraps `<iframe>` embeds in a `div.iframe-wrapper` carrying the configured
/// inline style, so video and similar embeds space and scale like the rest
/// of the prose.
pub struct IframeTransform {
    options: IframeOptions,
}

impl IframeTransform {
    pub fn new(options: IframeOptions) -> Self {
        Self { options }
    }
}

impl HtmlTransform for IframeTransform {
    fn name(&self) -> &'static str {
        "iframes"
    }

    fn apply(&self, html: &str, _ctx: &mut TransformContext) -> String {
        iframe_block()
            .replace_all(html, |caps: &Captures| {
                if caps.get(1).is_some() {
                    return caps[0].to_string();
                }
                format!(
                    r#"<div class="iframe-wrapper" style="{}">{}</div>"#,
                    self.options.wrapper_style, &caps[0]
                )
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn apply(html: &str) -> String {
        let transform = IframeTransform::new(IframeOptions::default());
        let mut ctx = TransformContext::new(PathBuf::from("."));
        transform.apply(html, &mut ctx)
    }

    #[test]
    fn test_iframe_wrapped_with_style() {
        let out = apply(r#"<iframe src="https://example.com/embed"></iframe>"#);
        assert_eq!(
            out,
            r#"<div class="iframe-wrapper" style="margin-bottom:1rem"><iframe src="https://example.com/embed"></iframe></div>"#
        );
    }

    #[test]
    fn test_custom_wrapper_style() {
        let transform = IframeTransform::new(IframeOptions {
            wrapper_style: "margin-bottom:2rem".to_string(),
        });
        let mut ctx = TransformContext::new(PathBuf::from("."));
        let out = transform.apply("<iframe></iframe>", &mut ctx);
        assert!(out.contains(r#"style="margin-bottom:2rem""#));
    }

    #[test]
    fn test_surrounding_prose_untouched() {
        let out = apply("<p>before</p><iframe></iframe><p>after</p>");
        assert!(out.starts_with("<p>before</p><div class=\"iframe-wrapper\""));
        assert!(out.ends_with("</div><p>after</p>"));
    }

    #[test]
    fn test_idempotent() {
        let once = apply(r#"<iframe src="https://example.com/embed"></iframe>"#);
        assert_eq!(apply(&once), once);
    }
}
