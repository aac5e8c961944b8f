//! Emoji shortcode substitution in prose text.

use super::{map_prose_segments, HtmlTransform, TransformContext};
use crate::config::EmojiOptions;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

// Shortcode table. Unknown shortcodes pass through unchanged, so a stray
// ":300:" in prose is safe.
const EMOJI_TABLE: &[(&str, &str)] = &[
    ("smile", "😄"),
    ("grin", "😁"),
    ("laughing", "😆"),
    ("joy", "😂"),
    ("wink", "😉"),
    ("sunglasses", "😎"),
    ("thinking", "🤔"),
    ("heart", "❤️"),
    ("heart_eyes", "😍"),
    ("thumbsup", "👍"),
    ("+1", "👍"),
    ("thumbsdown", "👎"),
    ("-1", "👎"),
    ("clap", "👏"),
    ("wave", "👋"),
    ("muscle", "💪"),
    ("pray", "🙏"),
    ("point_right", "👉"),
    ("eyes", "👀"),
    ("fire", "🔥"),
    ("rocket", "🚀"),
    ("star", "⭐"),
    ("sparkles", "✨"),
    ("tada", "🎉"),
    ("zap", "⚡"),
    ("bulb", "💡"),
    ("warning", "⚠️"),
    ("x", "❌"),
    ("white_check_mark", "✅"),
    ("check", "✔️"),
    ("question", "❓"),
    ("exclamation", "❗"),
    ("100", "💯"),
    ("bug", "🐛"),
    ("book", "📖"),
    ("memo", "📝"),
    ("package", "📦"),
    ("hammer", "🔨"),
    ("wrench", "🔧"),
    ("gear", "⚙️"),
    ("lock", "🔒"),
    ("key", "🔑"),
    ("link", "🔗"),
    ("coffee", "☕"),
    ("computer", "💻"),
];

static EMOJI_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static SHORTCODE: OnceLock<Regex> = OnceLock::new();

fn emoji_map() -> &'static HashMap<&'static str, &'static str> {
    EMOJI_MAP.get_or_init(|| EMOJI_TABLE.iter().copied().collect())
}

fn shortcode() -> &'static Regex {
    SHORTCODE.get_or_init(|| Regex::new(r":([a-z0-9_+-]+):").unwrap())
}

/// Replaces `:shortcode:` with the matching Unicode emoji wrapped in a span.
pub struct EmojiTransform {
    options: EmojiOptions,
}

impl EmojiTransform {
    pub fn new(options: EmojiOptions) -> Self {
        Self { options }
    }
}

impl HtmlTransform for EmojiTransform {
    fn name(&self) -> &'static str {
        "emoji"
    }

    fn apply(&self, html: &str, _ctx: &mut TransformContext) -> String {
        map_prose_segments(html, |text| {
            shortcode()
                .replace_all(text, |caps: &Captures| match emoji_map().get(&caps[1]) {
                    Some(emoji) => {
                        format!(r#"<span class="{}">{}</span>"#, self.options.class, emoji)
                    }
                    None => caps[0].to_string(),
                })
                .into_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn apply(html: &str) -> String {
        let transform = EmojiTransform::new(EmojiOptions::default());
        let mut ctx = TransformContext::new(PathBuf::from("."));
        transform.apply(html, &mut ctx)
    }

    #[test]
    fn test_known_shortcode_replaced() {
        let out = apply("<p>Ship it :rocket:</p>");
        assert_eq!(out, r#"<p>Ship it <span class="emoji-icon">🚀</span></p>"#);
    }

    #[test]
    fn test_unknown_shortcode_untouched() {
        let out = apply("<p>meet at 12:30:45 today</p>");
        assert_eq!(out, "<p>meet at 12:30:45 today</p>");
    }

    #[test]
    fn test_code_blocks_untouched() {
        let html = "<pre><code>:rocket:</code></pre>";
        assert_eq!(apply(html), html);
    }

    #[test]
    fn test_idempotent() {
        let once = apply("<p>Go :fire: :+1:</p>");
        assert_eq!(apply(&once), once);
    }
}
