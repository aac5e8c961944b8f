//! Typographic cleanup: curly quotes, dashes, and ellipses in prose.

use super::{map_prose_segments, HtmlTransform, TransformContext};
use crate::config::SmartypantsOptions;

/// Educates straight quotes, dashes and ellipses in prose text. Runs after
/// the structural transforms, and only on text outside code, so highlighted
/// blocks are never corrupted.
pub struct SmartypantsTransform {
    _options: SmartypantsOptions,
}

impl SmartypantsTransform {
    pub fn new(options: SmartypantsOptions) -> Self {
        Self { _options: options }
    }
}

impl HtmlTransform for SmartypantsTransform {
    fn name(&self) -> &'static str {
        "smartypants"
    }

    fn apply(&self, html: &str, _ctx: &mut TransformContext) -> String {
        map_prose_segments(html, educate)
    }
}

fn is_opening_context(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '{' | '—' | '–' | '“' | '‘'),
    }
}

/// Replace straight quotes, `--`/`---` and `...` with their typographic
/// forms. All replacement characters fall outside the input alphabet of the
/// patterns, so re-educating produced text is a no-op.
fn educate(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    let starts_with = |i: usize, pat: &str| -> bool {
        pat.chars()
            .enumerate()
            .all(|(k, pc)| chars.get(i + k) == Some(&pc))
    };

    while i < chars.len() {
        let prev = out.chars().last();

        // pulldown escapes double quotes in text content
        if starts_with(i, "&quot;") || chars[i] == '"' {
            out.push(if is_opening_context(prev) { '“' } else { '”' });
            i += if chars[i] == '"' { 1 } else { 6 };
            continue;
        }

        if starts_with(i, "&#39;") || chars[i] == '\'' {
            let width = if chars[i] == '\'' { 1 } else { 5 };
            let next = chars.get(i + width).copied();
            let quote = if prev.map(|c| c.is_alphanumeric()).unwrap_or(false) {
                '’'
            } else if next.map(|c| c.is_alphanumeric()).unwrap_or(false)
                && is_opening_context(prev)
            {
                '‘'
            } else {
                '’'
            };
            out.push(quote);
            i += width;
            continue;
        }

        if starts_with(i, "...") {
            out.push('…');
            i += 3;
            continue;
        }

        if starts_with(i, "---") {
            out.push('—');
            i += 3;
            continue;
        }

        if starts_with(i, "--") {
            out.push('–');
            i += 2;
            continue;
        }

        out.push(chars[i]);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn apply(html: &str) -> String {
        let transform = SmartypantsTransform::new(SmartypantsOptions::default());
        let mut ctx = TransformContext::new(PathBuf::from("."));
        transform.apply(html, &mut ctx)
    }

    #[test]
    fn test_double_quotes() {
        assert_eq!(apply("<p>&quot;hello&quot; there</p>"), "<p>“hello” there</p>");
        assert_eq!(apply("<p>\"raw\" quotes</p>"), "<p>“raw” quotes</p>");
    }

    #[test]
    fn test_apostrophe_and_single_quotes() {
        assert_eq!(apply("<p>don't stop</p>"), "<p>don’t stop</p>");
        assert_eq!(apply("<p>'tis the season</p>"), "<p>‘tis the season</p>");
    }

    #[test]
    fn test_dashes_and_ellipsis() {
        assert_eq!(apply("<p>a -- b --- c...</p>"), "<p>a – b — c…</p>");
    }

    #[test]
    fn test_code_untouched() {
        let html = r#"<pre><code>let s = "x--y...";</code></pre>"#;
        assert_eq!(apply(html), html);
    }

    #[test]
    fn test_idempotent() {
        let once = apply("<p>\"quotes\" and don't --- yes...</p>");
        assert_eq!(apply(&once), once);
    }
}
