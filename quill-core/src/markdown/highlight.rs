//! Code syntax highlighting using syntect.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

const FALLBACK_THEME: &str = "InspiredGitHub";

/// Transformer for syntax highlighting code blocks.
///
/// The theme comes from configuration; an unknown name falls back to the
/// default with a warning rather than failing the build.
pub struct HighlightTransformer {
    theme: Theme,
}

impl HighlightTransformer {
    pub fn new(theme_name: &str) -> Self {
        let theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.get(theme_name) {
            Some(theme) => theme.clone(),
            None => {
                tracing::warn!(
                    "Unknown highlight theme '{}'; falling back to {}",
                    theme_name,
                    FALLBACK_THEME
                );
                theme_set.themes[FALLBACK_THEME].clone()
            }
        };
        Self { theme }
    }

    /// Replace fenced code blocks with highlighted HTML, passing every other
    /// event through untouched.
    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut result = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    in_code_block = true;
                    code_lang = Some(lang.to_string());
                    code_content.clear();
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(text.as_ref());
                }
                Event::End(TagEnd::CodeBlock) if in_code_block => {
                    in_code_block = false;

                    match code_lang.take().filter(|l| !l.is_empty()) {
                        Some(lang) => {
                            let highlighted = self.highlight_code(&code_content, &lang);
                            result.push(Event::Html(CowStr::Boxed(highlighted.into_boxed_str())));
                        }
                        None => {
                            // No language specified, output as plain pre/code
                            result.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)));
                            result.push(Event::Text(CowStr::Boxed(
                                code_content.clone().into_boxed_str(),
                            )));
                            result.push(Event::End(TagEnd::CodeBlock));
                        }
                    }
                }
                other => result.push(other),
            }
        }

        result
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let ss = syntax_set();
        let syntax = ss
            .find_syntax_by_token(lang)
            .or_else(|| ss.find_syntax_by_extension(lang))
            .unwrap_or_else(|| ss.find_syntax_plain_text());

        match highlighted_html_for_string(code, ss, syntax, &self.theme) {
            Ok(html) => html,
            Err(_) => {
                // Fallback to plain code block
                format!("<pre><code>{}</code></pre>", html_escape(code))
            }
        }
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::Parser;

    fn render(md: &str, theme: &str) -> String {
        let events: Vec<_> = Parser::new(md).collect();
        let events = HighlightTransformer::new(theme).transform(events);
        let mut out = String::new();
        pulldown_cmark::html::push_html(&mut out, events.into_iter());
        out
    }

    #[test]
    fn test_fenced_block_highlighted() {
        let html = render("```rust\nlet x = 1;\n```", "InspiredGitHub");
        assert!(html.contains("<pre"));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_unknown_language_still_renders() {
        let html = render("```nosuchlang\nplain text\n```", "InspiredGitHub");
        assert!(html.contains("plain text"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let html = render("```rust\nlet x = 1;\n```", "no-such-theme");
        assert!(html.contains("<pre"));
    }

    #[test]
    fn test_bare_fence_stays_plain() {
        let html = render("```\nraw\n```", "InspiredGitHub");
        assert!(html.contains("<code>raw"));
    }
}
