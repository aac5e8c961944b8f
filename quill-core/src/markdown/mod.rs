//! Markdown to HTML conversion.

pub mod embed;
pub mod highlight;

use pulldown_cmark::{html, Options, Parser};

pub use embed::SnippetEmbedder;
pub use highlight::HighlightTransformer;

/// Markdown processor: pulldown-cmark with syntax highlighting applied in
/// the event stream.
pub struct MarkdownProcessor {
    options: Options,
    highlighter: HighlightTransformer,
}

impl MarkdownProcessor {
    pub fn new(highlight_theme: &str) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self {
            options,
            highlighter: HighlightTransformer::new(highlight_theme),
        }
    }

    /// Convert markdown (frontmatter already stripped) into HTML.
    pub fn convert(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let events: Vec<_> = parser.collect();

        let events = self.highlighter.transform(events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> MarkdownProcessor {
        MarkdownProcessor::new("InspiredGitHub")
    }

    #[test]
    fn test_basic_markdown() {
        let html = processor().convert("# Hello World\n\nThis is a **test**.");
        assert!(html.contains("<h1"));
        assert!(html.contains("Hello World"));
        assert!(html.contains("<strong>test</strong>"));
    }

    #[test]
    fn test_tables() {
        let md = r#"
| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |
"#;
        let html = processor().convert(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Header 1</th>"));
    }

    #[test]
    fn test_code_blocks_are_highlighted() {
        let md = "```rust\nfn main() {}\n```";
        let html = processor().convert(md);
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
        // syntect emits inline-styled spans
        assert!(html.contains("<span"));
    }
}
