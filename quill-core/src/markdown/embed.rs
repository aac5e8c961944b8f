//! Snippet embedding: `gist:` references expanded before markdown parsing.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

static GIST_LINE: OnceLock<Regex> = OnceLock::new();

fn gist_line() -> &'static Regex {
    // A paragraph consisting only of `gist:relative/path.ext`
    GIST_LINE.get_or_init(|| Regex::new(r"^\s*`gist:([A-Za-z0-9._/-]+)`\s*$").unwrap())
}

/// Expands `gist:` snippet references from a local snippets directory.
///
/// A reference that cannot be resolved degrades to a marker comment plus a
/// visible placeholder; a bad reference never aborts the build.
pub struct SnippetEmbedder {
    snippets_dir: Option<PathBuf>,
}

impl SnippetEmbedder {
    pub fn new(snippets_dir: Option<PathBuf>) -> Self {
        Self { snippets_dir }
    }

    /// Replace each standalone `` `gist:path` `` line with a fenced code
    /// block holding the snippet's contents. References inside fenced code
    /// blocks are left alone.
    pub fn expand(&self, markdown: &str) -> String {
        let mut out = String::with_capacity(markdown.len());
        let mut in_fence = false;

        for line in markdown.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                out.push_str(line);
                out.push('\n');
                continue;
            }

            if !in_fence {
                if let Some(caps) = gist_line().captures(line) {
                    let reference = &caps[1];
                    out.push_str(&self.render_snippet(reference));
                    out.push('\n');
                    continue;
                }
            }

            out.push_str(line);
            out.push('\n');
        }

        out
    }

    fn render_snippet(&self, reference: &str) -> String {
        match self.load(reference) {
            Some(contents) => {
                let lang = lang_for(reference);
                // Blank lines around the fence keep it a block of its own.
                format!("\n```{}\n{}\n```\n", lang, contents.trim_end())
            }
            None => {
                tracing::warn!("Snippet '{}' could not be embedded", reference);
                format!(
                    "\n<!-- snippet unavailable: {} -->\n\n> Snippet `{}` could not be embedded.\n",
                    reference, reference
                )
            }
        }
    }

    fn load(&self, reference: &str) -> Option<String> {
        // Reject path traversal in references
        if reference.split('/').any(|part| part == "..") {
            return None;
        }
        let dir = self.snippets_dir.as_ref()?;
        std::fs::read_to_string(dir.join(reference)).ok()
    }
}

fn lang_for(reference: &str) -> &str {
    match reference.rsplit('.').next() {
        Some("rs") => "rust",
        Some("py") => "python",
        Some("js") => "javascript",
        Some("ts") => "typescript",
        Some("sh") => "bash",
        Some("yml") | Some("yaml") => "yaml",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("cs") => "csharp",
        Some("fs") => "fsharp",
        Some("hs") => "haskell",
        _ => "",
    }
}
