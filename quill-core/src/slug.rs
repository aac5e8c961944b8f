//! Slug generation and route derivation.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use quill_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    // Replace whitespace and underscores with hyphens
    let with_hyphens = lowercased
        .graphemes(true)
        .map(|g| match g {
            " " | "_" | "\t" | "\n" => "-",
            _ => g,
        })
        .collect::<String>();

    // Keep alphanumerics (including unicode letters) and hyphens
    let cleaned = with_hyphens
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_ascii_alphanumeric() || c == '-' {
                Some(g)
            } else if c.is_alphabetic() {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    static HYPHENS: OnceLock<Regex> = OnceLock::new();
    let re = HYPHENS.get_or_init(|| Regex::new(r"-+").unwrap());
    let collapsed = re.replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

/// Derive the canonical route for a content file.
///
/// The route mirrors the file's position under the content root, with every
/// component slugified: `blog/Why Rust.md` becomes `/blog/why-rust/`. A
/// frontmatter `slug` replaces the file stem but keeps the directory prefix.
/// A stem of `index` maps to the enclosing directory's route.
///
/// Routes always carry a leading and trailing slash, so they are stable
/// across builds for unchanged source paths.
pub fn derive_route(rel_path: &Path, slug_override: Option<&str>) -> String {
    let mut components: Vec<String> = Vec::new();

    if let Some(parent) = rel_path.parent() {
        for part in parent.components() {
            let name = part.as_os_str().to_string_lossy();
            let slug = slugify(&name);
            if !slug.is_empty() {
                components.push(slug);
            }
        }
    }

    let stem = rel_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let leaf = match slug_override {
        Some(s) => slugify(s),
        None => slugify(&stem),
    };

    if leaf != "index" && !leaf.is_empty() {
        components.push(leaf);
    }

    if components.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", components.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust Programming"), "rust-programming");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(slugify("Café"), "café");
        assert_eq!(slugify("naïve"), "naïve");
    }

    #[test]
    fn test_multiple_spaces_and_underscores() {
        assert_eq!(slugify("Hello    World"), "hello-world");
        assert_eq!(slugify("hello_world"), "hello-world");
    }

    #[test]
    fn test_leading_trailing_hyphens() {
        assert_eq!(slugify("  Hello World  "), "hello-world");
        assert_eq!(slugify("-Leading Hyphen"), "leading-hyphen");
    }

    #[test]
    fn test_empty_and_special_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_derive_route_post() {
        assert_eq!(
            derive_route(&PathBuf::from("blog/why-rust.md"), None),
            "/blog/why-rust/"
        );
        assert_eq!(
            derive_route(&PathBuf::from("blog/Why Rust.md"), None),
            "/blog/why-rust/"
        );
    }

    #[test]
    fn test_derive_route_page() {
        assert_eq!(derive_route(&PathBuf::from("about.md"), None), "/about/");
    }

    #[test]
    fn test_derive_route_slug_override_keeps_prefix() {
        assert_eq!(
            derive_route(&PathBuf::from("blog/draft-v2-final.md"), Some("My Post")),
            "/blog/my-post/"
        );
    }

    #[test]
    fn test_derive_route_index_collapses_to_directory() {
        assert_eq!(
            derive_route(&PathBuf::from("blog/index.md"), None),
            "/blog/"
        );
        assert_eq!(derive_route(&PathBuf::from("index.md"), None), "/");
    }

    #[test]
    fn test_derive_route_nested() {
        assert_eq!(
            derive_route(&PathBuf::from("blog/2024/Year In Review.md"), None),
            "/blog/2024/year-in-review/"
        );
    }
}
