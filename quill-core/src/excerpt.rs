//! Plain-text excerpt derivation from rendered HTML.

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LEN: usize = 140;

/// Strip tags and collapse whitespace, truncating on a word boundary.
///
/// The excerpt feeds the feed description and index listings; it is derived,
/// never authored, unless the frontmatter carries an explicit description.
pub fn excerpt_from_html(html: &str, max_chars: usize) -> String {
    let text = strip_tags(html);
    let text = decode_entities(&text);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let truncated: String = collapsed.chars().take(max_chars).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}…", truncated[..cut].trim_end())
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        let (text, tail) = rest.split_at(lt);
        out.push_str(text);
        // Tag boundaries count as word breaks
        out.push(' ');

        let skip = if tail.starts_with("<!--") {
            tail.find("-->").map(|i| i + 3).unwrap_or(tail.len())
        } else {
            tail.find('>').map(|i| i + 1).unwrap_or(tail.len())
        };
        rest = &tail[skip..];
    }
    out.push_str(rest);

    out
}

// `&amp;` goes last so a literal "&amp;lt;" decodes once, not twice.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
