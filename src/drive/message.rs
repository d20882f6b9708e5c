//! Rendering search results as an HTML chat message.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::types::AnnotatedEntry;

/// Characters left as-is in index links, matching `encodeURIComponent`.
const INDEX_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Message sent when a search matches nothing.
pub const NO_FILES_MESSAGE: &str = "There are no files matching your parameters";

/// Format file size for display.
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if size >= TB {
        format!("{:.1} TB", size as f64 / TB as f64)
    } else if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// Render one line per entry, in the order given.
///
/// With an `index_domain`, sized files and folders also get a link into the
/// web index; folder links end in `/`.
pub fn generate_files_list_message(
    entries: &[AnnotatedEntry],
    index_domain: Option<&str>,
) -> String {
    if entries.is_empty() {
        return NO_FILES_MESSAGE.to_string();
    }

    let index_domain = index_domain.filter(|d| !d.is_empty());
    let mut message = String::new();

    for annotated in entries {
        let entry = &annotated.entry;
        message.push_str(&format!(
            "<a href = '{}'>{}</a>",
            annotated.url,
            escape_html(&entry.name)
        ));

        if let Some(size) = entry.size {
            message.push_str(&format!(" ({})", format_size(size)));
            if let Some(domain) = index_domain {
                message.push_str(&index_link(domain, &entry.name, ""));
            }
        } else if entry.is_folder() {
            message.push_str(" (folder)");
            if let Some(domain) = index_domain {
                message.push_str(&index_link(domain, &entry.name, "/"));
            }
        }

        message.push('\n');
    }

    message
}

fn index_link(domain: &str, name: &str, suffix: &str) -> String {
    format!(
        " | <a href=\"{}{}{}\">Index URL</a>",
        domain,
        utf8_percent_encode(name, INDEX_NAME),
        suffix
    )
}

/// Escape the characters that would break HTML parse mode.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
