//! Topical view rendering of the opaque topic catalog.
//!
//! Objects become labeled nested lists, arrays become items, and strings
//! ending in `.pdf` become links. Key order follows the source document.

use crate::render::html::escape_html;
use crate::repo::catalog_repo::TopicCatalog;
use serde_json::Value;

pub(crate) fn render_topics(out: &mut String, topics: &TopicCatalog) {
    out.push_str("<section class=\"topical\">\n");
    let has_content = match topics {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Null => false,
        _ => true,
    };
    if has_content {
        render_value(out, topics);
    } else {
        out.push_str("<p class=\"empty\">No topical papers available.</p>\n");
    }
    out.push_str("</section>\n");
}

fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            out.push_str("<ul>\n");
            for (key, child) in map {
                out.push_str(&format!(
                    "<li><span class=\"topic\">{}</span>\n",
                    escape_html(key)
                ));
                render_value(out, child);
                out.push_str("</li>\n");
            }
            out.push_str("</ul>\n");
        }
        Value::Array(items) => {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str("<li>");
                render_value(out, item);
                out.push_str("</li>\n");
            }
            out.push_str("</ul>\n");
        }
        Value::String(text) if text.ends_with(".pdf") && is_linkable(text) => {
            let label = text.rsplit('/').next().unwrap_or(text);
            out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\">{}</a>",
                escape_html(text),
                escape_html(label)
            ));
        }
        Value::String(text) => out.push_str(&escape_html(text)),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::Bool(flag) => out.push_str(if *flag { "yes" } else { "no" }),
        Value::Null => {}
    }
}

/// Only relative paths and plain http(s) URLs become links.
fn is_linkable(target: &str) -> bool {
    let lower = target.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return true;
    }
    let before_path = lower.split(['/', '?', '#']).next().unwrap_or("");
    !lower.starts_with("//") && !lower.starts_with('\\') && !before_path.contains(':')
}
