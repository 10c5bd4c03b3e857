//! Text helpers: rich-text stripping, timestamp display, asset origins.

use chrono::{DateTime, Datelike, Local};

/// Converts a rich-text (HTML) composer buffer to plain text.
///
/// `<br>` variants become newlines, every other tag is dropped, and the
/// result is trimmed. Text content is preserved verbatim; no entity
/// decoding is attempted.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        // Unterminated tag: keep the literal text, like the original markup.
        let Some(end) = after.find('>') else {
            out.push_str(after);
            rest = "";
            break;
        };
        if is_line_break(&after[1..end]) {
            out.push('\n');
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out.trim().to_string()
}

fn is_line_break(tag: &str) -> bool {
    tag.trim()
        .trim_end_matches('/')
        .trim_end()
        .eq_ignore_ascii_case("br")
}

/// Formats an ISO 8601 `received_at` timestamp for list display.
///
/// Same-day timestamps render as "HH:MM", older ones as "02 Jan". An
/// unparseable value is returned unchanged.
#[must_use]
pub fn format_received_at(iso: &str) -> String {
    format_received_at_from(iso, Local::now())
}

fn format_received_at_from(iso: &str, now: DateTime<Local>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(iso) else {
        return iso.to_string();
    };
    let local = parsed.with_timezone(&now.timezone());
    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else if local.year() == now.year() {
        local.format("%d %b").to_string()
    } else {
        local.format("%d %b %Y").to_string()
    }
}

/// Origin serving attachment downloads, derived from the page hostname.
///
/// Attachments are served by the backend's static mount on a fixed port and
/// do not go through the gateway.
#[must_use]
pub fn backend_static_origin(hostname: &str) -> String {
    format!("http://{hostname}:8000")
}
