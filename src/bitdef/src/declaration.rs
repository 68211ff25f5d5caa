//! Bitfield declaration text parsing
//!
//! Declarations look like C bitfield structs:
//!
//! ```text
//! typedef struct {
//!     unsigned int mode : 3;   // lowest bits
//!     int level : 5;
//! } Status;
//! ```
//!
//! Parsing is deliberately loose. Lines that are not exactly `decl : width`
//! are skipped, and the last word before the colon is the field name, so
//! type keywords like `unsigned int` fall away.

use crate::definition::{Definition, FieldDefinition};

/// Return the text between the first `{` and the first `}`
///
/// A missing `{` puts the start at position 0, a missing `}` puts the end at
/// the end of the text. The returned slice excludes both boundary positions,
/// so without a `{` the first character is dropped. Braces are not matched
/// by depth; nested blocks stop at the first `}`.
pub fn strip_outer_braces(text: &str) -> &str {
    let start = match text.find('{') {
        Some(open) => open + 1,
        None => text.chars().next().map_or(0, char::len_utf8),
    };
    let end = text.find('}').unwrap_or(text.len());

    if end <= start {
        return "";
    }
    &text[start..end]
}

/// Infer a definition name from the identifier after the last `}`
///
/// Spaces and line breaks are removed first, so `} \n Status ;` still yields
/// `Status`. Returns an empty string when there is no `}` or no identifier.
pub fn infer_definition_name(text: &str) -> String {
    let compact: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\r'))
        .collect();

    let Some(brace) = compact.rfind('}') else {
        return String::new();
    };

    compact[brace + 1..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Remove `//` line comments and `/* ... */` block comments
///
/// Block comments end at the first `*/`. Line breaks inside a block comment
/// are kept so every remaining line stays on its own line.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '/' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('/') => {
                // Line comment: drop everything up to (not including) the newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            Some('*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Parse a declaration body (already passed through [`strip_outer_braces`])
///
/// Produces one field per `name : width` line in source order. Malformed
/// lines are skipped without error.
pub fn parse(body: &str) -> Definition {
    let cleaned = strip_comments(body);

    cleaned
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<FieldDefinition> {
    let line = line.replace(';', "");

    let mut parts = line.split(':');
    let (Some(declarator), Some(width), None) = (parts.next(), parts.next(), parts.next()) else {
        tracing::debug!(line = %line.trim(), "skipping line without a single ':'");
        return None;
    };

    let width = match width.trim().parse::<u32>() {
        Ok(width) if width >= 1 => width,
        _ => {
            tracing::debug!(width = %width.trim(), "skipping field with invalid bit width");
            return None;
        }
    };

    let Some(name) = declarator.split_whitespace().next_back() else {
        tracing::debug!(line = %line.trim(), "skipping field without a name");
        return None;
    };

    FieldDefinition::new(name, width).ok()
}
