//! Decoding and encoding of predicate names.
//!
//! On the wire a name is either a bare run of characters or a double-quoted
//! string where `\\` and `\"` are the only recognized escapes. [`decode`]
//! strips the structural quotes and resolves escapes; [`encode`] is the
//! inverse used when rendering a predicate back to text.

use std::borrow::Cow;

use crate::error::ParseError;
use crate::scan::quote_snippet;

/// Decode a raw scanned name into its canonical unescaped form.
///
/// Unescaped quotes toggle an in-quote flag and are dropped (they are
/// structural, not literal). `\\` and `\"` produce a single literal `\` or
/// `"`; a backslash before any other character is kept verbatim as the
/// two-character sequence. Everything else passes through unchanged,
/// regardless of quote state. So the raw name
///
/// ```text
/// foo"()\"\\"bar
/// ```
///
/// decodes to `foo()"\bar`.
pub fn decode(raw: &str) -> Result<String, ParseError> {
    decode_at(raw, 0)
}

/// [`decode`] with the caller's diagnostic line number for error reports.
pub(crate) fn decode_at(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut in_quote = false;
    let mut escaped = false;
    let mut last_quote = 0usize;

    for (pos, c) in raw.chars().enumerate() {
        if escaped {
            escaped = false;
            match c {
                '\\' | '"' => out.push(c),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            in_quote = !in_quote;
            last_quote = pos;
        } else {
            out.push(c);
        }
    }

    if in_quote {
        return Err(ParseError::UnterminatedQuote {
            snippet: quote_snippet(raw, last_quote),
            line,
        });
    }
    Ok(out)
}

/// Encode a canonical name for rendering.
///
/// Names containing none of space, `(`, `)`, `\`, `"` are returned unchanged;
/// anything else is double-quoted with backslashes and quotes escaped.
pub fn encode(name: &str) -> Cow<'_, str> {
    let needs_quoting = name
        .chars()
        .any(|c| matches!(c, ' ' | '(' | ')' | '\\' | '"'));
    if !needs_quoting {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    Cow::Owned(out)
}
