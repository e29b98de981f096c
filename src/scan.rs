//! Delimiter scanning over solver-output text.
//!
//! [`scan`] is the lexical primitive the rest of the crate is built on: it
//! splits text at the next *qualifying* occurrence of a target character,
//! where qualifying means not backslash-escaped, not inside a double-quoted
//! string, and (when parens are honored) not inside any level of parentheses.

use crate::error::{ParenMismatch, ParseError};

/// Characters of context shown on each side of an offending quote.
const QUOTE_CONTEXT: usize = 5;

/// A bounded window of `text` centered on the character at `quote_pos`
/// (a char offset, so multi-byte input never splits a boundary).
pub(crate) fn quote_snippet(text: &str, quote_pos: usize) -> String {
    let start = quote_pos.saturating_sub(QUOTE_CONTEXT);
    text.chars()
        .skip(start)
        .take(quote_pos - start + QUOTE_CONTEXT)
        .collect()
}

/// Split `text` at the first qualifying occurrence of `target`.
///
/// Returns the text before the split point and `Some(rest)` with the text
/// after it (the target character itself lands in neither), or the whole
/// input and `None` when no qualifying occurrence exists.
///
/// While scanning left to right:
/// - a backslash escapes exactly the next character; escaped characters never
///   toggle quoting, never change paren depth, and never match the target;
/// - with `honor_quotes`, an unescaped `"` toggles an in-quote flag, and
///   nothing inside quotes matches the target;
/// - with `honor_parens`, unquoted `(`/`)` track nesting depth, and the
///   target only matches at depth zero. An extra `)` fails immediately.
///
/// Asking for a target that conflicts with an honored delimiter class
/// (`target == '"'` with `honor_quotes`, or a paren with `honor_parens`) is a
/// configuration error and fails regardless of the input, empty included.
///
/// `line` is the caller's diagnostic line counter; it is only copied into
/// errors.
pub fn scan<'a>(
    text: &'a str,
    target: char,
    honor_quotes: bool,
    honor_parens: bool,
    line: usize,
) -> Result<(&'a str, Option<&'a str>), ParseError> {
    if target == '"' && honor_quotes {
        return Err(ParseError::Config {
            message: "can't search for a quote character while honoring quotes".to_string(),
        });
    }
    if (target == '(' || target == ')') && honor_parens {
        return Err(ParseError::Config {
            message: "can't search for a paren character while honoring parens".to_string(),
        });
    }

    let mut in_quote = false;
    let mut escaped = false;
    let mut paren_depth: i32 = 0;
    // Char offset of the most recent quote, for error snippets.
    let mut last_quote = 0usize;

    for (pos, (idx, c)) in text.char_indices().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '"' && honor_quotes {
            in_quote = !in_quote;
            last_quote = pos;
        } else if c == '(' && honor_parens && !in_quote {
            paren_depth += 1;
        } else if c == ')' && honor_parens && !in_quote {
            paren_depth -= 1;
            if paren_depth < 0 {
                return Err(ParseError::UnbalancedParens {
                    mismatch: ParenMismatch::ExtraClosing,
                    context: text[..idx + c.len_utf8()].to_string(),
                    line,
                });
            }
        } else if c == target && !in_quote && paren_depth == 0 {
            return Ok((&text[..idx], Some(&text[idx + c.len_utf8()..])));
        }
    }

    if in_quote {
        return Err(ParseError::UnterminatedQuote {
            snippet: quote_snippet(text, last_quote),
            line,
        });
    }
    if paren_depth != 0 {
        return Err(ParseError::UnbalancedParens {
            mismatch: ParenMismatch::MissingClosing,
            context: text.to_string(),
            line,
        });
    }
    Ok((text, None))
}
