//! Parsing of solver output into predicates and answer sets.
//!
//! Input grammar (the ground output of a clingo-style solve run):
//! - a capture ends in a fixed 8-line trailer: status indicator plus
//!   uninterpreted statistics
//! - content lines are either `Answer:<n>` headers or whitespace-separated
//!   predicate terms
//! - a term is `name` or `name(term,term,...)`; names may be double-quoted
//!   with `\\` and `\"` as the only recognized escapes
//!
//! Every function threads the current content-line number through explicitly
//! so errors can point at their source and independent parses never share
//! state.

use crate::answer::AnswerSet;
use crate::error::ParseError;
use crate::name::decode_at;
use crate::predicate::Predicate;
use crate::scan::scan;
use crate::trace::{debug, info};

/// Lines of trailer at the end of a capture: the status indicator plus seven
/// statistics lines.
const TRAILER_LINES: usize = 8;

const ANSWER_PREFIX: &str = "Answer:";
const STATUS_SAT: &str = "SATISFIABLE";
const STATUS_UNSAT: &str = "UNSATISFIABLE";

/// Parse a complete solver-output capture into its answer sets, in order.
///
/// An `UNSATISFIABLE` capture yields an empty list; the absence of solutions
/// is not an error. A `SATISFIABLE` capture yields one [`AnswerSet`] per
/// content line, each tagged with the answer number from the most recent
/// `Answer:` header (0 before the first header). Any other status indicator
/// fails with [`ParseError::UnrecognizedStatus`].
pub fn parse_raw(raw: &str) -> Result<Vec<AnswerSet>, ParseError> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let content_len = lines.len().saturating_sub(TRAILER_LINES);
    let content = &lines[..content_len];
    let status = lines[content_len];

    if status == STATUS_UNSAT {
        info!("solver reported UNSATISFIABLE");
        return Ok(Vec::new());
    }
    if status != STATUS_SAT {
        return Err(ParseError::UnrecognizedStatus {
            line: status.to_string(),
        });
    }

    let mut sets = Vec::new();
    let mut answer_number: i64 = 0;
    for (idx, content_line) in content.iter().enumerate() {
        let line_no = idx + 1;
        if let Some(tail) = content_line.strip_prefix(ANSWER_PREFIX) {
            answer_number = tail.trim().parse().map_err(|_| ParseError::InvalidAnswerIndex {
                header: (*content_line).to_string(),
                line: line_no,
            })?;
        } else {
            sets.push(parse_set_at(content_line, answer_number, line_no)?);
        }
    }
    info!(sets = sets.len(), "parsed satisfiable capture");
    Ok(sets)
}

/// Parse one answer-set line into an [`AnswerSet`] tagged with `set_number`.
///
/// An empty line yields an empty set. Terms are split on unquoted spaces;
/// the split loop stops on an empty remainder, so a single trailing space
/// produces no term while doubled spaces produce an empty-named one.
pub fn parse_set(line: &str, set_number: i64) -> Result<AnswerSet, ParseError> {
    parse_set_at(line, set_number, 0)
}

fn parse_set_at(line: &str, set_number: i64, line_no: usize) -> Result<AnswerSet, ParseError> {
    if line.is_empty() {
        return Ok(AnswerSet::with_set_number(Vec::new(), set_number));
    }
    let mut predicates = Vec::new();
    let mut tail = line;
    loop {
        let (term, rest) = scan(tail, ' ', true, false, line_no)?;
        predicates.push(parse_predicate_at(term, line_no)?);
        match rest {
            Some(next) if !next.is_empty() => tail = next,
            _ => break,
        }
    }
    debug!(
        predicates = predicates.len(),
        line = line_no,
        "parsed answer set line"
    );
    Ok(AnswerSet::with_set_number(predicates, set_number))
}

/// Parse a single term into a [`Predicate`] tree.
///
/// A term without an opening paren is a leaf. A term with one must end in
/// `)`; its argument block is split on top-level commas and each piece is
/// parsed recursively.
///
/// An empty argument block (`name()`) is not special-cased: it parses as one
/// child whose term is the empty string, so the result has arity 1 with an
/// empty-named child. Callers should avoid emitting empty argument lists.
pub fn parse_predicate(term: &str) -> Result<Predicate, ParseError> {
    parse_predicate_at(term, 0)
}

fn parse_predicate_at(term: &str, line: usize) -> Result<Predicate, ParseError> {
    let (raw_name, rest) = scan(term, '(', true, false, line)?;
    let name = decode_at(raw_name, line)?;
    let Some(args) = rest else {
        return Ok(Predicate::leaf(name));
    };
    let Some(block) = args.strip_suffix(')') else {
        return Err(ParseError::MalformedPredicate {
            term: term.to_string(),
            line,
        });
    };
    let children = parse_children(block, line)?;
    Ok(Predicate::new(name, children))
}

/// Split an argument block on top-level commas and parse each piece.
fn parse_children(block: &str, line: usize) -> Result<Vec<Predicate>, ParseError> {
    let mut children = Vec::new();
    let mut tail = block;
    loop {
        let (term, rest) = scan(tail, ',', true, true, line)?;
        children.push(parse_predicate_at(term, line)?);
        match rest {
            Some(next) if !next.is_empty() => tail = next,
            _ => break,
        }
    }
    Ok(children)
}
