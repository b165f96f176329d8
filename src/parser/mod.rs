//! Query template parser using nom.
//!
//! Accepts standard single-table SELECT/INSERT/UPDATE/DELETE templates with
//! WHERE, JOIN, ORDER BY, and named placeholders written as `:name`:
//!
//! ```text
//! SELECT id, name FROM users WHERE age > :min_age AND city = :city
//! ```
//!
//! Parsing is pure and deterministic: the same text always yields the same
//! AST, which is what makes cached templates safe to share.

pub mod expressions;
pub mod statements;
pub mod tokens;


use crate::ast::{InsertSource, Statement};
use crate::error::{DynqError, DynqResult};
use statements::parse_statement;

/// Parse a complete query template.
pub fn parse(input: &str) -> DynqResult<Statement> {
    let input = input.trim();

    match parse_statement(input) {
        Ok((remaining, statement)) => {
            let rest = remaining
                .trim_start()
                .strip_prefix(';')
                .map(str::trim_start)
                .unwrap_or_else(|| remaining.trim_start());
            if !rest.is_empty() {
                return Err(DynqError::parse(
                    input.len() - rest.len(),
                    format!("Unexpected trailing content: '{}'", snippet(rest)),
                ));
            }
            check_insert_arity(&statement)?;
            Ok(statement)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(DynqError::parse(
            input.len() - e.input.len(),
            format!("Unexpected input near '{}'", snippet(e.input)),
        )),
        Err(nom::Err::Incomplete(_)) => {
            Err(DynqError::parse(input.len(), "Incomplete input"))
        }
    }
}

/// A VALUES tuple that does not line up with its column list is rejected at
/// parse time, before any parameter is ever bound.
fn check_insert_arity(statement: &Statement) -> DynqResult<()> {
    if let Statement::Insert(insert) = statement {
        if let InsertSource::Values(values) = &insert.source {
            if insert.columns.len() != values.len() {
                return Err(DynqError::parse(
                    0,
                    format!(
                        "INSERT into '{}' has {} columns but {} values",
                        insert.table,
                        insert.columns.len(),
                        values.len()
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn snippet(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(24)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}
