//! Statement-type dispatch: routes the rewriter to the prunable
//! sub-expressions of each statement kind.

use super::{Outcome, Rewriter};
use crate::ast::{Assignment, Delete, Expr, Insert, InsertSource, Select, Statement, Update};
use crate::error::{DynqError, DynqResult};
use crate::params::Params;

/// Apply one invocation's parameters to a statement working copy.
pub fn rewrite_statement(statement: Statement, params: &Params) -> DynqResult<Statement> {
    let rewriter = Rewriter::new(params);
    match statement {
        Statement::Select(select) => Ok(Statement::Select(rewrite_select(select, &rewriter)?)),
        Statement::Update(update) => {
            Ok(Statement::Update(rewrite_update(update, &rewriter, params)?))
        }
        Statement::Insert(insert) => {
            Ok(Statement::Insert(rewrite_insert(insert, &rewriter, params)?))
        }
        Statement::Delete(delete) => Ok(Statement::Delete(rewrite_delete(delete, &rewriter)?)),
    }
}

fn rewrite_filter(filter: Option<Expr>, rewriter: &Rewriter) -> DynqResult<Option<Expr>> {
    match filter {
        None => Ok(None),
        Some(expr) => Ok(match rewriter.rewrite(expr)? {
            Outcome::Kept(e) => Some(e),
            // the whole filter pruned away: the statement has no WHERE at all
            Outcome::Pruned => None,
        }),
    }
}

fn rewrite_select(mut select: Select, rewriter: &Rewriter) -> DynqResult<Select> {
    select.filter = rewrite_filter(select.filter, rewriter)?;
    Ok(select)
}

fn rewrite_update(mut update: Update, rewriter: &Rewriter, params: &Params) -> DynqResult<Update> {
    update.filter = rewrite_filter(update.filter, rewriter)?;

    // An assignment whose value parameter is unbound drops whole; see
    // DESIGN.md. An UPDATE where every assignment dropped is refused.
    let mut kept = Vec::with_capacity(update.assignments.len());
    for assignment in update.assignments {
        if let Expr::Placeholder(name) = &assignment.value {
            if params.get(name).is_none() {
                continue;
            }
        }
        match rewriter.rewrite(assignment.value)? {
            Outcome::Kept(value) => kept.push(Assignment {
                column: assignment.column,
                value,
            }),
            Outcome::Pruned => {}
        }
    }
    if kept.is_empty() {
        return Err(DynqError::EmptyAssignments {
            table: update.table,
        });
    }
    update.assignments = kept;
    Ok(update)
}

fn rewrite_insert(mut insert: Insert, rewriter: &Rewriter, params: &Params) -> DynqResult<Insert> {
    insert.source = match insert.source {
        InsertSource::Values(values) => {
            let mut rewritten = Vec::with_capacity(values.len());
            for (index, value) in values.into_iter().enumerate() {
                // a dropped tuple element would silently desync the column
                // list, so an unbound element fails fast instead
                let placeholder = match &value {
                    Expr::Placeholder(name) => Some(name.clone()),
                    _ => None,
                };
                if let Some(name) = &placeholder {
                    if params.get(name).is_none() {
                        return Err(DynqError::UnboundInsertValue {
                            name: name.clone(),
                            column: insert.columns.get(index).cloned().unwrap_or_default(),
                        });
                    }
                }
                match rewriter.rewrite(value)? {
                    Outcome::Kept(e) => rewritten.push(e),
                    Outcome::Pruned => {
                        return Err(DynqError::UnboundInsertValue {
                            name: placeholder.unwrap_or_default(),
                            column: insert.columns.get(index).cloned().unwrap_or_default(),
                        })
                    }
                }
            }
            InsertSource::Values(rewritten)
        }
        InsertSource::Select(select) => {
            InsertSource::Select(Box::new(rewrite_select(*select, rewriter)?))
        }
    };
    Ok(insert)
}

fn rewrite_delete(mut delete: Delete, rewriter: &Rewriter) -> DynqResult<Delete> {
    delete.filter = rewrite_filter(delete.filter, rewriter)?;
    Ok(delete)
}
