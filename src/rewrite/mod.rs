//! The core pruning/substitution algorithm.
//!
//! A rewrite walks an expression tree bottom-up against one invocation's
//! parameter map. Predicates whose parameter is absent (or bound to null)
//! prune away; the rest get their placeholders replaced by literals.

pub mod convert;
pub mod statement;

#[cfg(test)]
mod tests;

pub use statement::rewrite_statement;

use crate::ast::Expr;
use crate::error::DynqResult;
use crate::params::Params;
use convert::to_literal;

/// Result of rewriting one expression subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Kept(Expr),
    /// The subtree contributes nothing to the statement.
    Pruned,
}

/// Rewrites expression trees against a fixed parameter map.
///
/// Single-threaded and synchronous; consumes the working copy it is given.
/// Rewriting an already-rewritten tree with the same map is a no-op.
pub struct Rewriter<'a> {
    params: &'a Params,
}

impl<'a> Rewriter<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self { params }
    }

    pub fn rewrite(&self, expr: Expr) -> DynqResult<Outcome> {
        match expr {
            Expr::And(left, right) => self.connective(*left, *right, Expr::and),
            Expr::Or(left, right) => self.connective(*left, *right, Expr::or),

            Expr::Comparison { op, left, right } => {
                let left = match self.resolve(*left)? {
                    Some(e) => e,
                    None => return Ok(Outcome::Pruned),
                };
                let right = match self.resolve(*right)? {
                    Some(e) => e,
                    None => return Ok(Outcome::Pruned),
                };
                Ok(Outcome::Kept(Expr::comparison(op, left, right)))
            }

            Expr::Like { left, right } => {
                let left = match self.resolve(*left)? {
                    Some(e) => e,
                    None => return Ok(Outcome::Pruned),
                };
                let right = match self.resolve(*right)? {
                    Some(e) => e,
                    None => return Ok(Outcome::Pruned),
                };
                Ok(Outcome::Kept(Expr::Like {
                    left: Box::new(left),
                    right: Box::new(right),
                }))
            }

            // never emit a half-bound BETWEEN: either bound absent prunes it all
            Expr::Between {
                subject,
                start,
                end,
            } => {
                let start = match self.resolve(*start)? {
                    Some(e) => e,
                    None => return Ok(Outcome::Pruned),
                };
                let end = match self.resolve(*end)? {
                    Some(e) => e,
                    None => return Ok(Outcome::Pruned),
                };
                Ok(Outcome::Kept(Expr::Between {
                    subject,
                    start: Box::new(start),
                    end: Box::new(end),
                }))
            }

            Expr::In { subject, list } => {
                let mut kept = Vec::with_capacity(list.len());
                for element in list {
                    match element {
                        Expr::Placeholder(name) => match self.params.get(&name) {
                            Some(value) => kept.push(Expr::Literal(to_literal(value)?)),
                            // absent element drops; the rest keep their order
                            None => {}
                        },
                        other => kept.push(other),
                    }
                }
                if kept.is_empty() {
                    // never emit IN ()
                    Ok(Outcome::Pruned)
                } else {
                    Ok(Outcome::Kept(Expr::In { subject, list: kept }))
                }
            }

            // Bare placeholder outside a prunable context: substitute when
            // bound; otherwise pass through unresolved for the backend to
            // reject. See DESIGN.md.
            Expr::Placeholder(name) => match self.params.get(&name) {
                Some(value) => Ok(Outcome::Kept(Expr::Literal(to_literal(value)?))),
                None => Ok(Outcome::Kept(Expr::Placeholder(name))),
            },

            other @ (Expr::Literal(_) | Expr::Column(_)) => Ok(Outcome::Kept(other)),
        }
    }

    /// A pruned branch means "no constraint", not "always false": the
    /// surviving side comes back unchanged, identically for AND and OR.
    fn connective(
        &self,
        left: Expr,
        right: Expr,
        rebuild: fn(Expr, Expr) -> Expr,
    ) -> DynqResult<Outcome> {
        match (self.rewrite(left)?, self.rewrite(right)?) {
            (Outcome::Pruned, Outcome::Pruned) => Ok(Outcome::Pruned),
            (Outcome::Kept(side), Outcome::Pruned) | (Outcome::Pruned, Outcome::Kept(side)) => {
                Ok(Outcome::Kept(side))
            }
            (Outcome::Kept(l), Outcome::Kept(r)) => Ok(Outcome::Kept(rebuild(l, r))),
        }
    }

    /// Resolve one comparison/LIKE/BETWEEN operand: placeholders become
    /// literals when bound and `None` when absent; anything else passes
    /// through.
    fn resolve(&self, expr: Expr) -> DynqResult<Option<Expr>> {
        match expr {
            Expr::Placeholder(name) => match self.params.get(&name) {
                Some(value) => Ok(Some(Expr::Literal(to_literal(value)?))),
                None => Ok(None),
            },
            other => Ok(Some(other)),
        }
    }
}
