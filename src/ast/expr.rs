use serde::{Deserialize, Serialize};

use crate::ast::Literal;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// Equal (=)
    Eq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
}

impl CompareOp {
    /// Returns the SQL symbol for this operator.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }

    /// The operator with its operands swapped (`a < b` == `b > a`).
    pub fn mirrored(&self) -> CompareOp {
        match self {
            CompareOp::Eq => CompareOp::Eq,
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::Gte => CompareOp::Lte,
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Lte => CompareOp::Gte,
        }
    }
}

/// A filter/value expression node.
///
/// Trees are tree-shaped: every node has exactly one owner, so a statement's
/// working copy can be rewritten by consuming it without touching the cached
/// template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    /// Named placeholder (`:name`), bound by exact case-sensitive name match.
    Placeholder(String),
    /// Column reference, possibly qualified (`t.col`).
    Column(String),
    Comparison {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Like {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Between {
        subject: Box<Expr>,
        start: Box<Expr>,
        end: Box<Expr>,
    },
    In {
        subject: Box<Expr>,
        list: Vec<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Expr {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn comparison(op: CompareOp, left: Expr, right: Expr) -> Expr {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True if any node in this subtree is still an unresolved placeholder.
    pub fn has_placeholder(&self) -> bool {
        match self {
            Expr::Literal(_) | Expr::Column(_) => false,
            Expr::Placeholder(_) => true,
            Expr::Comparison { left, right, .. } | Expr::Like { left, right } => {
                left.has_placeholder() || right.has_placeholder()
            }
            Expr::Between {
                subject,
                start,
                end,
            } => subject.has_placeholder() || start.has_placeholder() || end.has_placeholder(),
            Expr::In { subject, list } => {
                subject.has_placeholder() || list.iter().any(Expr::has_placeholder)
            }
            Expr::And(l, r) | Expr::Or(l, r) => l.has_placeholder() || r.has_placeholder(),
        }
    }
}
