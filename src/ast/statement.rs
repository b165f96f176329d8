use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// A parsed query template. One of the four single-table statement forms.
///
/// A cached `Statement` is a read-only template; rewriting always operates on
/// a private clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(Select),
    Update(Update),
    Insert(Insert),
    Delete(Delete),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub table: String,
    /// Projected columns; `["*"]` selects everything.
    pub columns: Vec<String>,
    #[serde(default)]
    pub joins: Vec<Join>,
    pub filter: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub table: String,
    /// Ordered `column = value` pairs.
    pub assignments: Vec<Assignment>,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub source: InsertSource,
}

/// Where an INSERT gets its rows from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertSource {
    /// `VALUES (...)` — element order pairs with `Insert::columns`.
    Values(Vec<Expr>),
    /// `INSERT ... SELECT` — a nested query.
    Select(Box<Select>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub table: String,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    /// ON condition; never rewritten (it references columns, not parameters).
    pub on: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub order: SortOrder,
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl Statement {
    /// The prunable filter expression, if this statement kind has one.
    pub fn filter(&self) -> Option<&Expr> {
        match self {
            Statement::Select(s) => s.filter.as_ref(),
            Statement::Update(u) => u.filter.as_ref(),
            Statement::Delete(d) => d.filter.as_ref(),
            Statement::Insert(_) => None,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Statement::Select(s) => &s.table,
            Statement::Update(u) => &u.table,
            Statement::Insert(i) => &i.table,
            Statement::Delete(d) => &d.table,
        }
    }
}
