//! Statement rendering for the two execution backends.
//!
//! The relational path serializes the rewritten AST back to SQL text and
//! passes it through unchanged; the document-store path translates it into
//! mongo-shell call syntax and is the only place `Translation` errors arise.

pub mod mongo;
pub mod sql;


pub use mongo::ToMongo;

/// Trait for converting AST nodes to SQL text.
pub trait ToSql {
    fn to_sql(&self) -> String;
}
