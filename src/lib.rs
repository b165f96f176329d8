//! Dynamic query template engine.
//!
//! A caller declares a parameterized query template once; per invocation the
//! engine prunes every predicate whose named parameter (`:name`) is absent or
//! null, substitutes literals for the rest, and hands the rewritten statement
//! to a relational or document-store backend.
//!
//! ```text
//! template text + params
//!       │
//!       ▼
//! normalize ── cache hit? ──▶ deep copy ──▶ rewrite ──▶ render ──▶ backend rows
//!       │           │                                                  │
//!       └── parse ──┘                                            materialize
//! ```

pub mod ast;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod materialize;
pub mod params;
pub mod parser;
pub mod rewrite;
pub mod transpiler;

pub use parser::parse;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::{CacheConfig, EngineConfig};
    pub use crate::engine::{Backend, Executor, QueryEngine, Row};
    pub use crate::error::{DynqError, DynqResult};
    pub use crate::materialize::{Cardinality, QueryOutput};
    pub use crate::params::Params;
    pub use crate::parser::parse;
    pub use crate::transpiler::{ToMongo, ToSql};
}
