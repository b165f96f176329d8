pub mod expr;
pub mod statement;
pub mod value;

pub use self::expr::{CompareOp, Expr};
pub use self::statement::{
    Assignment, Delete, Insert, InsertSource, Join, JoinKind, OrderBy, Select, SortOrder,
    Statement, Update,
};
pub use self::value::{Literal, ParamValue};
