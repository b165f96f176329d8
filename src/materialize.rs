//! Row-to-value mapping and the result cardinality contract.

use serde::de::DeserializeOwned;

use crate::error::{DynqError, DynqResult};

/// A backend result row: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// How many results the caller declared the query to produce.
///
/// `Single` means "at most one": zero rows is a valid outcome and maps to
/// `None`, never an error. `Collection` returns every row in backend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Collection,
}

/// Typed query output, shaped by the declared [`Cardinality`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput<T> {
    Single(Option<T>),
    Collection(Vec<T>),
}

impl<T> QueryOutput<T> {
    /// The single result, if this output carries one.
    pub fn into_single(self) -> Option<T> {
        match self {
            QueryOutput::Single(value) => value,
            QueryOutput::Collection(mut values) => {
                if values.is_empty() {
                    None
                } else {
                    Some(values.remove(0))
                }
            }
        }
    }

    /// All results as a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            QueryOutput::Single(value) => value.into_iter().collect(),
            QueryOutput::Collection(values) => values,
        }
    }
}

/// Map raw backend rows into typed output under the declared cardinality.
pub fn materialize<T: DeserializeOwned>(
    rows: Vec<Row>,
    cardinality: Cardinality,
) -> DynqResult<QueryOutput<T>> {
    match cardinality {
        Cardinality::Single => {
            let first = match rows.into_iter().next() {
                Some(row) => Some(map_row(row)?),
                None => None,
            };
            Ok(QueryOutput::Single(first))
        }
        Cardinality::Collection => {
            let mut values = Vec::new();
            for row in rows {
                values.push(map_row(row)?);
            }
            Ok(QueryOutput::Collection(values))
        }
    }
}

fn map_row<T: DeserializeOwned>(row: Row) -> DynqResult<T> {
    serde_json::from_value(serde_json::Value::Object(row)).map_err(|e| {
        DynqError::Mapping(format!(
            "cannot map row into {}: {}",
            std::any::type_name::<T>(),
            e
        ))
    })
}
