//! Named parameter bindings.
//!
//! Constructing the map from call-site arguments is the caller's job; the
//! rewriter only consumes a plain name -> value mapping.

use std::collections::HashMap;

use crate::ast::ParamValue;

/// Parameter bindings for one invocation.
///
/// Immutable for the duration of a rewrite. A name bound to `Null` and a name
/// that was never bound are treated identically: both mean "not provided" and
/// prune the predicates that reference them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style bind.
    ///
    /// ```
    /// use dynq::params::Params;
    /// let params = Params::new().bind("name", "alice").bind("age", 30);
    /// ```
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a provided value. Names match exactly (case-sensitive);
    /// `Null` bindings come back as `None`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_binding_is_absent() {
        let params = Params::new().bind("a", 1).bind("b", ParamValue::Null);
        assert!(params.get("a").is_some());
        assert!(params.get("b").is_none());
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let params = Params::new().bind("userId", 7);
        assert!(params.get("userId").is_some());
        assert!(params.get("userid").is_none());
    }

    #[test]
    fn test_option_binding() {
        let params = Params::new().bind("x", Option::<i64>::None).bind("y", Some(2i64));
        assert!(params.get("x").is_none());
        assert_eq!(params.get("y"), Some(&ParamValue::Int(2)));
    }
}
