//! Literal conversion for bound parameter values.

use crate::ast::{Literal, ParamValue};
use crate::error::{DynqError, DynqResult};

/// Convert a bound value into the literal substituted for its placeholder.
///
/// Conversion is lossless: numerics keep their full textual precision,
/// decimals their exact canonical form, temporals their ISO-8601
/// representation, and byte sequences become uppercase hex with two digits
/// per byte and no prefix. A value with no literal mapping fails with
/// `UnsupportedParameterType` naming the runtime kind.
pub fn to_literal(value: &ParamValue) -> DynqResult<Literal> {
    match value {
        ParamValue::Null => Ok(Literal::Null),
        ParamValue::Bool(b) => Ok(Literal::Bool(*b)),
        ParamValue::Int(n) => Ok(Literal::Int(*n)),
        ParamValue::Float(f) => Ok(Literal::Float(*f)),
        ParamValue::Decimal(d) => Ok(Literal::Decimal(*d)),
        ParamValue::Text(s) => Ok(Literal::String(s.clone())),
        ParamValue::Date(d) => Ok(Literal::Date(*d)),
        ParamValue::Time(t) => Ok(Literal::Time(*t)),
        ParamValue::DateTime(dt) => Ok(Literal::DateTime(*dt)),
        ParamValue::Bytes(b) => Ok(Literal::Hex(bytes_to_hex(b))),
        ParamValue::Uuid(u) => Ok(Literal::Uuid(*u)),
        ParamValue::Json(_) => Err(DynqError::UnsupportedParameterType(
            value.kind().to_string(),
        )),
    }
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02X}", b));
    }
    out
}
