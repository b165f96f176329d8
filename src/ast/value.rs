use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A runtime value bound to a named placeholder for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Explicit NULL. Indistinguishable from an unbound name: the predicate prunes.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Arbitrary-precision numeric, kept in its canonical textual form.
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    /// Structured JSON. Arrays and objects have no literal form; rewriting
    /// fails with `UnsupportedParameterType` naming the kind.
    Json(serde_json::Value),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Name of the runtime kind, used in `UnsupportedParameterType` messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Decimal(_) => "decimal",
            ParamValue::Text(_) => "text",
            ParamValue::Date(_) => "date",
            ParamValue::Time(_) => "time",
            ParamValue::DateTime(_) => "datetime",
            ParamValue::Bytes(_) => "bytes",
            ParamValue::Uuid(_) => "uuid",
            ParamValue::Json(v) => match v {
                serde_json::Value::Null => "json null",
                serde_json::Value::Bool(_) => "json bool",
                serde_json::Value::Number(_) => "json number",
                serde_json::Value::String(_) => "json string",
                serde_json::Value::Array(_) => "json array",
                serde_json::Value::Object(_) => "json object",
            },
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Float(n)
    }
}

impl From<Decimal> for ParamValue {
    fn from(d: Decimal) -> Self {
        ParamValue::Decimal(d)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(d: NaiveDate) -> Self {
        ParamValue::Date(d)
    }
}

impl From<NaiveTime> for ParamValue {
    fn from(t: NaiveTime) -> Self {
        ParamValue::Time(t)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(dt: NaiveDateTime) -> Self {
        ParamValue::DateTime(dt)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(b: Vec<u8>) -> Self {
        ParamValue::Bytes(b)
    }
}

impl From<&[u8]> for ParamValue {
    fn from(b: &[u8]) -> Self {
        ParamValue::Bytes(b.to_vec())
    }
}

impl From<Uuid> for ParamValue {
    fn from(u: Uuid) -> Self {
        ParamValue::Uuid(u)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ParamValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    ParamValue::Float(f)
                } else {
                    ParamValue::Json(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => ParamValue::Text(s),
            other => ParamValue::Json(other),
        }
    }
}

/// A literal substituted into the statement in place of a placeholder,
/// or written directly in the template text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    /// Decimal literal; rendered with the full textual precision of the source value.
    Float(f64),
    Decimal(Decimal),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// Uppercase hex, exactly two digits per byte, no separators, no prefix.
    Hex(String),
    Uuid(Uuid),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(n) => write!(f, "{}", n),
            // {:?} keeps the shortest round-trip form and never drops the
            // fractional part (3.0 stays "3.0", not "3")
            Literal::Float(n) => write!(f, "{:?}", n),
            Literal::Decimal(d) => write!(f, "{}", d),
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Date(d) => write!(f, "DATE '{}'", d.format("%Y-%m-%d")),
            Literal::Time(t) => write!(f, "TIME '{}'", t.format("%H:%M:%S%.f")),
            Literal::DateTime(dt) => {
                write!(f, "TIMESTAMP '{}'", dt.format("%Y-%m-%dT%H:%M:%S%.f"))
            }
            Literal::Hex(h) => write!(f, "{}", h),
            Literal::Uuid(u) => write!(f, "'{}'", u),
        }
    }
}
