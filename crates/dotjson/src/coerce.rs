//! Permissive scalar accessors and collection views.
//!
//! None of these fail. A value of the wrong kind yields the zero value of
//! the requested type (`0`, `false`, an empty map or slice), so absence and
//! a stored zero look the same through this API. Use [`Value::has`] or
//! [`Value::gets`] when the difference matters.

use std::borrow::Cow;

use crate::value::{Map, Value, EMPTY_OBJECT};

impl Value {
    /// Strings verbatim; every other kind as compact JSON text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// [`as_f64`](Self::as_f64) truncated toward zero, saturating at the
    /// `i64` bounds.
    pub fn as_i64(&self) -> i64 {
        self.as_f64() as i64
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Entries of an object, or an empty map for any other kind.
    pub fn object_view(&self) -> &Map {
        match self {
            Value::Object(map) => map,
            _ => &EMPTY_OBJECT,
        }
    }

    /// Elements of an array, or an empty slice for any other kind.
    pub fn array_view(&self) -> &[Value] {
        match self {
            Value::Array(items) => items,
            _ => &[],
        }
    }

    /// Text of every array element joined by `sep`; `""` for non-arrays.
    pub fn join(&self, sep: &str) -> String {
        self.array_view()
            .iter()
            .map(Value::as_text)
            .collect::<Vec<_>>()
            .join(sep)
    }
}
