//! Argument coercion
//!
//! Converts loosely-typed operand values into the canonical representations
//! the text functions consume. Strings pass through unchanged, integers
//! format base-10, floats use the shortest round-trip decimal form. Anything
//! else fails with a [`TypeCoercionError`] naming the offending kind.

use textform_expr::{TypeCoercionError, Value};

/// Canonical text form of a value.
///
/// `3.1416` stringifies as `"3.1416"`, never `"3.141600"` or `"3.1416e0"`.
pub fn to_text(value: &Value) -> Result<String, TypeCoercionError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(format!("{}", f)),
        Value::Bool(_) => Err(TypeCoercionError {
            kind: value.kind(),
            target: "string",
        }),
    }
}

/// Integer form of a position/count argument.
///
/// Floats truncate toward zero, they are never rounded.
pub fn to_index(value: &Value) -> Result<i64, TypeCoercionError> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(f) => Ok(f.trunc() as i64),
        Value::Text(_) | Value::Bool(_) => Err(TypeCoercionError {
            kind: value.kind(),
            target: "integer",
        }),
    }
}
