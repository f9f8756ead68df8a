//! Function binding and registration
//!
//! Adapts each text function into a named, arity-aware callable and installs
//! it in the [`FunctionTable`] the evaluator dispatches through. The wrappers
//! run every operand through argument coercion before the pure functions see
//! it; positions and counts truncate to integers. Optional trailing arguments
//! take their documented defaults when omitted.

use crate::coerce;
use crate::text;
use textform_expr::{ExprResult, FunctionDef, FunctionTable, Value};

fn text_arg(args: &[Value], idx: usize) -> ExprResult<String> {
    Ok(coerce::to_text(&args[idx])?)
}

fn index_arg(args: &[Value], idx: usize, default: i64) -> ExprResult<i64> {
    match args.get(idx) {
        Some(value) => Ok(coerce::to_index(value)?),
        None => Ok(default),
    }
}

/// CONCAT / CONCATENATE - both names bind here
fn fn_concat(args: &[Value]) -> ExprResult<Value> {
    Ok(Value::Text(text::concat(args)?))
}

fn fn_exact(args: &[Value]) -> ExprResult<Value> {
    let a = text_arg(args, 0)?;
    let b = text_arg(args, 1)?;
    Ok(Value::Bool(text::exact(&a, &b)))
}

/// FIND(needle, haystack, [start]) - start defaults to 1
fn fn_find(args: &[Value]) -> ExprResult<Value> {
    let needle = text_arg(args, 0)?;
    let haystack = text_arg(args, 1)?;
    let start = index_arg(args, 2, 1)?;
    Ok(Value::Int(text::find(&needle, &haystack, start)))
}

/// LEFT(text, [n]) - n defaults to 1
fn fn_left(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    let n = index_arg(args, 1, 1)?;
    Ok(Value::Text(text::left(&s, n)))
}

fn fn_len(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::Int(text::len(&s)))
}

fn fn_lower(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::Text(text::lower(&s)))
}

fn fn_mid(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    let start = index_arg(args, 1, 1)?;
    let count = index_arg(args, 2, 0)?;
    Ok(Value::Text(text::mid(&s, start, count)))
}

fn fn_proper(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::Text(text::proper(&s)))
}

fn fn_replace(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    let start = index_arg(args, 1, 1)?;
    let count = index_arg(args, 2, 0)?;
    let replacement = text_arg(args, 3)?;
    Ok(Value::Text(text::replace(&s, start, count, &replacement)))
}

fn fn_rept(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    let times = index_arg(args, 1, 0)?;
    Ok(Value::Text(text::rept(&s, times)))
}

/// RIGHT(text, [n]) - n defaults to 1
fn fn_right(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    let n = index_arg(args, 1, 1)?;
    Ok(Value::Text(text::right(&s, n)))
}

/// SEARCH(needle, haystack, [start]) - start defaults to 1
fn fn_search(args: &[Value]) -> ExprResult<Value> {
    let needle = text_arg(args, 0)?;
    let haystack = text_arg(args, 1)?;
    let start = index_arg(args, 2, 1)?;
    Ok(Value::Int(text::search(&needle, &haystack, start)))
}

/// SUBSTITUTE(src, old, new, [instance]) - instance defaults to 0 (all)
fn fn_substitute(args: &[Value]) -> ExprResult<Value> {
    let src = text_arg(args, 0)?;
    let old = text_arg(args, 1)?;
    let new = text_arg(args, 2)?;
    let instance = index_arg(args, 3, 0)?;
    Ok(Value::Text(text::substitute(&src, &old, &new, instance)))
}

fn fn_trim(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::Text(text::trim(&s)))
}

fn fn_upper(args: &[Value]) -> ExprResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::Text(text::upper(&s)))
}

/// Build the text-function table.
///
/// Constructed once at startup and shared read-only; the table never mutates
/// after this returns.
pub fn function_table() -> FunctionTable {
    let mut table = FunctionTable::new();

    table.register(FunctionDef {
        name: "CONCAT",
        min_args: 0,
        max_args: None,
        implementation: fn_concat,
    });

    // Deliberate alias for the legacy spelling, same handler
    table.register(FunctionDef {
        name: "CONCATENATE",
        min_args: 0,
        max_args: None,
        implementation: fn_concat,
    });

    table.register(FunctionDef {
        name: "EXACT",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_exact,
    });

    table.register(FunctionDef {
        name: "FIND",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_find,
    });

    table.register(FunctionDef {
        name: "LEFT",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_left,
    });

    table.register(FunctionDef {
        name: "LEN",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_len,
    });

    table.register(FunctionDef {
        name: "LOWER",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_lower,
    });

    table.register(FunctionDef {
        name: "MID",
        min_args: 3,
        max_args: Some(3),
        implementation: fn_mid,
    });

    table.register(FunctionDef {
        name: "PROPER",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_proper,
    });

    table.register(FunctionDef {
        name: "REPLACE",
        min_args: 4,
        max_args: Some(4),
        implementation: fn_replace,
    });

    table.register(FunctionDef {
        name: "REPT",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_rept,
    });

    table.register(FunctionDef {
        name: "RIGHT",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_right,
    });

    table.register(FunctionDef {
        name: "SEARCH",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_search,
    });

    table.register(FunctionDef {
        name: "SUBSTITUTE",
        min_args: 3,
        max_args: Some(4),
        implementation: fn_substitute,
    });

    table.register(FunctionDef {
        name: "TRIM",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_trim,
    });

    table.register(FunctionDef {
        name: "UPPER",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_upper,
    });

    table
}
