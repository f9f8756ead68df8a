//! # textform
//!
//! Spreadsheet text functions behind a formula evaluation facade.
//!
//! This crate provides:
//! - The spreadsheet text vocabulary (CONCAT, FIND, LEFT, MID, SUBSTITUTE,
//!   TRIM, ...) as pure, independently callable functions ([`text`])
//! - Argument coercion from loosely-typed operands ([`coerce`])
//! - A function table binding each function by name with its arity rules
//!   ([`function_table`])
//! - [`Formulas`], which compiles formula text against that table and yields
//!   reusable, typed [`Evaluable`]s
//!
//! ## Example
//!
//! ```rust
//! use textform::Formulas;
//!
//! let formulas = Formulas::new();
//! let formula = formulas
//!     .parse(r#"SUBSTITUTE(CONCAT(LEFT("Hello World",5)," World"),"World","India")"#)
//!     .unwrap();
//! assert_eq!(formula.eval_string(None).unwrap(), "Hello India");
//! ```
//!
//! Formulas may reference variables bound per evaluation:
//!
//! ```rust
//! use textform::{Formulas, Value, Variables};
//!
//! let formulas = Formulas::new();
//! let formula = formulas.parse("PROPER(name)").unwrap();
//!
//! let mut vars = Variables::default();
//! vars.insert("name".to_string(), Value::from("ada lovelace"));
//! assert_eq!(formula.eval_string(Some(&vars)).unwrap(), "Ada Lovelace");
//! ```

pub mod coerce;
pub mod table;
pub mod text;

pub use table::function_table;
pub use textform_expr::{
    ExprError, ExprResult, FunctionDef, FunctionTable, TypeCoercionError, Value, Variables,
};

use textform_expr::{evaluate, parse, EvalContext, Expr};

/// Evaluation facade: a function table plus the compiler entry point.
///
/// Build one per process (the table is constructed once and never mutates)
/// and share it freely; parsing and evaluation take `&self` and are safe to
/// run concurrently.
pub struct Formulas {
    table: FunctionTable,
}

impl Formulas {
    /// Facade over the standard text-function table
    pub fn new() -> Self {
        Self {
            table: table::function_table(),
        }
    }

    /// Facade over a caller-supplied function table
    pub fn with_table(table: FunctionTable) -> Self {
        Self { table }
    }

    /// The table formulas compile against
    pub fn table(&self) -> &FunctionTable {
        &self.table
    }

    /// Compile formula text into a reusable [`Evaluable`]
    ///
    /// Fails with [`ExprError::Parse`] on malformed text. Function names are
    /// resolved at evaluation time, so an unknown name parses but fails to
    /// evaluate.
    pub fn parse(&self, formula: &str) -> ExprResult<Evaluable<'_>> {
        let expr = parse(formula)?;
        Ok(Evaluable {
            expr,
            table: &self.table,
        })
    }
}

impl Default for Formulas {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled formula, queryable for a typed result.
///
/// Holds no per-evaluation state; one evaluable may be evaluated any number
/// of times, concurrently, each call against its own variable bindings.
pub struct Evaluable<'a> {
    expr: Expr,
    table: &'a FunctionTable,
}

impl Evaluable<'_> {
    /// Evaluate to the raw value
    pub fn eval(&self, variables: Option<&Variables>) -> ExprResult<Value> {
        let ctx = match variables {
            Some(vars) => EvalContext::with_variables(self.table, vars),
            None => EvalContext::new(self.table),
        };
        evaluate(&self.expr, &ctx)
    }

    /// Evaluate and render the result as text
    ///
    /// Numbers render canonically (`42`, `3.1416`), booleans as
    /// `TRUE`/`FALSE`.
    pub fn eval_string(&self, variables: Option<&Variables>) -> ExprResult<String> {
        Ok(self.eval(variables)?.as_text())
    }

    /// Evaluate to a float; a non-numeric result is an evaluation error
    pub fn eval_float(&self, variables: Option<&Variables>) -> ExprResult<f64> {
        let value = self.eval(variables)?;
        value.as_number().ok_or_else(|| {
            ExprError::Evaluation(format!("Expected numeric result, got {} value", value.kind()))
        })
    }

    /// Evaluate to a boolean; numeric results follow the nonzero convention,
    /// text is an evaluation error
    pub fn eval_bool(&self, variables: Option<&Variables>) -> ExprResult<bool> {
        let value = self.eval(variables)?;
        value.as_bool().ok_or_else(|| {
            ExprError::Evaluation(format!("Expected boolean result, got {} value", value.kind()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_on_malformed_text() {
        let formulas = Formulas::new();
        assert!(matches!(
            formulas.parse("LEFT(\"Hello\""),
            Err(ExprError::Parse(_))
        ));
    }

    #[test]
    fn test_evaluable_is_reusable() {
        let formulas = Formulas::new();
        let formula = formulas.parse("UPPER(word)").unwrap();

        for word in ["alpha", "beta"] {
            let mut vars = Variables::default();
            vars.insert("word".to_string(), Value::from(word));
            assert_eq!(
                formula.eval_string(Some(&vars)).unwrap(),
                word.to_uppercase()
            );
        }
    }

    #[test]
    fn test_eval_float_rejects_text_result() {
        let formulas = Formulas::new();
        let formula = formulas.parse("\"Hello\"").unwrap();
        assert!(matches!(
            formula.eval_float(None),
            Err(ExprError::Evaluation(_))
        ));
    }

    #[test]
    fn test_with_table_dependency_injection() {
        let formulas = Formulas::with_table(FunctionTable::new());
        let formula = formulas.parse("LEN(\"abc\")").unwrap();
        assert!(matches!(
            formula.eval(None),
            Err(ExprError::UnknownFunction(_))
        ));
    }
}
