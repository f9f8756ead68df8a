//! # textform-expr
//!
//! Expression parser and evaluator backing textform formulas.
//!
//! This crate provides:
//! - Expression parsing (text → AST) with spreadsheet operator precedence
//! - Expression evaluation (AST → value) against an injected function table
//! - The function table and value types shared with embedding libraries
//!
//! The crate knows nothing about any particular function vocabulary; callers
//! build a [`FunctionTable`] and hand it to the evaluation context.
//!
//! ## Example
//!
//! ```rust
//! use textform_expr::{evaluate, parse, EvalContext, FunctionTable, Value};
//!
//! let table = FunctionTable::new();
//! let ast = parse("\"total: \"&(2+3)").unwrap();
//! let result = evaluate(&ast, &EvalContext::new(&table)).unwrap();
//! assert_eq!(result, Value::Text("total: 5".to_string()));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod table;
pub mod value;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{ExprError, ExprResult, TypeCoercionError};
pub use evaluator::{evaluate, EvalContext, Variables};
pub use parser::parse;
pub use table::{FunctionDef, FunctionImpl, FunctionTable};
pub use value::Value;
