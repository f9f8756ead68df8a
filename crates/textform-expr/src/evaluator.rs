//! Expression evaluator
//!
//! Evaluates expression ASTs to produce values. The evaluator owns the base
//! grammar semantics (arithmetic, comparison, `&` concatenation); everything
//! callable by name comes from the injected [`FunctionTable`].

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{ExprError, ExprResult};
use crate::table::FunctionTable;
use crate::value::Value;
use ahash::AHashMap;
use std::cmp::Ordering;

/// Per-evaluation variable bindings, name to value
pub type Variables = AHashMap<String, Value>;

/// Context for expression evaluation
///
/// Holds only borrowed, read-only state, so any number of evaluations may run
/// concurrently against the same function table.
pub struct EvalContext<'a> {
    /// Function table consulted for call nodes
    pub table: &'a FunctionTable,
    /// Optional variable bindings for this evaluation
    pub variables: Option<&'a Variables>,
}

impl<'a> EvalContext<'a> {
    /// Context with no variable bindings
    pub fn new(table: &'a FunctionTable) -> Self {
        Self {
            table,
            variables: None,
        }
    }

    /// Context with variable bindings
    pub fn with_variables(table: &'a FunctionTable, variables: &'a Variables) -> Self {
        Self {
            table,
            variables: Some(variables),
        }
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.and_then(|vars| vars.get(name))
    }
}

/// Evaluate an expression
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> ExprResult<Value> {
    match expr {
        // === Literals ===
        Expr::Int(i) => Ok(Value::Int(*i)),
        Expr::Float(f) => Ok(Value::Float(*f)),
        Expr::String(s) => Ok(Value::Text(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),

        // === Variables ===
        Expr::Variable(name) => ctx
            .lookup(name)
            .cloned()
            .ok_or_else(|| ExprError::UnknownVariable(name.clone())),

        // === Operators ===
        Expr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx),

        Expr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, ctx),

        // === Functions ===
        Expr::Call { name, args } => evaluate_call(name, args, ctx),
    }
}

fn expect_number(value: &Value) -> ExprResult<f64> {
    value.as_number().ok_or_else(|| {
        ExprError::Evaluation(format!("Expected number, got {} value", value.kind()))
    })
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    ctx: &EvalContext,
) -> ExprResult<Value> {
    let left_val = evaluate(left, ctx)?;
    let right_val = evaluate(right, ctx)?;

    match op {
        // Arithmetic operators
        BinaryOperator::Add => {
            let l = expect_number(&left_val)?;
            let r = expect_number(&right_val)?;
            Ok(Value::Float(l + r))
        }
        BinaryOperator::Subtract => {
            let l = expect_number(&left_val)?;
            let r = expect_number(&right_val)?;
            Ok(Value::Float(l - r))
        }
        BinaryOperator::Multiply => {
            let l = expect_number(&left_val)?;
            let r = expect_number(&right_val)?;
            Ok(Value::Float(l * r))
        }
        BinaryOperator::Divide => {
            let l = expect_number(&left_val)?;
            let r = expect_number(&right_val)?;
            if r == 0.0 {
                Err(ExprError::Evaluation("Division by zero".into()))
            } else {
                Ok(Value::Float(l / r))
            }
        }
        BinaryOperator::Power => {
            let l = expect_number(&left_val)?;
            let r = expect_number(&right_val)?;
            let result = l.powf(r);
            if result.is_nan() || result.is_infinite() {
                Err(ExprError::Evaluation("Numeric overflow in '^'".into()))
            } else {
                Ok(Value::Float(result))
            }
        }

        // Comparison operators
        BinaryOperator::Equal => Ok(Value::Bool(
            compare_values(&left_val, &right_val)? == Ordering::Equal,
        )),
        BinaryOperator::NotEqual => Ok(Value::Bool(
            compare_values(&left_val, &right_val)? != Ordering::Equal,
        )),
        BinaryOperator::LessThan => Ok(Value::Bool(
            compare_values(&left_val, &right_val)? == Ordering::Less,
        )),
        BinaryOperator::LessEqual => Ok(Value::Bool(
            compare_values(&left_val, &right_val)? != Ordering::Greater,
        )),
        BinaryOperator::GreaterThan => Ok(Value::Bool(
            compare_values(&left_val, &right_val)? == Ordering::Greater,
        )),
        BinaryOperator::GreaterEqual => Ok(Value::Bool(
            compare_values(&left_val, &right_val)? != Ordering::Less,
        )),

        // Concatenation
        BinaryOperator::Concat => {
            let mut s = left_val.as_text();
            s.push_str(&right_val.as_text());
            Ok(Value::Text(s))
        }
    }
}

/// Compare two values for ordering
///
/// Numbers compare numerically (integer and float interchangeably), text
/// byte-wise, booleans with FALSE < TRUE. Mixed kinds are a type mismatch.
fn compare_values(left: &Value, right: &Value) -> ExprResult<Ordering> {
    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        return l
            .partial_cmp(&r)
            .ok_or_else(|| ExprError::Evaluation("Cannot order NaN".into()));
    }

    match (left, right) {
        (Value::Text(l), Value::Text(r)) => Ok(l.cmp(r)),
        (Value::Bool(l), Value::Bool(r)) => Ok(l.cmp(r)),
        _ => Err(ExprError::Evaluation(format!(
            "Cannot compare {} with {}",
            left.kind(),
            right.kind()
        ))),
    }
}

/// Evaluate a unary operation
fn evaluate_unary_op(op: UnaryOperator, operand: &Expr, ctx: &EvalContext) -> ExprResult<Value> {
    let val = evaluate(operand, ctx)?;

    match op {
        UnaryOperator::Negate => match val {
            // i64::MIN has no integer negation; widen to float
            Value::Int(i) => Ok(i
                .checked_neg()
                .map(Value::Int)
                .unwrap_or(Value::Float(-(i as f64)))),
            Value::Float(f) => Ok(Value::Float(-f)),
            other => Err(ExprError::Evaluation(format!(
                "Expected number, got {} value",
                other.kind()
            ))),
        },
        UnaryOperator::Percent => {
            let n = expect_number(&val)?;
            Ok(Value::Float(n / 100.0))
        }
    }
}

/// Evaluate a function call
fn evaluate_call(name: &str, args: &[Expr], ctx: &EvalContext) -> ExprResult<Value> {
    let func = ctx
        .table
        .get(name)
        .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;

    // Check argument count before evaluating anything
    if args.len() < func.min_args {
        return Err(ExprError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", func.min_args),
            actual: args.len(),
        });
    }

    if let Some(max) = func.max_args {
        if args.len() > max {
            return Err(ExprError::ArgumentCount {
                function: name.to_string(),
                expected: format!("at most {}", max),
                actual: args.len(),
            });
        }
    }

    // Evaluate arguments bottom-up
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate(arg, ctx)?);
    }

    (func.implementation)(&evaluated_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::table::FunctionDef;

    fn fn_rev(args: &[Value]) -> ExprResult<Value> {
        match &args[0] {
            Value::Text(s) => Ok(Value::Text(s.chars().rev().collect())),
            other => Err(ExprError::Evaluation(format!(
                "REV expects string, got {}",
                other.kind()
            ))),
        }
    }

    fn test_table() -> FunctionTable {
        let mut table = FunctionTable::new();
        table.register(FunctionDef {
            name: "REV",
            min_args: 1,
            max_args: Some(1),
            implementation: fn_rev,
        });
        table
    }

    fn eval(expr: &str) -> ExprResult<Value> {
        let table = test_table();
        let ast = parse(expr)?;
        evaluate(&ast, &EvalContext::new(&table))
    }

    #[test]
    fn test_evaluate_literals() {
        assert_eq!(eval("42").unwrap(), Value::Int(42));
        assert_eq!(eval("3.14").unwrap(), Value::Float(3.14));
        assert_eq!(eval("\"Hello\"").unwrap(), Value::Text("Hello".into()));
        assert_eq!(eval("TRUE").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2").unwrap(), Value::Float(3.0));
        assert_eq!(eval("10-3").unwrap(), Value::Float(7.0));
        assert_eq!(eval("4*5").unwrap(), Value::Float(20.0));
        assert_eq!(eval("20/4").unwrap(), Value::Float(5.0));
        assert_eq!(eval("2^10").unwrap(), Value::Float(1024.0));
        assert_eq!(eval("1+2*3").unwrap(), Value::Float(7.0));
        assert_eq!(eval("(1+2)*3").unwrap(), Value::Float(9.0));
    }

    #[test]
    fn test_evaluate_unary() {
        assert_eq!(eval("-5").unwrap(), Value::Int(-5));
        assert_eq!(eval("-5.5").unwrap(), Value::Float(-5.5));
        assert_eq!(eval("50%").unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_evaluate_negate_minimum_integer() {
        let table = test_table();
        let mut vars = Variables::default();
        vars.insert("n".to_string(), Value::Int(i64::MIN));

        let ast = parse("-n").unwrap();
        let ctx = EvalContext::with_variables(&table, &vars);
        assert_eq!(
            evaluate(&ast, &ctx).unwrap(),
            Value::Float(-(i64::MIN as f64))
        );
    }

    #[test]
    fn test_evaluate_comparison() {
        assert_eq!(eval("1<2").unwrap(), Value::Bool(true));
        assert_eq!(eval("5=5").unwrap(), Value::Bool(true));
        assert_eq!(eval("5=5.0").unwrap(), Value::Bool(true));
        assert_eq!(eval("5<>5").unwrap(), Value::Bool(false));
        assert_eq!(eval("\"a\"<\"b\"").unwrap(), Value::Bool(true));
        assert_eq!(eval("\"a\"=\"A\"").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_evaluate_comparison_type_mismatch() {
        assert!(matches!(
            eval("1=\"1\""),
            Err(ExprError::Evaluation(_))
        ));
    }

    #[test]
    fn test_evaluate_concat_operator() {
        assert_eq!(
            eval("\"Hello \"&\"World\"").unwrap(),
            Value::Text("Hello World".into())
        );
        assert_eq!(eval("\"n=\"&42").unwrap(), Value::Text("n=42".into()));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert!(matches!(eval("1/0"), Err(ExprError::Evaluation(_))));
    }

    #[test]
    fn test_evaluate_function_call() {
        assert_eq!(eval("REV(\"abc\")").unwrap(), Value::Text("cba".into()));
    }

    #[test]
    fn test_evaluate_unknown_function() {
        assert!(matches!(
            eval("NOPE(1)"),
            Err(ExprError::UnknownFunction(name)) if name == "NOPE"
        ));
        // Case-sensitive lookup
        assert!(matches!(
            eval("rev(\"abc\")"),
            Err(ExprError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_evaluate_argument_count() {
        assert!(matches!(
            eval("REV()"),
            Err(ExprError::ArgumentCount { .. })
        ));
        assert!(matches!(
            eval("REV(\"a\",\"b\")"),
            Err(ExprError::ArgumentCount { .. })
        ));
    }

    #[test]
    fn test_evaluate_variables() {
        let table = test_table();
        let mut vars = Variables::default();
        vars.insert("name".to_string(), Value::from("stressed"));

        let ast = parse("REV(name)").unwrap();
        let ctx = EvalContext::with_variables(&table, &vars);
        assert_eq!(
            evaluate(&ast, &ctx).unwrap(),
            Value::Text("desserts".into())
        );
    }

    #[test]
    fn test_evaluate_unknown_variable() {
        let table = test_table();
        let ast = parse("missing").unwrap();
        let ctx = EvalContext::new(&table);
        assert!(matches!(
            evaluate(&ast, &ctx),
            Err(ExprError::UnknownVariable(name)) if name == "missing"
        ));
    }
}
