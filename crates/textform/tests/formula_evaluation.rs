//! End-to-end formula parsing and evaluation through the facade

use pretty_assertions::assert_eq;
use textform::{ExprError, Formulas, Value, Variables};

fn eval_string(formula: &str) -> String {
    Formulas::new()
        .parse(formula)
        .unwrap()
        .eval_string(None)
        .unwrap()
}

fn eval_float(formula: &str) -> f64 {
    Formulas::new()
        .parse(formula)
        .unwrap()
        .eval_float(None)
        .unwrap()
}

fn eval_bool(formula: &str) -> bool {
    Formulas::new()
        .parse(formula)
        .unwrap()
        .eval_bool(None)
        .unwrap()
}

/// Every text function called the way a spreadsheet user would write it
#[test]
fn test_evaluate_text_functions() {
    assert_eq!(eval_string(r#"CONCAT("Hello ", "World")"#), "Hello World");
    assert_eq!(eval_string(r#"CONCAT("Hello ", 3.1416)"#), "Hello 3.1416");
    assert_eq!(eval_string(r#"CONCAT("Hello ", 42)"#), "Hello 42");
    assert_eq!(eval_string(r#"CONCATENATE("Hello ", "World")"#), "Hello World");
    assert_eq!(eval_string(r#"LEFT("Hello World")"#), "H");
    assert_eq!(eval_string(r#"LEFT("Hello World", 5)"#), "Hello");
    assert_eq!(eval_string(r#"LEFT(3.1416, 3)"#), "3.1");
    assert_eq!(eval_string(r#"LOWER("HeLLo World")"#), "hello world");
    assert_eq!(eval_string(r#"MID("Hello World", 3, 3)"#), "llo");
    assert_eq!(eval_string(r#"PROPER("HEllO wORLd")"#), "Hello World");
    assert_eq!(
        eval_string(r#"REPLACE("Hello World", 7, 5, "India")"#),
        "Hello India"
    );
    assert_eq!(eval_string(r#"REPT("Hell", 4)"#), "HellHellHellHell");
    assert_eq!(eval_string(r#"RIGHT("Hell", 2)"#), "ll");
    assert_eq!(
        eval_string(r#"SUBSTITUTE("Oink Oink Oink", "ink", "inky", 2)"#),
        "Oink Oinky Oink"
    );
    assert_eq!(eval_string(r#"TRIM("    Hello    World    ")"#), "Hello World");
    assert_eq!(eval_string(r#"UPPER("Hello India")"#), "HELLO INDIA");
}

#[test]
fn test_evaluate_numeric_results() {
    assert_eq!(eval_float(r#"LEN("Hello World")"#), 11.0);
    assert_eq!(eval_float(r#"FIND("l", "Hello", 2)"#), 3.0);
    assert_eq!(eval_float(r#"FIND("l", "Hello")"#), 3.0);
    assert_eq!(eval_float(r#"FIND("z", "Hello")"#), -1.0);
    assert_eq!(eval_float(r#"SEARCH("LL", "Hello World")"#), 3.0);
}

#[test]
fn test_evaluate_boolean_results() {
    assert!(eval_bool(r#"EXACT("Hello", "Hello")"#));
    assert!(!eval_bool(r#"EXACT("Hello", "hello")"#));
    assert!(eval_bool(r#"LEN("Hello")=5"#));
    assert!(eval_bool(r#"FIND("z", "Hello")=-1"#));
}

/// The composed scenario from the function reference: split, reassemble,
/// then substitute
#[test]
fn test_evaluate_nested_composition() {
    let formula = r#"SUBSTITUTE(CONCATENATE(LEFT("Hello World",5),MID("Hello World",6,1),RIGHT("Hello World",5)),"World","India")"#;
    assert_eq!(eval_string(formula), "Hello India");
}

#[test]
fn test_evaluate_with_variables() {
    let formulas = Formulas::new();
    let formula = formulas
        .parse(r#"CONCAT(PROPER(first), " ", UPPER(last))"#)
        .unwrap();

    let mut vars = Variables::default();
    vars.insert("first".to_string(), Value::from("ada"));
    vars.insert("last".to_string(), Value::from("lovelace"));

    assert_eq!(formula.eval_string(Some(&vars)).unwrap(), "Ada LOVELACE");
}

#[test]
fn test_variable_bindings_are_per_evaluation() {
    let formulas = Formulas::new();
    let formula = formulas.parse("LEN(word)").unwrap();

    let mut vars = Variables::default();
    vars.insert("word".to_string(), Value::from("four"));
    assert_eq!(formula.eval_float(Some(&vars)).unwrap(), 4.0);

    // Same evaluable, no bindings this time
    assert!(matches!(
        formula.eval_float(None),
        Err(ExprError::UnknownVariable(name)) if name == "word"
    ));
}

#[test]
fn test_base_grammar_mixes_with_functions() {
    assert_eq!(eval_string(r#""n="&LEN("abc")"#), "n=3");
    assert_eq!(eval_float(r#"LEN("ab")+LEN("cde")"#), 5.0);
    assert!(eval_bool(r#"LEN("Hello") > 2+2"#));
}

#[test]
fn test_function_names_are_case_sensitive() {
    let formulas = Formulas::new();
    let formula = formulas.parse(r#"find("l", "Hello")"#).unwrap();
    assert!(matches!(
        formula.eval(None),
        Err(ExprError::UnknownFunction(name)) if name == "find"
    ));
}

#[test]
fn test_argument_count_errors() {
    let formulas = Formulas::new();

    let formula = formulas.parse(r#"EXACT("a")"#).unwrap();
    assert!(matches!(
        formula.eval(None),
        Err(ExprError::ArgumentCount { .. })
    ));

    let formula = formulas.parse(r#"MID("a", 1, 2, 3)"#).unwrap();
    assert!(matches!(
        formula.eval(None),
        Err(ExprError::ArgumentCount { .. })
    ));
}

#[test]
fn test_coercion_errors_propagate() {
    let formulas = Formulas::new();
    let formula = formulas.parse(r#"CONCAT("is: ", TRUE)"#).unwrap();
    assert!(matches!(
        formula.eval(None),
        Err(ExprError::Coercion(e)) if e.kind == "boolean"
    ));
}

#[test]
fn test_parse_errors() {
    let formulas = Formulas::new();
    assert!(matches!(
        formulas.parse(r#"CONCAT("open"#),
        Err(ExprError::Parse(_))
    ));
    assert!(matches!(
        formulas.parse(r#"LEFT("a",)"#),
        Err(ExprError::Parse(_))
    ));
}

/// One facade, many threads, no locking
#[test]
fn test_concurrent_evaluations_share_one_table() {
    let formulas = Formulas::new();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let formulas = &formulas;
            scope.spawn(move || {
                let formula = formulas.parse(r#"REPT("ab", n)"#).unwrap();
                let mut vars = Variables::default();
                vars.insert("n".to_string(), Value::Int(i));
                let out = formula.eval_string(Some(&vars)).unwrap();
                assert_eq!(out, "ab".repeat(i.max(0) as usize));
            });
        }
    });
}
