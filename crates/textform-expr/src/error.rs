//! Expression error types

use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Errors that can occur while parsing or evaluating an expression
#[derive(Debug, Error)]
pub enum ExprError {
    /// Malformed expression text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Runtime evaluation failure
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Function name not present in the function table
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Identifier not present in the variable bindings
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Operand could not be coerced to the representation an argument requires
    #[error(transparent)]
    Coercion(#[from] TypeCoercionError),
}

/// Raised when an operand cannot be converted to the string or integer
/// representation a function argument requires. Carries the runtime kind of
/// the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot coerce {kind} value to {target}")]
pub struct TypeCoercionError {
    /// Runtime kind of the rejected value
    pub kind: &'static str,
    /// Representation that was requested
    pub target: &'static str,
}
