//! Function table
//!
//! The evaluator's vocabulary of callable functions. The table is built once
//! by the embedding library, never mutated afterwards, and shared by
//! reference across any number of concurrent evaluations.

use crate::error::ExprResult;
use crate::value::Value;
use ahash::AHashMap;

/// Function implementation signature
///
/// Arguments arrive already evaluated, in call order. Arity has been checked
/// against the [`FunctionDef`] before the handler runs.
pub type FunctionImpl = fn(&[Value]) -> ExprResult<Value>;

/// Function definition
pub struct FunctionDef {
    /// Exact call token, case-sensitive (e.g. `"SUBSTITUTE"`)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Immutable registry mapping function names to their definitions.
///
/// Lookup is case-sensitive: `find` is not a recognized spelling of `FIND`.
#[derive(Default)]
pub struct FunctionTable {
    functions: AHashMap<&'static str, FunctionDef>,
}

impl FunctionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its declared name
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    /// Look up a function by exact name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the table holds no functions
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
