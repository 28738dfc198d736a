pub mod ast;
pub mod cache;
pub mod error;
pub mod sampling;

use std::collections::HashMap;

pub use ast::{BoundFormula, Compiler, Formula};
pub use cache::FormulaCache;
pub use error::{CompileError, EvalError, FormulaError, LexError, ParseError};

/// Compiles `expression` into a reusable [`Formula`].
pub fn compile(expression: &str) -> Result<Formula, CompileError> {
    Compiler::compile_expression(expression)
}

/// Compiles and evaluates in one step. Prefer [`compile`] when evaluating repeatedly.
pub fn evaluate_expression(
    expression: &str,
    bindings: &HashMap<String, f64>,
) -> Result<f64, FormulaError> {
    let formula = compile(expression)?;
    Ok(formula.eval(bindings)?)
}
