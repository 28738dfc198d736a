use crate::ast::evaluator::check_bindings_except;
use crate::ast::{evaluate, extract_variables, tokenize, ASTNode, Parser};
use crate::error::{CompileError, EvalError};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Turns expression text into a [`Formula`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    parser: Parser,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(parser: Parser) -> Self {
        Self { parser }
    }

    /// Compiles with the default parser settings.
    pub fn compile_expression(expression: &str) -> Result<Formula, CompileError> {
        Self::new().compile(expression)
    }

    pub fn compile(&self, expression: &str) -> Result<Formula, CompileError> {
        let tokens = tokenize(expression)?;
        let required_variables = extract_variables(&tokens);
        let tree = self.parser.parse(&tokens)?;
        debug!(
            "Compiled '{}' into {} nodes, variables {:?}",
            expression,
            tree.size(),
            required_variables
        );

        Ok(Formula {
            source: expression.to_string(),
            tree,
            required_variables,
        })
    }
}

/// A compiled expression. Immutable, and safe to evaluate from several threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    tree: ASTNode,
    required_variables: Vec<String>,
}

impl Formula {
    /// Evaluates the formula. `bindings` must contain exactly the required variables.
    pub fn eval(&self, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        evaluate(&self.tree, &self.required_variables, bindings)
    }

    /// Every variable occurrence, in source order, repeats included.
    pub fn required_variables(&self) -> &[String] {
        &self.required_variables
    }

    /// The required variables with repeats removed, in order of first occurrence.
    pub fn distinct_variables(&self) -> Vec<&str> {
        let mut distinct: Vec<&str> = Vec::with_capacity(self.required_variables.len());
        for name in &self.required_variables {
            if !distinct.contains(&name.as_str()) {
                distinct.push(name);
            }
        }
        distinct
    }

    pub fn tree(&self) -> &ASTNode {
        &self.tree
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fixes every variable except `variable`, giving a function of one argument.
    ///
    /// `fixed` must bind exactly the required variables other than `variable`; this is
    /// checked once here, so calling the result cannot fail. A formula that does not
    /// mention `variable` binds fine and yields a constant function.
    pub fn bind(
        &self,
        variable: &str,
        fixed: HashMap<String, f64>,
    ) -> Result<BoundFormula<'_>, EvalError> {
        check_bindings_except(&self.required_variables, &fixed, Some(variable))?;
        debug!("Bound '{}' over {}", self.source, variable);
        Ok(BoundFormula {
            formula: self,
            variable: variable.to_string(),
            fixed,
        })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

/// A [`Formula`] with all variables but one fixed.
#[derive(Debug, Clone)]
pub struct BoundFormula<'f> {
    formula: &'f Formula,
    variable: String,
    fixed: HashMap<String, f64>,
}

impl BoundFormula<'_> {
    pub fn call(&self, x: f64) -> f64 {
        self.formula.tree.evaluate_with(&|name: &str| {
            if name == self.variable {
                x
            } else {
                self.fixed.get(name).copied().unwrap_or(f64::NAN)
            }
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn formula(&self) -> &Formula {
        self.formula
    }
}
