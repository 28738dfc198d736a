use std::fmt;

mod compiler;
mod evaluator;
mod parser;
mod scanner;
mod variables;

pub use compiler::{BoundFormula, Compiler, Formula};
pub use evaluator::check_bindings;
pub(crate) use evaluator::evaluate;
pub use parser::{Parser, DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT};
pub use scanner::{tokenize, Bracket, Token};
pub use variables::extract_variables;

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Variable(String),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
}

impl ASTNode {
    pub fn binary(left: ASTNode, operator: Operator, right: ASTNode) -> Self {
        ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Evaluates the tree, resolving variables through `lookup`.
    ///
    /// No binding validation happens here; callers go through [`evaluate`] or a
    /// [`BoundFormula`], which check the binding set up front.
    pub(crate) fn evaluate_with<F>(&self, lookup: &F) -> f64
    where
        F: Fn(&str) -> f64,
    {
        match self {
            ASTNode::Number(value) => *value,
            ASTNode::Variable(name) => lookup(name),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => operator.apply(left.evaluate_with(lookup), right.evaluate_with(lookup)),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            ASTNode::Number(_) | ASTNode::Variable(_) => 1,
            ASTNode::BinaryOperation { left, right, .. } => 1 + left.size() + right.size(),
        }
    }
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Number(value) => write!(f, "{}", value),
            ASTNode::Variable(name) if is_identifier(name) => f.write_str(name),
            // Anything else only scans back as a brace escape.
            ASTNode::Variable(name) => write!(f, "{{{}}}", name),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
        }
    }
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_continue)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Binding strength used by the precedence-climbing parser.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 11,
            Operator::Power => 21,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// Plain IEEE-754 arithmetic: dividing by zero gives an infinity or NaN.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            other => Err(other),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_precedence_table() {
        assert_eq!(Operator::Add.precedence(), Operator::Subtract.precedence());
        assert_eq!(Operator::Multiply.precedence(), Operator::Divide.precedence());
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert!(Operator::Power.precedence() > Operator::Multiply.precedence());
    }

    #[test]
    fn test_operator_from_char() {
        for symbol in ['+', '-', '*', '/', '^'] {
            let operator = Operator::try_from(symbol).unwrap();
            assert_eq!(operator.symbol(), symbol);
        }
        assert_eq!(Operator::try_from('%'), Err('%'));
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        assert_eq!(Operator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(Operator::Divide.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_display_is_fully_parenthesised() {
        let ast = ASTNode::binary(
            ASTNode::binary(ASTNode::Number(2.0), Operator::Power, ASTNode::Number(3.0)),
            Operator::Power,
            ASTNode::Variable("x".to_string()),
        );
        assert_eq!(ast.to_string(), "((2 ^ 3) ^ x)");
    }

    #[test]
    fn test_display_braces_non_identifiers() {
        let ast = ASTNode::binary(
            ASTNode::Variable("a[n]".to_string()),
            Operator::Add,
            ASTNode::Variable("n_1".to_string()),
        );
        assert_eq!(ast.to_string(), "({a[n]} + n_1)");
    }

    #[test]
    fn test_size_counts_every_node() {
        let ast = ASTNode::binary(
            ASTNode::Number(1.0),
            Operator::Add,
            ASTNode::binary(ASTNode::Number(2.0), Operator::Multiply, ASTNode::Number(3.0)),
        );
        assert_eq!(ast.size(), 5);
    }
}
