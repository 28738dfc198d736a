use crate::ast::Token;
use thiserror::Error;

/// Raised by the scanner when the expression text contains something it cannot tokenize.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("unterminated '{{' starting at position {position}")]
    UnterminatedBrace { position: usize },

    #[error("invalid number literal '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },
}

/// Raised by the parser on a malformed token sequence. Positions are token indices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected}, found {found} at token {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: usize,
    },

    #[error("'(' at token {position} is never closed")]
    UnclosedBracket { position: usize },

    #[error("unmatched ')' at token {position}")]
    UnmatchedClosingBracket { position: usize },

    #[error("brackets nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("more than {limit} operations stacked in one expression")]
    TreeTooDeep { limit: usize },
}

/// Raised when a binding map does not match the variables a formula requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("missing variable {0}")]
    MissingVariable(String),

    #[error("unknown variable {0}")]
    UnknownVariable(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Any failure of the one-shot [`crate::evaluate_expression`] helper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
