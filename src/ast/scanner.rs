use crate::ast::{is_identifier_continue, is_identifier_start, Operator};
use crate::error::LexError;
use log::{debug, trace};
use std::fmt;
use std::iter::{Enumerate, Peekable};
use std::str::Chars;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bracket {
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    Variable(String),
    Bracket(Bracket),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "number {}", value),
            Token::Operator(operator) => write!(f, "operator '{}'", operator),
            Token::Variable(name) => write!(f, "variable '{}'", name),
            Token::Bracket(Bracket::Open) => f.write_str("'('"),
            Token::Bracket(Bracket::Close) => f.write_str("')'"),
        }
    }
}

/// Splits expression text into tokens, in source order.
///
/// Spaces are skipped. `{...}` takes everything up to the next `}` verbatim as a single
/// variable name, so `{a[n]}` is one variable.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    debug!("Tokenizing expression: {}", expression);
    let tokens = Scanner::new(expression).scan()?;
    trace!("Tokens: {:?}", tokens);
    Ok(tokens)
}

struct Scanner<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().enumerate().peekable(),
        }
    }

    fn scan(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some((position, c)) = self.chars.next() {
            let token = match c {
                ' ' => continue,
                '0'..='9' => self.number(c, position)?,
                '(' => Token::Bracket(Bracket::Open),
                ')' => Token::Bracket(Bracket::Close),
                '{' => self.braced_variable(position)?,
                c if is_identifier_start(c) => self.identifier(c),
                c => match Operator::try_from(c) {
                    Ok(operator) => Token::Operator(operator),
                    Err(character) => {
                        return Err(LexError::UnexpectedCharacter {
                            character,
                            position,
                        })
                    }
                },
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// A digit run with at most one decimal point. A second point ends the literal
    /// instead of being an error here. Literals too large for an `f64` are rejected.
    fn number(&mut self, first: char, position: usize) -> Result<Token, LexError> {
        let mut text = String::from(first);
        let mut seen_dot = false;
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                text.push(c);
            } else {
                break;
            }
            self.chars.next();
        }

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Number(value)),
            _ => Err(LexError::InvalidNumber { text, position }),
        }
    }

    fn identifier(&mut self, first: char) -> Token {
        let mut name = String::from(first);
        while let Some(&(_, c)) = self.chars.peek() {
            if !is_identifier_continue(c) {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        Token::Variable(name)
    }

    fn braced_variable(&mut self, position: usize) -> Result<Token, LexError> {
        let mut name = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == '}' {
                return Ok(Token::Variable(name));
            }
            name.push(c);
        }
        Err(LexError::UnterminatedBrace { position })
    }
}
