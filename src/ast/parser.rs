use crate::ast::{tokenize, ASTNode, Bracket, Operator, Token};
use crate::error::{CompileError, ParseError};
use log::{debug, trace};

/// Default limit on how deeply parentheses may nest.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default limit on how many operations may be stacked on top of each other in one tree.
pub const DEFAULT_MAX_HEIGHT: usize = 1024;

const VALUE: &str = "a number, a variable or '('";

/// Precedence-climbing parser over a token slice.
///
/// Every operator is left-associative, `^` included: `2^3^2` parses as `(2^3)^2`.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    max_depth: usize,
    max_height: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    /// Sets how many levels of parentheses are accepted before parsing fails with
    /// [`ParseError::NestingTooDeep`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sets how many operations may be stacked in one tree before parsing fails with
    /// [`ParseError::TreeTooDeep`]. A chain like `1+1+...+1` is left-deep, so its height is
    /// its operator count. Evaluating and printing a tree recurse once per level.
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Tokenizes and parses `input` in one go.
    pub fn parse_expression(&self, input: &str) -> Result<ASTNode, CompileError> {
        let tokens = tokenize(input)?;
        Ok(self.parse(&tokens)?)
    }

    /// Builds a tree from the whole token sequence. Tokens left over after a complete
    /// expression are an error.
    pub fn parse(&self, tokens: &[Token]) -> Result<ASTNode, ParseError> {
        debug!("Parsing {} tokens", tokens.len());
        if tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let mut cursor = Cursor {
            tokens,
            position: 0,
            depth: 0,
            max_depth: self.max_depth,
            max_height: self.max_height,
        };
        let tree = cursor.expression(0)?.node;

        match cursor.peek() {
            None => {
                debug!("Parse result: {}", tree);
                Ok(tree)
            }
            Some(Token::Bracket(Bracket::Close)) => Err(ParseError::UnmatchedClosingBracket {
                position: cursor.position,
            }),
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "end of expression",
                found: other.clone(),
                position: cursor.position,
            }),
        }
    }
}

struct Cursor<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
    max_depth: usize,
    max_height: usize,
}

/// A parsed node and the number of operations stacked under it.
struct Subtree {
    node: ASTNode,
    height: usize,
}

impl Subtree {
    fn leaf(node: ASTNode) -> Self {
        Self { node, height: 0 }
    }
}

impl<'t> Cursor<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Parses a primary, then keeps folding in operators that bind tighter than
    /// `min_precedence`. Stops at `)`, end of input, or a weaker operator.
    fn expression(&mut self, min_precedence: u8) -> Result<Subtree, ParseError> {
        let mut left = self.primary()?;

        while let Some(token) = self.peek() {
            match token {
                Token::Operator(operator) => {
                    if operator.precedence() <= min_precedence {
                        break;
                    }
                    self.advance();
                    let right = self.expression(operator.precedence())?;
                    left = self.fold(left, *operator, right)?;
                }
                Token::Bracket(Bracket::Close) => break,
                other => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "an operator or ')'",
                        found: other.clone(),
                        position: self.position,
                    })
                }
            }
        }

        Ok(left)
    }

    fn fold(
        &self,
        left: Subtree,
        operator: Operator,
        right: Subtree,
    ) -> Result<Subtree, ParseError> {
        let height = 1 + left.height.max(right.height);
        if height > self.max_height {
            return Err(ParseError::TreeTooDeep {
                limit: self.max_height,
            });
        }
        trace!("Folding {} {} {}", left.node, operator, right.node);
        Ok(Subtree {
            node: ASTNode::binary(left.node, operator, right.node),
            height,
        })
    }

    fn primary(&mut self) -> Result<Subtree, ParseError> {
        let position = self.position;
        match self.advance() {
            None => Err(ParseError::UnexpectedEnd { expected: VALUE }),
            Some(Token::Number(value)) => Ok(Subtree::leaf(ASTNode::Number(*value))),
            Some(Token::Variable(name)) => Ok(Subtree::leaf(ASTNode::Variable(name.clone()))),
            Some(Token::Bracket(Bracket::Open)) => {
                if self.depth >= self.max_depth {
                    return Err(ParseError::NestingTooDeep {
                        limit: self.max_depth,
                    });
                }
                self.depth += 1;
                let inner = self.expression(0)?;
                self.depth -= 1;

                match self.advance() {
                    Some(Token::Bracket(Bracket::Close)) => Ok(inner),
                    None => Err(ParseError::UnclosedBracket { position }),
                    Some(other) => Err(ParseError::UnexpectedToken {
                        expected: "')'",
                        found: other.clone(),
                        position: self.position - 1,
                    }),
                }
            }
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: VALUE,
                found: other.clone(),
                position,
            }),
        }
    }
}
