//! Recursive descent parser for query expressions.

use std::str::FromStr;

use tracing::debug;

use super::ast::{Comparison, Operator, Query};
use super::error::{QueryError, QueryResult};
use super::lexer::{Lexer, Token, TokenKind};

/// Parser for atask query expressions.
///
/// # Grammar
///
/// ```text
/// expression ::= term ("OR" term)*
/// term       ::= factor ("AND" factor)*
/// factor     ::= "NOT" factor | "(" expression ")" | comparison
/// comparison ::= FIELD operator VALUE
/// operator   ::= ":" | ">" | "<" | "=" | "!="
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `NOT` - unary
/// 2. `AND` - binary, left-associative
/// 3. `OR` - binary, left-associative
///
/// # Example
///
/// ```
/// use atask_core_rs::query::{Query, QueryParser};
///
/// let query = QueryParser::parse("status:open AND (priority:p1 OR priority:p2)").unwrap();
/// assert!(matches!(query, Query::And(_, _)));
/// ```
pub struct QueryParser {
    tokens: Vec<Token>,
    position: usize,
    /// Open `NOT`s and parentheses around the current token.
    nesting: usize,
}

/// Maximum depth of a query: both the nesting of `NOT`s and parentheses and
/// the height of the resulting tree, where each chained `AND`/`OR` adds a level.
pub const MAX_DEPTH: usize = 256;

/// A parsed subtree and its height.
struct Node {
    query: Query,
    depth: usize,
}

impl Node {
    fn leaf(query: Query) -> Self {
        Self { query, depth: 1 }
    }
}

impl QueryParser {
    /// Parses a query string into a [`Query`] AST.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] for any lexical or syntax error. The whole
    /// input must form one expression; no partial AST is ever returned.
    pub fn parse(input: &str) -> QueryResult<Query> {
        let tokens = Lexer::new(input).tokenize()?;

        let mut parser = Self {
            tokens,
            position: 0,
            nesting: 0,
        };
        let query = parser.parse_expression()?.query;

        // Check that we consumed all tokens
        let remaining = parser.peek();
        if remaining.kind != TokenKind::Eof {
            return Err(QueryError::TrailingInput {
                position: remaining.position,
                found: remaining.to_string(),
            });
        }

        debug!(input, parsed = %query, "parsed query");
        Ok(query)
    }

    /// Returns the current token without consuming it.
    ///
    /// The token list always ends with `Eof`, and the parser never advances
    /// past it.
    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token has the expected kind.
    fn check(&self, expected: TokenKind) -> bool {
        self.peek().kind == expected
    }

    /// Consumes the current token if it has the expected kind.
    fn matches(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Enters a `NOT` or parenthesis at `position`, failing past [`MAX_DEPTH`].
    fn descend(&mut self, position: usize) -> QueryResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(QueryError::TooDeep { position });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.nesting -= 1;
    }

    /// Wraps children into a new node one level taller than the tallest child.
    fn combine(position: usize, child_depth: usize, query: Query) -> QueryResult<Node> {
        let depth = child_depth + 1;
        if depth > MAX_DEPTH {
            return Err(QueryError::TooDeep { position });
        }
        Ok(Node { query, depth })
    }

    /// Parses OR expressions: `term ("OR" term)*`
    fn parse_expression(&mut self) -> QueryResult<Node> {
        let mut left = self.parse_term()?;

        while self.check(TokenKind::Or) {
            let position = self.advance().position;
            let right = self.parse_term()?;
            let depth = left.depth.max(right.depth);
            left = Self::combine(position, depth, Query::or(left.query, right.query))?;
        }

        Ok(left)
    }

    /// Parses AND expressions: `factor ("AND" factor)*`
    fn parse_term(&mut self) -> QueryResult<Node> {
        let mut left = self.parse_factor()?;

        while self.check(TokenKind::And) {
            let position = self.advance().position;
            let right = self.parse_factor()?;
            let depth = left.depth.max(right.depth);
            left = Self::combine(position, depth, Query::and(left.query, right.query))?;
        }

        Ok(left)
    }

    /// Parses factors: `"NOT" factor | "(" expression ")" | comparison`
    fn parse_factor(&mut self) -> QueryResult<Node> {
        if self.check(TokenKind::Not) {
            let position = self.advance().position;
            self.descend(position)?;
            let inner = self.parse_factor()?;
            self.ascend();
            return Self::combine(position, inner.depth, Query::negate(inner.query));
        }

        if self.check(TokenKind::OpenParen) {
            let position = self.advance().position;
            self.descend(position)?;
            let inner = self.parse_expression()?;
            if !self.matches(TokenKind::CloseParen) {
                let found = self.peek();
                return Err(QueryError::ExpectedCloseParen {
                    position: found.position,
                    found: found.to_string(),
                });
            }
            self.ascend();
            return Ok(inner);
        }

        self.parse_comparison().map(Node::leaf)
    }

    /// Parses comparisons: `FIELD operator VALUE`
    fn parse_comparison(&mut self) -> QueryResult<Query> {
        if !self.check(TokenKind::Field) {
            let found = self.peek();
            return Err(QueryError::ExpectedField {
                position: found.position,
                found: found.to_string(),
            });
        }
        let field = self.advance();

        let operator = match self.peek().kind {
            TokenKind::Colon => Operator::Colon,
            TokenKind::Eq => Operator::Eq,
            TokenKind::NotEq => Operator::NotEq,
            TokenKind::Gt => Operator::Gt,
            TokenKind::Lt => Operator::Lt,
            _ => {
                let found = self.peek();
                return Err(QueryError::ExpectedOperator {
                    position: found.position,
                    found: found.to_string(),
                });
            }
        };
        self.advance();

        if !self.check(TokenKind::Value) {
            let found = self.peek();
            return Err(QueryError::ExpectedValue {
                position: found.position,
                found: found.to_string(),
            });
        }
        let value = self.advance();

        Ok(Query::Comparison(Comparison::new(
            field.text, operator, value.text,
        )))
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        QueryParser::parse(s)
    }
}
