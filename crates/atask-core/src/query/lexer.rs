//! Lexer (tokenizer) for query expressions.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::error::{QueryError, QueryResult};

/// Characters that end a bare word.
const DELIMITERS: [char; 7] = ['(', ')', ':', '>', '<', '=', '!'];

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word in field position (not preceded by an operator).
    Field,
    /// A word following a comparison operator.
    Value,
    /// The `:` operator.
    Colon,
    /// The `>` operator.
    Gt,
    /// The `<` operator.
    Lt,
    /// The `=` operator.
    Eq,
    /// The `!=` operator.
    NotEq,
    /// The `AND` keyword.
    And,
    /// The `OR` keyword.
    Or,
    /// The `NOT` keyword.
    Not,
    /// Opening parenthesis `(`.
    OpenParen,
    /// Closing parenthesis `)`.
    CloseParen,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for the five comparison operators.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Colon | TokenKind::Gt | TokenKind::Lt | TokenKind::Eq | TokenKind::NotEq
        )
    }
}

/// A token with its source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token text. Quoted words hold their unquoted content.
    pub text: String,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Field | TokenKind::Value => write!(f, "{}", self.text),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Eof => write!(f, "EOF"),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Lexer for tokenizing query expressions.
///
/// Words are classified by position: a word right after a comparison operator
/// is a [`TokenKind::Value`], any other word is a [`TokenKind::Field`].
/// Unquoted `AND`, `OR` and `NOT` (any case) are keywords; quoting a word
/// (`tag:"and"`) always makes it a plain word.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
    /// Tokens produced so far, used for field/value lookback.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads a bare word up to whitespace, a delimiter, or a control character.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.peek() {
            if c.is_whitespace() || c.is_control() || DELIMITERS.contains(&c) {
                break;
            }
            word.push(c);
            self.next_char();
        }
        word
    }

    /// Reads a quoted word (single or double quotes), handling backslash escapes.
    fn read_quoted(&mut self, quote_char: char, start: usize) -> QueryResult<String> {
        // Consume the opening quote
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if c == quote_char {
                return Ok(result);
            }
            if c == '\\' {
                match self.next_char() {
                    Some(escaped) => result.push(escaped),
                    None => break,
                }
            } else {
                result.push(c);
            }
        }
        Err(QueryError::UnterminatedQuote { position: start })
    }

    /// Classifies a word as keyword, field, or value.
    fn classify_word(&self, word: &str, quoted: bool) -> TokenKind {
        if !quoted {
            if word.eq_ignore_ascii_case("and") {
                return TokenKind::And;
            }
            if word.eq_ignore_ascii_case("or") {
                return TokenKind::Or;
            }
            if word.eq_ignore_ascii_case("not") {
                return TokenKind::Not;
            }
        }

        match self.tokens.last() {
            Some(previous) if previous.kind.is_operator() => TokenKind::Value,
            _ => TokenKind::Field,
        }
    }

    /// Reads the next token, or `None` at end of input.
    fn next_token(&mut self) -> QueryResult<Option<Token>> {
        self.skip_whitespace();

        let Some(&c) = self.peek() else {
            return Ok(None);
        };
        let start = self.position;

        let single = match c {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            ':' => Some(TokenKind::Colon),
            '>' => Some(TokenKind::Gt),
            '<' => Some(TokenKind::Lt),
            '=' => Some(TokenKind::Eq),
            _ => None,
        };
        if let Some(kind) = single {
            self.next_char();
            return Ok(Some(Token::new(kind, c.to_string(), start)));
        }

        match c {
            '!' => {
                self.next_char();
                if self.peek() == Some(&'=') {
                    self.next_char();
                    Ok(Some(Token::new(TokenKind::NotEq, "!=", start)))
                } else {
                    Err(QueryError::Lex {
                        character: '!',
                        position: start,
                    })
                }
            }
            '"' | '\'' => {
                let word = self.read_quoted(c, start)?;
                let kind = self.classify_word(&word, true);
                Ok(Some(Token::new(kind, word, start)))
            }
            _ => {
                let word = self.read_word();
                if word.is_empty() {
                    // Nothing consumed: a control character blocks progress.
                    return Err(QueryError::Lex {
                        character: c,
                        position: start,
                    });
                }
                let kind = self.classify_word(&word, false);
                Ok(Some(Token::new(kind, word, start)))
            }
        }
    }

    /// Tokenizes the whole input, ending with an [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Lex`] for a character that cannot start a token
    /// and [`QueryError::UnterminatedQuote`] for a missing closing quote.
    pub fn tokenize(mut self) -> QueryResult<Vec<Token>> {
        while let Some(token) = self.next_token()? {
            self.tokens.push(token);
        }
        let end = self.position;
        self.tokens.push(Token::new(TokenKind::Eof, "", end));
        Ok(self.tokens)
    }
}
