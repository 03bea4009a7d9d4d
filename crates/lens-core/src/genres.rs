//! Restricted parser for genre-list literals.
//!
//! Catalog exports serialize the genre column as a list literal, e.g.
//! `['drama', 'comedy']`. The field is untrusted external input, so it is
//! parsed with a small recursive-descent parser that accepts exactly the
//! list-of-quoted-strings form and nothing else; it is never handed to a
//! general expression evaluator.

use thiserror::Error;

/// Why a genre field was rejected by the literal parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenreParseError {
    /// The input does not start with `[`.
    #[error("expected a list literal starting with '[' at position {0}")]
    ExpectedList(usize),

    /// A list element is not a quoted string.
    #[error("expected a quoted string at position {0}")]
    ExpectedString(usize),

    /// A string opened but never closed before the end of input.
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),

    /// After an element, something other than `,` or `]` followed.
    #[error("expected ',' or ']' at position {0}")]
    ExpectedSeparator(usize),

    /// Valid list followed by junk, e.g. `['a'] extra`.
    #[error("unexpected trailing input at position {0}")]
    TrailingInput(usize),
}

/// Parse a list literal of quoted strings into its labels.
///
/// Accepts single- or double-quoted elements, backslash escapes inside
/// strings, arbitrary whitespace, and the empty list `[]`. Anything else
/// is an error.
///
/// # Examples
///
/// ```
/// use lens_core::genres::parse_genre_list;
///
/// assert_eq!(
///     parse_genre_list("['Drama', 'Comedy']").unwrap(),
///     vec!["Drama".to_string(), "Comedy".to_string()],
/// );
/// assert!(parse_genre_list("[]").unwrap().is_empty());
/// assert!(parse_genre_list("not a list").is_err());
/// ```
pub fn parse_genre_list(input: &str) -> Result<Vec<String>, GenreParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let labels = parser.parse_list()?;
    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(GenreParseError::TrailingInput(parser.pos));
    }
    Ok(labels)
}

// ── Parser ────────────────────────────────────────────────────────────────────

/// Character cursor over the input. Positions are char offsets, not bytes.
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// `'[' ws (string (ws ',' ws string)*)? ws ']'`
    fn parse_list(&mut self) -> Result<Vec<String>, GenreParseError> {
        if self.peek() != Some('[') {
            return Err(GenreParseError::ExpectedList(self.pos));
        }
        self.pos += 1;

        let mut labels = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(labels);
        }

        loop {
            self.skip_whitespace();
            labels.push(self.parse_string()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(']') => {
                    self.pos += 1;
                    return Ok(labels);
                }
                _ => return Err(GenreParseError::ExpectedSeparator(self.pos)),
            }
        }
    }

    /// A single- or double-quoted string with backslash escapes.
    fn parse_string(&mut self) -> Result<String, GenreParseError> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(GenreParseError::ExpectedString(self.pos)),
        };
        let start = self.pos;
        self.pos += 1;

        let mut label = String::new();
        loop {
            match self.bump() {
                None => return Err(GenreParseError::UnterminatedString(start)),
                Some('\\') => match self.bump() {
                    None => return Err(GenreParseError::UnterminatedString(start)),
                    Some(escaped) => label.push(escaped),
                },
                Some(c) if c == quote => return Ok(label),
                Some(c) => label.push(c),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
