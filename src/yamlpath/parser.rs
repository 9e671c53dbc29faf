//! Parser for path expressions.

use thiserror::Error;

use super::{PathExpr, Segment, Selector};

/// Errors produced while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected '$' at the start of the expression")]
    ExpectedRoot,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number")]
    InvalidNumber,
    #[error("unclosed string literal")]
    UnclosedString,
    #[error("unsupported selector")]
    UnsupportedSelector,
}

/// A hand rolled recursive descent parser over the expression text.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Parses a complete path expression. Trailing characters after the
    /// last segment are an error.
    pub fn parse(input: &'a str) -> Result<PathExpr, ParseError> {
        let mut parser = Parser { input, pos: 0 };
        parser.parse_expr()
    }

    fn parse_expr(&mut self) -> Result<PathExpr, ParseError> {
        if self.peek() != Some('$') {
            return Err(ParseError::ExpectedRoot);
        }
        self.advance();

        let mut segments = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        segments.push(self.parse_recursive_segment()?);
                    } else if self.peek() == Some('*') {
                        self.advance();
                        segments.push(Segment::new(vec![Selector::Wildcard], false));
                    } else {
                        let name = self.parse_identifier()?;
                        segments.push(Segment::new(vec![Selector::Name(name)], false));
                    }
                }
                '[' => {
                    let selectors = self.parse_bracket_selectors()?;
                    segments.push(Segment::new(selectors, false));
                }
                _ => return Err(ParseError::UnexpectedChar(c)),
            }
        }
        Ok(PathExpr::new(segments))
    }

    fn parse_recursive_segment(&mut self) -> Result<Segment, ParseError> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(Segment::new(vec![Selector::Wildcard], true))
            }
            Some('[') => {
                let selectors = self.parse_bracket_selectors()?;
                Ok(Segment::new(selectors, true))
            }
            Some(_) => {
                let name = self.parse_identifier()?;
                Ok(Segment::new(vec![Selector::Name(name)], true))
            }
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn parse_bracket_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        self.expect('[')?;
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.advance();
                break;
            }
            selectors.push(self.parse_bracket_selector()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.advance(),
                Some(']') => {
                    self.advance();
                    break;
                }
                Some(c) => return Err(ParseError::UnexpectedChar(c)),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
        Ok(selectors)
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, ParseError> {
        match self.peek() {
            Some('\'') | Some('"') => Ok(Selector::Name(self.parse_string()?)),
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some('-') | Some('0'..='9') => {
                let index = self.parse_number()?;
                self.skip_whitespace();
                // a ':' after a number starts a slice
                if self.peek() == Some(':') {
                    return Err(ParseError::UnsupportedSelector);
                }
                Ok(Selector::Index(index))
            }
            Some(':') | Some('?') => Err(ParseError::UnsupportedSelector),
            Some(c) => Err(ParseError::UnexpectedChar(c)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(c @ ('\'' | '"')) => c,
            Some(c) => return Err(ParseError::UnexpectedChar(c)),
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.advance();

        let mut result = String::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some(_) => return Err(ParseError::InvalidEscape),
                        None => return Err(ParseError::UnclosedString),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
    }

    fn parse_number(&mut self) -> Result<isize, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| ParseError::InvalidNumber)
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == start {
            match self.peek() {
                Some(c) => Err(ParseError::UnexpectedChar(c)),
                None => Err(ParseError::UnexpectedEnd),
            }
        } else {
            Ok(self.input[start..self.pos].to_string())
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(ParseError::UnexpectedChar(c)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }
}
