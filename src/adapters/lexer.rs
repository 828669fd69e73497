// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grammar atoms for the configuration text format.
//!
//! The scanner turns raw input into the primitive pieces the parser works
//! with: numbers (with radix prefixes and timespan suffixes), quoted strings
//! with escapes, unquoted symbols, identifiers, and trivia (whitespace and
//! the three comment forms).

use crate::domain::errors::{ConfigError, Result};
use crate::domain::timespan::Timespan;
use crate::domain::value::Value;

/// Magnitude cap used while accumulating digits: one above `i64::MIN.abs()`.
const MAG_LIMIT: i128 = (i64::MAX as i128) + 2;

/// A cursor over the input text.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Current byte offset.
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `c` if it is the next character.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Builds the error for an out-of-place character or premature end.
    pub(crate) fn unexpected(&self) -> ConfigError {
        match self.peek() {
            Some(found) => ConfigError::UnexpectedCharacter {
                found,
                offset: self.pos,
            },
            None => ConfigError::UnexpectedEof,
        }
    }

    /// Skips whitespace and comments: `#` and `//` to end of line, and
    /// `/* ... */` blocks (not nested).
    pub(crate) fn skip_trivia(&mut self) -> Result<()> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            match (self.peek(), self.peek_at(1)) {
                (Some('#'), _) | (Some('/'), Some('/')) => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            None => return Err(ConfigError::UnexpectedEof),
                            Some('*') if self.eat('/') => break,
                            Some(_) => {}
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Checks whether the cursor sits on a number: a digit, a sign followed
    /// by a digit or `.digit`, or `.` followed by a digit.
    pub(crate) fn starts_number(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+') | Some('-') => match self.peek_at(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('.') => matches!(self.peek_at(2), Some(c) if c.is_ascii_digit()),
                _ => false,
            },
            Some('.') => matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scans an integer, real, or timespan literal.
    ///
    /// The radix prefixes `0x`, `0b`, and a leading `0` for octal apply to
    /// integers; a fractional part or exponent makes the literal a real; a
    /// unit suffix makes it a timespan. An alphabetic run after the number
    /// that is not a unit is a trailing-character error.
    pub(crate) fn scan_number(&mut self) -> Result<Value> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        let number = if self.peek() == Some('.') {
            self.scan_real_tail(start)?
        } else if self.eat('0') {
            match self.peek() {
                Some('x') | Some('X') => {
                    self.bump();
                    self.scan_radix(16, negative, start)?
                }
                Some('b') | Some('B') => {
                    self.bump();
                    self.scan_radix(2, negative, start)?
                }
                Some(c) if ('0'..='7').contains(&c) => self.scan_radix(8, negative, start)?,
                Some('8') | Some('9') => return Err(self.unexpected()),
                Some('.') | Some('e') | Some('E') => self.scan_real_tail(start)?,
                _ => Scanned::Integer(0),
            }
        } else {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
            match self.peek() {
                Some('.') | Some('e') | Some('E') => self.scan_real_tail(start)?,
                _ => {
                    let digits = &self.input[start..self.pos];
                    let unsigned = digits.trim_start_matches(|c| c == '+' || c == '-');
                    self.finish_integer(unsigned, 10, negative, start)?
                }
            }
        };
        // A unit suffix turns the number into a timespan.
        let suffix_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.bump();
        }
        let suffix = &self.input[suffix_start..self.pos];
        if suffix.is_empty() {
            return Ok(match number {
                Scanned::Integer(x) => Value::Integer(x),
                Scanned::Real(x) => Value::Real(x),
            });
        }
        let unit = Timespan::unit_nanos(suffix).ok_or(ConfigError::TrailingCharacter {
            offset: suffix_start,
        })?;
        let overflow = || ConfigError::IntegerOverflow {
            literal: self.input[start..self.pos].to_string(),
        };
        let timespan = match number {
            Scanned::Integer(x) => Timespan::checked_from_int(x, unit).ok_or_else(overflow)?,
            Scanned::Real(x) => Timespan::checked_from_real(x, unit).ok_or_else(overflow)?,
        };
        Ok(Value::Timespan(timespan))
    }

    /// Completes a real literal; `start` marks the first character of the
    /// whole number, sign included.
    fn scan_real_tail(&mut self, start: usize) -> Result<Scanned> {
        if self.eat('.') {
            // A bare `1.` is a real; digits after the point are optional
            // unless the literal began with the point.
            let had_integral = self.input[start..self.pos - 1]
                .chars()
                .any(|c| c.is_ascii_digit());
            let mut fraction_digits = 0;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
                fraction_digits += 1;
            }
            if !had_integral && fraction_digits == 0 {
                return Err(self.unexpected());
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.unexpected());
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let literal = &self.input[start..self.pos];
        literal
            .parse::<f64>()
            .map(Scanned::Real)
            .map_err(|_| ConfigError::UnexpectedCharacter {
                found: '.',
                offset: start,
            })
    }

    /// Scans digits in the given radix and folds them into an integer.
    fn scan_radix(&mut self, radix: u32, negative: bool, start: usize) -> Result<Scanned> {
        let digits_start = self.pos;
        while matches!(self.peek(), Some(c) if c.to_digit(radix).is_some()) {
            self.bump();
        }
        let digits = &self.input[digits_start..self.pos];
        if digits.is_empty() {
            return Err(self.unexpected());
        }
        self.finish_integer(digits, radix, negative, start)
    }

    /// Folds a digit run into an `i64`, reporting overflow with the full
    /// literal text.
    fn finish_integer(
        &self,
        digits: &str,
        radix: u32,
        negative: bool,
        start: usize,
    ) -> Result<Scanned> {
        let mut magnitude: i128 = 0;
        for c in digits.chars() {
            // The digit set was validated by the caller.
            let d = c.to_digit(radix).unwrap_or(0) as i128;
            magnitude = (magnitude * radix as i128 + d).min(MAG_LIMIT);
        }
        let in_range = if negative {
            magnitude <= i64::MAX as i128 + 1
        } else {
            magnitude <= i64::MAX as i128
        };
        if !in_range {
            return Err(ConfigError::IntegerOverflow {
                literal: self.input[start..self.pos].to_string(),
            });
        }
        let value = if negative { -magnitude } else { magnitude };
        Ok(Scanned::Integer(value as i64))
    }

    /// Scans a quoted string, unescaping its contents. `quote` is the
    /// opening delimiter, not yet consumed.
    pub(crate) fn scan_quoted(&mut self, quote: char) -> Result<String> {
        self.bump();
        let mut out = String::new();
        loop {
            let escape_offset = self.pos;
            match self.bump() {
                None => return Err(ConfigError::UnexpectedEof),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(ConfigError::UnexpectedEof),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some('\'') => out.push('\''),
                    Some('x') => {
                        let hi = self.hex_digit(escape_offset)?;
                        let lo = self.hex_digit(escape_offset)?;
                        // Bytes above 0x7f become the code point of the same
                        // value to keep the result valid UTF-8.
                        out.push(char::from_u32(hi * 16 + lo).unwrap_or('\u{fffd}'));
                    }
                    Some(other) => {
                        return Err(ConfigError::InvalidEscapeSequence {
                            escape: format!("\\{}", other),
                            offset: escape_offset,
                        })
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn hex_digit(&mut self, escape_offset: usize) -> Result<u32> {
        match self.bump().and_then(|c| c.to_digit(16)) {
            Some(d) => Ok(d),
            None => Err(ConfigError::InvalidEscapeSequence {
                escape: self.input[escape_offset..self.pos].to_string(),
                offset: escape_offset,
            }),
        }
    }

    /// Scans an unquoted string: everything up to whitespace, `,`, `=`,
    /// `]`, `}`, or end of input.
    pub(crate) fn scan_symbol(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | '=' | ']' | '}') {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Scans a dictionary key: a run of alphanumerics, `_`, `-`, and `.`.
    pub(crate) fn scan_identifier(&mut self) -> Result<&'a str> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(&self.input[start..self.pos])
    }
}

/// A scanned numeric literal, before suffix handling.
enum Scanned {
    Integer(i64),
    Real(f64),
}

/// Parses a full string as an integer literal (any radix, optional sign).
pub(crate) fn parse_integer(input: &str) -> Result<i64> {
    match scan_all(input)? {
        Value::Integer(x) => Ok(x),
        _ => Err(ConfigError::conversion("not an integer literal")),
    }
}

/// Parses a full string as a real literal. Radix prefixes, `inf`, and `nan`
/// are rejected; plain decimal integers are accepted.
pub(crate) fn parse_real(input: &str) -> Result<f64> {
    let decimal = !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal {
        return Err(ConfigError::conversion("not a real literal"));
    }
    input
        .parse::<f64>()
        .map_err(|_| ConfigError::conversion("not a real literal"))
}

/// Parses a full string via the duration grammar: a number immediately
/// followed by a unit suffix.
pub(crate) fn parse_timespan(input: &str) -> Result<Timespan> {
    match scan_all(input)? {
        Value::Timespan(t) => Ok(t),
        _ => Err(ConfigError::conversion("not a timespan literal")),
    }
}

/// Scans one numeric literal covering the entire input.
fn scan_all(input: &str) -> Result<Value> {
    let mut scanner = Scanner::new(input);
    if !scanner.starts_number() {
        return Err(scanner.unexpected());
    }
    let value = scanner.scan_number()?;
    if !scanner.at_eof() {
        return Err(ConfigError::TrailingCharacter {
            offset: scanner.offset(),
        });
    }
    Ok(value)
}
