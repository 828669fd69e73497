// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict parser for the configuration text format.
//!
//! The grammar covers standalone values, lists, dictionaries (braced, with
//! `key = value` and `key { ... }` entries), dotted keys that expand into
//! nested dictionaries, trailing commas, and the three comment forms.
//! [`parse_config`] additionally accepts a whole configuration document
//! whose outer braces are omitted.

use crate::adapters::lexer::Scanner;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::{Dictionary, List, Value};

/// Parses a single value covering the entire input (up to trailing
/// whitespace and comments).
///
/// Unlike [`Value::parse`], this strict entry point never falls back to an
/// unescaped string: whatever the grammar rejects is an error.
///
/// # Examples
///
/// ```
/// use dyncfg::adapters::text::parse_value;
/// use dyncfg::domain::value::Value;
///
/// assert_eq!(parse_value("true").unwrap(), Value::Boolean(true));
/// assert!(parse_value("true false").is_err());
/// ```
pub fn parse_value(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input, false);
    let value = parser.value()?;
    parser.finish()?;
    Ok(value)
}

/// Parses the list grammar; the first non-trivia character must be `[`.
pub fn parse_list(input: &str) -> Result<List> {
    let mut parser = Parser::new(input, false);
    parser.scan.skip_trivia()?;
    if !parser.scan.eat('[') {
        return Err(parser.scan.unexpected());
    }
    let items = parser.list_body()?;
    parser.finish()?;
    Ok(items)
}

/// Parses the dictionary grammar; the first non-trivia character must be
/// `{`.
pub fn parse_dictionary(input: &str) -> Result<Dictionary> {
    let mut parser = Parser::new(input, false);
    parser.scan.skip_trivia()?;
    if !parser.scan.eat('{') {
        return Err(parser.scan.unexpected());
    }
    let dict = parser.dictionary_body(true)?;
    parser.finish()?;
    Ok(dict)
}

/// Parses a configuration document: a dictionary whose outer braces may be
/// omitted and whose entries may be separated by whitespace instead of
/// commas. An empty or comment-only document is an empty dictionary.
///
/// # Examples
///
/// ```
/// use dyncfg::adapters::text::parse_config;
///
/// let dict = parse_config("# server settings\nhost = \"localhost\"\nport = 4242\n").unwrap();
/// assert_eq!(dict.len(), 2);
/// ```
pub fn parse_config(input: &str) -> Result<Dictionary> {
    let mut parser = Parser::new(input, true);
    parser.scan.skip_trivia()?;
    if parser.scan.at_eof() {
        return Ok(Dictionary::new());
    }
    if parser.scan.eat('{') {
        let dict = parser.dictionary_body(true)?;
        parser.finish()?;
        Ok(dict)
    } else {
        parser.dictionary_body(false)
    }
}

struct Parser<'a> {
    scan: Scanner<'a>,
    /// Document mode relaxes dictionary separators: entries may follow each
    /// other with only whitespace between them.
    document: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, document: bool) -> Self {
        Parser {
            scan: Scanner::new(input),
            document,
        }
    }

    /// Rejects anything but trivia after a completed top-level production.
    fn finish(&mut self) -> Result<()> {
        self.scan.skip_trivia()?;
        if !self.scan.at_eof() {
            return Err(ConfigError::TrailingCharacter {
                offset: self.scan.offset(),
            });
        }
        Ok(())
    }

    fn value(&mut self) -> Result<Value> {
        self.scan.skip_trivia()?;
        match self.scan.peek() {
            None => Err(ConfigError::UnexpectedEof),
            Some('[') => {
                self.scan.bump();
                Ok(Value::List(self.list_body()?))
            }
            Some('{') => {
                self.scan.bump();
                Ok(Value::Dictionary(self.dictionary_body(true)?))
            }
            Some(quote @ ('"' | '\'')) => Ok(Value::String(self.scan.scan_quoted(quote)?)),
            _ if self.scan.starts_number() => self.scan.scan_number(),
            Some(',' | '=' | ']' | '}') => Err(self.scan.unexpected()),
            Some(_) => Ok(match self.scan.scan_symbol() {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                other => Value::String(other.to_string()),
            }),
        }
    }

    /// Parses list elements after the opening `[`.
    fn list_body(&mut self) -> Result<List> {
        let mut items = List::new();
        self.scan.skip_trivia()?;
        if self.scan.eat(']') {
            return Ok(items);
        }
        loop {
            items.push(self.value()?);
            self.scan.skip_trivia()?;
            if self.scan.eat(',') {
                self.scan.skip_trivia()?;
                if self.scan.eat(']') {
                    return Ok(items);
                }
            } else if self.scan.eat(']') {
                return Ok(items);
            } else {
                return Err(self.scan.unexpected());
            }
        }
    }

    /// Parses dictionary entries. Braced dictionaries end at `}`; a bare
    /// document ends at end of input. Value literals require comma
    /// separators, document mode also accepts plain whitespace.
    fn dictionary_body(&mut self, braced: bool) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        loop {
            self.scan.skip_trivia()?;
            if braced {
                if self.scan.eat('}') {
                    return Ok(dict);
                }
            } else if self.scan.at_eof() {
                return Ok(dict);
            }
            let key_offset = self.scan.offset();
            let (key, quoted) = self.key()?;
            self.scan.skip_trivia()?;
            let value = match self.scan.peek() {
                Some('=') => {
                    self.scan.bump();
                    self.value()?
                }
                // `key { ... }` is sugar for `key = { ... }`.
                Some('{') => {
                    self.scan.bump();
                    Value::Dictionary(self.dictionary_body(true)?)
                }
                _ => return Err(self.scan.unexpected()),
            };
            insert_entry(&mut dict, key, quoted, value, key_offset)?;
            self.scan.skip_trivia()?;
            if self.scan.eat(',') {
                continue;
            }
            if braced {
                if self.scan.eat('}') {
                    return Ok(dict);
                }
                if !self.document {
                    return Err(self.scan.unexpected());
                }
            }
        }
    }

    fn key(&mut self) -> Result<(String, bool)> {
        match self.scan.peek() {
            Some(quote @ ('"' | '\'')) => Ok((self.scan.scan_quoted(quote)?, true)),
            _ => Ok((self.scan.scan_identifier()?.to_string(), false)),
        }
    }
}

/// Stores an entry, expanding dots in unquoted keys into nested
/// dictionaries. Quoted keys are stored verbatim. Within one document the
/// last write to a path wins.
fn insert_entry(
    dict: &mut Dictionary,
    key: String,
    quoted: bool,
    value: Value,
    key_offset: usize,
) -> Result<()> {
    if quoted || !key.contains('.') {
        dict.insert(key, value);
        return Ok(());
    }
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::UnexpectedCharacter {
            found: '.',
            offset: key_offset,
        });
    }
    let mut current = dict;
    for segment in &segments[..segments.len() - 1] {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Dictionary(Dictionary::new()));
        if !matches!(slot, Value::Dictionary(_)) {
            *slot = Value::Dictionary(Dictionary::new());
        }
        current = match slot {
            Value::Dictionary(next) => next,
            _ => unreachable!("the slot was just replaced"),
        };
    }
    current.insert(segments[segments.len() - 1].to_string(), value);
    Ok(())
}
