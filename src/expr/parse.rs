//! Parser for the schema expression vocabulary
//!
//! Accepts exactly what the renderer emits: constructor calls, chained
//! refiners/decorators, nested object literals. Used only to interpret
//! caller-supplied override strings on the live path — nothing outside
//! this grammar ever reaches a runtime, which is what closes the trust
//! boundary the original text-evaluation design left open.

use std::fmt;

use super::ast::{DefaultLiteral, ObjectMode, SchemaExpr, StringFormat};

/// Parse failure with byte position context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub pos: usize,
    pub message: String,
}

impl ParseError {
    fn new(pos: usize, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at offset {}: {}", self.pos, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse an expression, requiring the whole input to be consumed.
pub fn parse(input: &str) -> Result<SchemaExpr, ParseError> {
    let mut parser = Parser::new(input);
    let expr = parser.expression()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(ParseError::new(parser.pos, "trailing input after expression"));
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            src: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(ParseError::new(
                self.pos,
                format!("expected '{}'", expected as char),
            )),
        }
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                self.pos += 1;
            }
            _ => return Err(ParseError::new(self.pos, "expected identifier")),
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        // Identifier bytes are ASCII by construction
        Ok(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
    }

    /// Single-quoted string with `\'` and `\\` escapes
    fn quoted(&mut self) -> Result<String, ParseError> {
        self.expect(b'\'')?;
        let mut out: Vec<u8> = Vec::new();
        loop {
            match self.bump() {
                Some(b'\'') => {
                    return String::from_utf8(out)
                        .map_err(|_| ParseError::new(self.pos, "invalid utf-8 in string"));
                }
                Some(b'\\') => match self.bump() {
                    Some(b'\'') => out.push(b'\''),
                    Some(b'\\') => out.push(b'\\'),
                    _ => return Err(ParseError::new(self.pos, "invalid escape")),
                },
                Some(b) => out.push(b),
                None => return Err(ParseError::new(self.pos, "unterminated string")),
            }
        }
    }

    fn integer(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ParseError::new(self.pos, "expected integer"));
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        text.parse::<u32>()
            .map_err(|_| ParseError::new(start, "integer out of range"))
    }

    /// Numeric default literal, kept in its source spelling
    fn number_literal(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E')
        ) {
            self.pos += 1;
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        if text.parse::<f64>().is_err() {
            return Err(ParseError::new(start, "expected literal"));
        }
        Ok(text)
    }

    fn expression(&mut self) -> Result<SchemaExpr, ParseError> {
        self.skip_ws();
        let start = self.pos;
        let name = self.ident()?;
        self.expect(b'(')?;
        self.skip_ws();

        let mut expr = match name.as_str() {
            "string" => SchemaExpr::string(),
            "number" => SchemaExpr::number(),
            "boolean" => SchemaExpr::Boolean,
            "unknown" => SchemaExpr::Unknown,
            "binary" => SchemaExpr::Binary,
            "array" => {
                let element = self.expression()?;
                SchemaExpr::Array(Box::new(element))
            }
            "record" => {
                let value = self.expression()?;
                SchemaExpr::Record(Box::new(value))
            }
            "object" => self.object_body()?,
            other => {
                return Err(ParseError::new(
                    start,
                    format!("unknown constructor '{}'", other),
                ))
            }
        };
        self.skip_ws();
        self.expect(b')')?;

        loop {
            self.skip_ws();
            if self.peek() != Some(b'.') {
                break;
            }
            self.pos += 1;
            expr = self.chain(expr)?;
        }

        Ok(expr)
    }

    /// `{ key: expr, ... }` body of an object constructor
    fn object_body(&mut self) -> Result<SchemaExpr, ParseError> {
        self.expect(b'{')?;
        let mut fields = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(SchemaExpr::Object { fields, mode: None });
        }
        loop {
            self.skip_ws();
            let key = if self.peek() == Some(b'\'') {
                self.quoted()?
            } else {
                self.ident()?
            };
            self.skip_ws();
            self.expect(b':')?;
            let value = self.expression()?;
            fields.push((key, value));
            self.skip_ws();
            match self.bump() {
                Some(b',') => continue,
                Some(b'}') => break,
                _ => return Err(ParseError::new(self.pos, "expected ',' or '}'")),
            }
        }
        Ok(SchemaExpr::Object { fields, mode: None })
    }

    /// One `.name(args)` link applied to `base`
    fn chain(&mut self, base: SchemaExpr) -> Result<SchemaExpr, ParseError> {
        let start = self.pos;
        let name = self.ident()?;
        self.expect(b'(')?;
        self.skip_ws();

        let expr = match name.as_str() {
            "int" => match base {
                SchemaExpr::Number { .. } => SchemaExpr::Number { int: true },
                _ => return Err(ParseError::new(start, "int() applies to number()")),
            },
            "max" => {
                let limit = self.integer()?;
                match base {
                    SchemaExpr::String { format, .. } => SchemaExpr::String {
                        max: Some(limit),
                        format,
                    },
                    _ => return Err(ParseError::new(start, "max() applies to string()")),
                }
            }
            "date" | "datetime" | "time" | "uuid" => {
                let format = match name.as_str() {
                    "date" => StringFormat::Date,
                    "datetime" => StringFormat::DateTime,
                    "time" => StringFormat::Time,
                    _ => StringFormat::Uuid,
                };
                match base {
                    SchemaExpr::String { max, .. } => SchemaExpr::String {
                        max,
                        format: Some(format),
                    },
                    _ => {
                        return Err(ParseError::new(
                            start,
                            format!("{}() applies to string()", name),
                        ))
                    }
                }
            }
            "nullable" => SchemaExpr::Nullable(Box::new(base)),
            "default" => {
                let literal = self.default_literal()?;
                SchemaExpr::WithDefault(Box::new(base), literal)
            }
            "strict" | "passthrough" => {
                let mode = if name == "strict" {
                    ObjectMode::Strict
                } else {
                    ObjectMode::Passthrough
                };
                match base {
                    SchemaExpr::Object { fields, mode: None } => SchemaExpr::Object {
                        fields,
                        mode: Some(mode),
                    },
                    _ => {
                        return Err(ParseError::new(
                            start,
                            format!("{}() applies to an unmoded object()", name),
                        ))
                    }
                }
            }
            other => {
                return Err(ParseError::new(
                    start,
                    format!("unknown decorator '{}'", other),
                ))
            }
        };
        self.skip_ws();
        self.expect(b')')?;
        Ok(expr)
    }

    fn default_literal(&mut self) -> Result<DefaultLiteral, ParseError> {
        match self.peek() {
            Some(b'\'') => Ok(DefaultLiteral::Str(self.quoted()?)),
            Some(b't') | Some(b'f') => {
                let word = self.ident()?;
                match word.as_str() {
                    "true" => Ok(DefaultLiteral::Bool(true)),
                    "false" => Ok(DefaultLiteral::Bool(false)),
                    _ => Err(ParseError::new(self.pos, "expected literal")),
                }
            }
            _ => Ok(DefaultLiteral::Num(self.number_literal()?)),
        }
    }
}
