//! Non-executing parser for uploaded account payloads.
//!
//! Uploaded files historically look like `module.exports = [ ... ]` or
//! `const accounts = [ ... ]`. This module parses that shape with a small
//! recursive-descent grammar instead of evaluating it: an optional
//! assignment/export prefix, then exactly one data literal (objects, arrays,
//! strings, numbers, booleans, null), then an optional `;`. Identifiers in
//! value position, function calls and computed expressions are all hard
//! decode failures, so no uploaded byte is ever executed.

#[cfg(test)]
mod tests;

use serde_json::{Map, Number, Value};

use crate::models::DecodeError;

/// Decodes raw payload text into the ordered candidate sequence.
///
/// The document root must be an array; element order is preserved. Decoding
/// is pure, so the same payload always yields the same candidates.
pub fn decode(text: &str) -> Result<Vec<Value>, DecodeError> {
    let mut parser = Parser::new(text);

    parser.skip_trivia()?;
    parser.skip_prefix()?;

    let root = parser.parse_value()?;

    parser.skip_trivia()?;

    if parser.peek() == Some(b';') {
        parser.bump();
        parser.skip_trivia()?;
    }

    if let Some(byte) = parser.peek() {
        return Err(parser.fail(format!("unexpected trailing content starting with '{}'", byte as char)));
    }

    match root {
        Value::Array(candidates) => Ok(candidates),
        _ => Err(DecodeError::RootNotArray)
    }
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0
        }
    }

    fn fail(&self, reason: impl Into<String>) -> DecodeError {
        DecodeError::Malformed {
            offset: self.pos,
            reason: reason.into()
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, expected: u8) -> Result<(), DecodeError> {
        match self.peek() {
            Some(byte) if byte == expected => {
                self.bump();
                Ok(())
            }
            Some(byte) => Err(self.fail(format!("expected '{}' but found '{}'", expected as char, byte as char))),
            None => Err(self.fail(format!("expected '{}' but found end of input", expected as char)))
        }
    }

    /// Consumes whitespace and `//` / `/* */` comments. Comments carry no
    /// data, so they are treated exactly like whitespace.
    fn skip_trivia(&mut self) -> Result<(), DecodeError> {
        loop {
            match self.peek() {
                Some(byte) if byte.is_ascii_whitespace() => self.bump(),
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        while let Some(byte) = self.peek() {
                            self.bump();
                            if byte == b'\n' {
                                break;
                            }
                        }
                    }
                    Some(b'*') => {
                        self.pos += 2;
                        loop {
                            match self.peek() {
                                Some(b'*') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                                    self.pos += 2;
                                    break;
                                }
                                Some(_) => self.bump(),
                                None => return Err(self.fail("unterminated block comment"))
                            }
                        }
                    }
                    _ => return Err(self.fail("unexpected '/'"))
                },
                _ => return Ok(())
            }
        }
    }

    /// Recognizes an optional leading assignment/export prefix by grammar:
    /// `const|let|var <ident> =`, `module.exports =`, `export default` or
    /// `export const|let|var <ident> =`. Any other leading identifier is a
    /// decode failure, not something to strip and retry.
    fn skip_prefix(&mut self) -> Result<(), DecodeError> {
        if !self.at_ident_start() {
            return Ok(());
        }

        let keyword = self.read_ident();

        match keyword.as_str() {
            "const" | "let" | "var" => self.skip_binding()?,
            "module" => {
                self.expect(b'.')?;
                let property = self.read_ident();

                if property != "exports" {
                    return Err(self.fail(format!("expected 'exports' after 'module.' but found '{property}'")));
                }

                self.skip_trivia()?;
                self.expect(b'=')?;
            }
            "export" => {
                self.skip_trivia()?;

                if !self.at_ident_start() {
                    return Err(self.fail("expected 'default', 'const', 'let' or 'var' after 'export'"));
                }

                let follower = self.read_ident();

                match follower.as_str() {
                    "default" => {}
                    "const" | "let" | "var" => self.skip_binding()?,
                    other => return Err(self.fail(format!("unexpected '{other}' after 'export'")))
                }
            }
            other => return Err(self.fail(format!("unexpected identifier '{other}'")))
        }

        self.skip_trivia()
    }

    /// Consumes `<ident> =` after a `const`/`let`/`var` keyword.
    fn skip_binding(&mut self) -> Result<(), DecodeError> {
        self.skip_trivia()?;

        if !self.at_ident_start() {
            return Err(self.fail("expected a binding name"));
        }

        self.read_ident();
        self.skip_trivia()?;
        self.expect(b'=')
    }

    fn at_ident_start(&self) -> bool {
        matches!(self.peek(), Some(byte) if byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$')
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;

        while let Some(byte) = self.peek() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' {
                self.bump();
            } else {
                break;
            }
        }

        self.text[start..self.pos].to_string()
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        self.skip_trivia()?;

        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') | Some(b'\'') => self.parse_string().map(Value::String),
            Some(byte) if byte == b'-' || byte.is_ascii_digit() => self.parse_number(),
            Some(_) if self.at_ident_start() => {
                let word_offset = self.pos;
                let word = self.read_ident();

                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    // Covers bare identifiers, call expressions and anything
                    // else the grammar refuses to evaluate.
                    other => Err(DecodeError::Malformed {
                        offset: word_offset,
                        reason: format!("non-literal token '{other}' is not allowed")
                    })
                }
            }
            Some(byte) => Err(self.fail(format!("unexpected character '{}'", byte as char))),
            None => Err(self.fail("unexpected end of input"))
        }
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.expect(b'{')?;

        let mut object = Map::new();

        loop {
            self.skip_trivia()?;

            match self.peek() {
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(object));
                }
                Some(b'"') | Some(b'\'') => {
                    let key = self.parse_string()?;
                    self.parse_member(key, &mut object)?;
                }
                Some(_) if self.at_ident_start() => {
                    let key = self.read_ident();
                    self.parse_member(key, &mut object)?;
                }
                Some(byte) => return Err(self.fail(format!("expected an object key but found '{}'", byte as char))),
                None => return Err(self.fail("unterminated object literal"))
            }

            self.skip_trivia()?;

            match self.peek() {
                Some(b',') => self.bump(),
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(object));
                }
                Some(byte) => return Err(self.fail(format!("expected ',' or '}}' but found '{}'", byte as char))),
                None => return Err(self.fail("unterminated object literal"))
            }
        }
    }

    fn parse_member(&mut self, key: String, object: &mut Map<String, Value>) -> Result<(), DecodeError> {
        self.skip_trivia()?;
        self.expect(b':')?;

        let value = self.parse_value()?;
        object.insert(key, value);

        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.expect(b'[')?;

        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;

            match self.peek() {
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => items.push(self.parse_value()?),
                None => return Err(self.fail("unterminated array literal"))
            }

            self.skip_trivia()?;

            match self.peek() {
                Some(b',') => self.bump(),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(byte) => return Err(self.fail(format!("expected ',' or ']' but found '{}'", byte as char))),
                None => return Err(self.fail("unterminated array literal"))
            }
        }
    }

    /// Parses a single- or double-quoted string with JSON escape sequences
    /// plus `\'`. Raw (unescaped) segments are copied verbatim, so non-ASCII
    /// text passes through untouched.
    fn parse_string(&mut self) -> Result<String, DecodeError> {
        let quote = match self.peek() {
            Some(byte @ (b'"' | b'\'')) => byte,
            _ => return Err(self.fail("expected a string literal"))
        };

        self.bump();

        let mut result = String::new();
        let mut segment_start = self.pos;

        loop {
            match self.peek() {
                Some(byte) if byte == quote => {
                    result.push_str(&self.text[segment_start..self.pos]);
                    self.bump();
                    return Ok(result);
                }
                Some(b'\\') => {
                    result.push_str(&self.text[segment_start..self.pos]);
                    self.bump();
                    result.push(self.parse_escape()?);
                    segment_start = self.pos;
                }
                Some(b'\n') | None => return Err(self.fail("unterminated string literal")),
                Some(_) => self.bump()
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, DecodeError> {
        let escaped = match self.peek() {
            Some(byte) => byte,
            None => return Err(self.fail("unterminated escape sequence"))
        };

        self.bump();

        match escaped {
            b'"' => Ok('"'),
            b'\'' => Ok('\''),
            b'\\' => Ok('\\'),
            b'/' => Ok('/'),
            b'b' => Ok('\u{0008}'),
            b'f' => Ok('\u{000C}'),
            b'n' => Ok('\n'),
            b'r' => Ok('\r'),
            b't' => Ok('\t'),
            b'u' => self.parse_unicode_escape(),
            other => Err(self.fail(format!("unsupported escape sequence '\\{}'", other as char)))
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, DecodeError> {
        let unit = self.parse_hex_unit()?;

        // High surrogates must pair with a following \u escape.
        let code_point = if (0xD800..0xDC00).contains(&unit) {
            if self.peek() == Some(b'\\') && self.bytes.get(self.pos + 1) == Some(&b'u') {
                self.pos += 2;
                let low = self.parse_hex_unit()?;

                if !(0xDC00..0xE000).contains(&low) {
                    return Err(self.fail("invalid low surrogate in unicode escape"));
                }

                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            } else {
                return Err(self.fail("unpaired surrogate in unicode escape"));
            }
        } else if (0xDC00..0xE000).contains(&unit) {
            return Err(self.fail("unpaired surrogate in unicode escape"));
        } else {
            unit
        };

        char::from_u32(code_point).ok_or_else(|| self.fail("invalid unicode escape"))
    }

    fn parse_hex_unit(&mut self) -> Result<u32, DecodeError> {
        let start = self.pos;

        for _ in 0..4 {
            match self.peek() {
                Some(byte) if byte.is_ascii_hexdigit() => self.bump(),
                _ => return Err(self.fail("expected four hex digits in unicode escape"))
            }
        }

        u32::from_str_radix(&self.text[start..self.pos], 16)
            .map_err(|_| self.fail("expected four hex digits in unicode escape"))
    }

    /// Parses a number with the JSON grammar: optional sign, integer part,
    /// optional fraction and exponent.
    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.bump();
        }

        let integer_digits = self.consume_digits();

        if integer_digits == 0 {
            return Err(self.fail("expected a digit"));
        }

        let mut is_integer = true;

        if self.peek() == Some(b'.') {
            is_integer = false;
            self.bump();

            if self.consume_digits() == 0 {
                return Err(self.fail("expected a digit after decimal point"));
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_integer = false;
            self.bump();

            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }

            if self.consume_digits() == 0 {
                return Err(self.fail("expected a digit in exponent"));
            }
        }

        let literal = &self.text[start..self.pos];

        if is_integer {
            if let Ok(value) = literal.parse::<i64>() {
                return Ok(Value::Number(Number::from(value)));
            }
        }

        let value: f64 = literal
            .parse()
            .map_err(|_| self.fail(format!("invalid number literal '{literal}'")))?;

        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| self.fail(format!("number literal '{literal}' is out of range")))
    }

    fn consume_digits(&mut self) -> usize {
        let start = self.pos;

        while matches!(self.peek(), Some(byte) if byte.is_ascii_digit()) {
            self.bump();
        }

        self.pos - start
    }
}
