//! Strict RFC 8941 parsing.
//!
//! A single-pass recursive-descent reader over the input bytes. There is
//! no lexer table and no regular expression: each lexical class is an
//! explicit byte test, and the reader keeps one cursor that only moves
//! forward. The first grammar violation aborts the parse with
//! [`Error::Syntax`] carrying the byte offset of the offending position.
//!
//! The three field shapes have separate entry points; nothing here guesses
//! which shape a field value is.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use indexmap::IndexMap;

use crate::dict::Dictionary;
use crate::error::{Error, Result};
use crate::field::Member;
use crate::item::Item;
use crate::key::Key;
use crate::list::{InnerList, List};
use crate::params::Parameters;
use crate::value::{BareValue, Decimal, Token};

pub(crate) fn parse_item_field(input: &str) -> Result<Item> {
    let mut parser = Parser::new(input);
    parser.discard_sp();
    if parser.eof() {
        return Err(parser.syntax("empty item field"));
    }
    let item = parser.parse_item()?;
    parser.finish()?;
    Ok(item)
}

pub(crate) fn parse_list_field(input: &str) -> Result<List> {
    let mut parser = Parser::new(input);
    parser.discard_sp();
    let mut members = Vec::new();
    while !parser.eof() {
        members.push(parser.parse_member()?);
        if parser.member_separator()? {
            break;
        }
    }
    Ok(List::from_members(members))
}

pub(crate) fn parse_dictionary_field(input: &str) -> Result<Dictionary> {
    let mut parser = Parser::new(input);
    parser.discard_sp();
    let mut entries = IndexMap::new();
    while !parser.eof() {
        let key = parser.parse_key()?;
        let member = if parser.peek() == Some(b'=') {
            parser.advance();
            parser.parse_member()?
        } else {
            // A bare key is a boolean-true item; parameters still attach.
            let params = parser.parse_parameters()?;
            Member::Item(Item::with(BareValue::Boolean(true), params))
        };
        // A repeated key overwrites its member but keeps the original
        // position.
        entries.insert(key, member);
        if parser.member_separator()? {
            break;
        }
    }
    Ok(Dictionary::from_map(entries))
}

pub(crate) fn parse_parameters_wire(input: &str) -> Result<Parameters> {
    let mut parser = Parser::new(input);
    let params = parser.parse_parameters()?;
    parser.expect_eof()?;
    Ok(params)
}

pub(crate) fn parse_inner_list_wire(input: &str) -> Result<InnerList> {
    let mut parser = Parser::new(input);
    parser.discard_sp();
    let list = parser.parse_inner_list()?;
    parser.finish()?;
    Ok(list)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn eof(&self) -> bool {
        self.pos == self.input.len()
    }

    fn syntax(&self, reason: impl Into<String>) -> Error {
        Error::syntax(self.pos, reason)
    }

    fn discard_sp(&mut self) {
        while self.peek() == Some(b' ') {
            self.advance();
        }
    }

    fn discard_ows(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.advance();
        }
    }

    /// Trailing SP is tolerated; anything else is an error.
    fn finish(&mut self) -> Result<()> {
        self.discard_sp();
        self.expect_eof()
    }

    fn expect_eof(&self) -> Result<()> {
        if self.eof() {
            Ok(())
        } else {
            Err(self.syntax("unexpected trailing characters"))
        }
    }

    /// Consumes the `,` between list or dictionary members, with OWS on
    /// both sides. Returns `true` at the end of input.
    fn member_separator(&mut self) -> Result<bool> {
        self.discard_ows();
        if self.eof() {
            return Ok(true);
        }
        if self.peek() != Some(b',') {
            return Err(self.syntax("expected `,` between members"));
        }
        self.advance();
        self.discard_ows();
        if self.eof() {
            return Err(self.syntax("trailing comma"));
        }
        Ok(false)
    }

    fn parse_member(&mut self) -> Result<Member> {
        if self.peek() == Some(b'(') {
            Ok(Member::InnerList(self.parse_inner_list()?))
        } else {
            Ok(Member::Item(self.parse_item()?))
        }
    }

    fn parse_item(&mut self) -> Result<Item> {
        let value = self.parse_bare_item()?;
        let params = self.parse_parameters()?;
        Ok(Item::with(value, params))
    }

    fn parse_inner_list(&mut self) -> Result<InnerList> {
        if self.peek() != Some(b'(') {
            return Err(self.syntax("expected `(`"));
        }
        self.advance();
        let mut items = Vec::new();
        loop {
            self.discard_sp();
            match self.peek() {
                Some(b')') => {
                    self.advance();
                    let params = self.parse_parameters()?;
                    return Ok(InnerList::with(items, params));
                }
                Some(_) => {}
                None => return Err(self.syntax("unterminated inner list")),
            }
            items.push(self.parse_item()?);
            match self.peek() {
                Some(b' ') | Some(b')') => {}
                Some(_) => return Err(self.syntax("expected SP or `)` in inner list")),
                None => return Err(self.syntax("unterminated inner list")),
            }
        }
    }

    fn parse_parameters(&mut self) -> Result<Parameters> {
        let mut entries = IndexMap::new();
        while self.peek() == Some(b';') {
            self.advance();
            self.discard_sp();
            let key = self.parse_key()?;
            let value = if self.peek() == Some(b'=') {
                self.advance();
                self.parse_bare_item()?
            } else {
                BareValue::Boolean(true)
            };
            // Duplicate keys overwrite in place.
            entries.insert(key, value);
        }
        Ok(Parameters::from_map(entries))
    }

    fn parse_key(&mut self) -> Result<Key> {
        let start = self.pos;
        match self.peek() {
            Some(b'a'..=b'z') | Some(b'*') => self.advance(),
            _ => return Err(self.syntax("key must start with a lowercase letter or `*`")),
        }
        while let Some(b) = self.peek() {
            match b {
                b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'*' => self.advance(),
                _ => break,
            }
        }
        // The loop admitted only valid key bytes, which are ASCII.
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.syntax("key is not ASCII"))?;
        Ok(Key::from_validated(text))
    }

    fn parse_bare_item(&mut self) -> Result<BareValue> {
        match self.peek() {
            Some(b'"') => self.parse_string(),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(b':') => self.parse_byte_sequence(),
            Some(b'?') => self.parse_boolean(),
            Some(b'*') | Some(b'A'..=b'Z') | Some(b'a'..=b'z') => self.parse_token(),
            #[cfg(feature = "date")]
            Some(b'@') => self.parse_date(),
            Some(_) => Err(self.syntax("expected a bare item")),
            None => Err(self.syntax("expected a bare item, got end of input")),
        }
    }

    fn parse_string(&mut self) -> Result<BareValue> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.advance();
                    return Ok(BareValue::String(text));
                }
                Some(b'\\') => {
                    self.advance();
                    match self.peek() {
                        Some(b @ (b'"' | b'\\')) => {
                            text.push(b as char);
                            self.advance();
                        }
                        Some(_) => return Err(self.syntax("invalid escape in string")),
                        None => return Err(self.syntax("unterminated string")),
                    }
                }
                Some(b @ 0x20..=0x7e) => {
                    text.push(b as char);
                    self.advance();
                }
                Some(_) => return Err(self.syntax("invalid character in string")),
                None => return Err(self.syntax("unterminated string")),
            }
        }
    }

    // Integers and decimals share a scanner: the `.` switches to the
    // decimal rules, and the digit-count limits differ per RFC 8941
    // §4.2.4.
    fn parse_number(&mut self) -> Result<BareValue> {
        let mut sign = 1i64;
        if self.peek() == Some(b'-') {
            sign = -1;
            self.advance();
        }
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.syntax("expected a digit"));
        }

        let mut magnitude = 0i64;
        let mut int_digits = 0u32;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            int_digits += 1;
            if int_digits > 15 {
                return Err(self.syntax("integer has more than 15 digits"));
            }
            magnitude = magnitude * 10 + i64::from(b - b'0');
            self.advance();
        }

        if self.peek() != Some(b'.') {
            return Ok(BareValue::Integer(sign * magnitude));
        }

        if int_digits > 12 {
            return Err(self.syntax("decimal has more than 12 integer digits"));
        }
        self.advance();

        let mut frac_digits = 0u32;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            frac_digits += 1;
            if frac_digits > 3 {
                return Err(self.syntax("decimal has more than 3 fractional digits"));
            }
            magnitude = magnitude * 10 + i64::from(b - b'0');
            self.advance();
        }
        if frac_digits == 0 {
            return Err(self.syntax("decimal ends without fractional digits"));
        }

        let thousandths = sign * magnitude * 10i64.pow(3 - frac_digits);
        Ok(BareValue::Decimal(Decimal::from_thousandths_unchecked(
            thousandths,
        )))
    }

    fn parse_byte_sequence(&mut self) -> Result<BareValue> {
        self.advance();
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b':') => break,
                Some(b'A'..=b'Z') | Some(b'a'..=b'z') | Some(b'0'..=b'9') | Some(b'+')
                | Some(b'/') | Some(b'=') => self.advance(),
                Some(_) => return Err(self.syntax("invalid character in byte sequence")),
                None => return Err(self.syntax("unterminated byte sequence")),
            }
        }
        let decoded = BASE64
            .decode(&self.input[start..self.pos])
            .map_err(|_| Error::syntax(start, "invalid base64 in byte sequence"))?;
        self.advance();
        Ok(BareValue::ByteSequence(decoded))
    }

    fn parse_boolean(&mut self) -> Result<BareValue> {
        self.advance();
        let value = match self.peek() {
            Some(b'1') => true,
            Some(b'0') => false,
            _ => return Err(self.syntax("boolean must be `?0` or `?1`")),
        };
        self.advance();
        Ok(BareValue::Boolean(value))
    }

    fn parse_token(&mut self) -> Result<BareValue> {
        let start = self.pos;
        self.advance();
        while let Some(b) = self.peek() {
            if crate::value::is_token_char(b) {
                self.advance();
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.syntax("token is not ASCII"))?;
        Ok(BareValue::Token(Token::from_validated(text)))
    }

    #[cfg(feature = "date")]
    fn parse_date(&mut self) -> Result<BareValue> {
        let start = self.pos;
        self.advance();
        match self.parse_number()? {
            BareValue::Integer(seconds) => Ok(BareValue::Date(seconds)),
            _ => Err(Error::syntax(start, "date must be an integer")),
        }
    }
}
