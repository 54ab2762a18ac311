//! Identity string parsing.
//!
//! This module provides the [`Parser`] that reads identity strings back into
//! [`Node`]s and [`Value`]s, and the deserializer behind
//! [`from_value`](crate::from_value).
//!
//! ## Overview
//!
//! - **Single pass**: one character of lookahead, no backtracking
//! - **Byte offsets**: every error carries the offset where parsing stopped
//! - **Bounded nesting**: containers and nodes deeper than
//!   [`IdOptions::max_depth`] are rejected before recursing further
//! - **Whole input**: anything left after the top-level value is an error
//!
//! ## Usage
//!
//! ```rust
//! use whatid::{parse, Value};
//!
//! let node = parse("rfc(criterion='gini',depth=None,n_trees=10)").unwrap();
//! assert_eq!(node.name, "rfc");
//! assert_eq!(node.get("n_trees"), Some(&Value::Int(10)));
//! assert_eq!(node.get("depth"), Some(&Value::Absent));
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use whatid::{parse, Error};
//!
//! assert!(matches!(
//!     parse("N(a=1,a=2)"),
//!     Err(Error::DuplicateKey { offset: 6, .. })
//! ));
//! assert!(matches!(
//!     parse("N(a='x"),
//!     Err(Error::UnexpectedEndOfInput { .. })
//! ));
//! ```

use crate::format::{self, is_identifier_continue, is_identifier_start};
use crate::{Error, IdOptions, Node, Params, Result, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Parse an identity string into its top-level [`Node`].
///
/// # Errors
///
/// Returns a positioned error for malformed input, duplicate keys, nesting
/// deeper than 64 levels, or trailing input.
pub fn parse(input: &str) -> Result<Node> {
    parse_with_options(input, &IdOptions::default())
}

/// Parse an identity string with a custom depth limit.
pub fn parse_with_options(input: &str, options: &IdOptions) -> Result<Node> {
    let result = Parser::new(input, options.max_depth).parse_node_document();
    log_outcome(input, &result);
    result
}

/// Parse any rendered value, such as `[1,'a',None]` or a whole node.
///
/// # Examples
///
/// ```rust
/// use whatid::{parse_value, Value};
///
/// let value = parse_value("{'a':[1,2.5],None:nan}").unwrap();
/// assert!(value.is_mapping());
/// assert_eq!(parse_value("-inf").unwrap(), Value::Float(f64::NEG_INFINITY));
/// ```
pub fn parse_value(input: &str) -> Result<Value> {
    parse_value_with_options(input, &IdOptions::default())
}

/// Parse any rendered value with a custom depth limit.
pub fn parse_value_with_options(input: &str, options: &IdOptions) -> Result<Value> {
    let result = Parser::new(input, options.max_depth).parse_document();
    log_outcome(input, &result);
    result
}

fn log_outcome<T>(input: &str, result: &Result<T>) {
    match result {
        Ok(_) => tracing::trace!(len = input.len(), "parsed identity string"),
        Err(err) => tracing::debug!(
            error = %err,
            offset = ?err.offset(),
            "rejected identity string"
        ),
    }
}

/// Recursive-descent parser over an identity string.
///
/// Positions are byte offsets into the input.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, max_depth: usize) -> Self {
        Parser {
            input,
            position: 0,
            max_depth,
        }
    }

    /// Parses the whole input as one value.
    pub fn parse_document(mut self) -> Result<Value> {
        let value = self.parse_value(1)?;
        self.finish()?;
        Ok(value)
    }

    /// Parses the whole input as one node.
    pub fn parse_node_document(mut self) -> Result<Node> {
        self.skip_whitespace();
        let start = self.position;
        match self.peek_char() {
            None => return Err(Error::unexpected_eof(start, "a node")),
            Some(ch) if !is_identifier_start(ch) => {
                return Err(Error::unexpected_token(start, "a node", &describe(ch)))
            }
            Some(_) => {}
        }
        match self.parse_value(1)? {
            Value::Node(node) => {
                self.finish()?;
                Ok(node)
            }
            other => Err(Error::unexpected_token(start, "a node", other.kind())),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek_char() {
            None => Ok(()),
            Some(ch) => Err(Error::unexpected_token(
                self.position,
                "end of input",
                &describe(ch),
            )),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_whitespace() {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        let offset = self.position;
        match self.next_char() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(Error::unexpected_token(
                offset,
                &describe(expected),
                &describe(ch),
            )),
            None => Err(Error::unexpected_eof(offset, &describe(expected))),
        }
    }

    /// After an element: either a separator (`true`) or the closing bracket.
    fn separator_or(&mut self, close: char) -> Result<bool> {
        self.skip_whitespace();
        let offset = self.position;
        match self.next_char() {
            Some(format::SEPARATOR) => Ok(true),
            Some(ch) if ch == close => Ok(false),
            Some(ch) => Err(Error::unexpected_token(
                offset,
                &format!("',' or {}", describe(close)),
                &describe(ch),
            )),
            None => Err(Error::unexpected_eof(
                offset,
                &format!("',' or {}", describe(close)),
            )),
        }
    }

    /// Consumes `close` if it comes next, for empty containers.
    fn eat_close(&mut self, close: char) -> bool {
        self.skip_whitespace();
        if self.peek_char() == Some(close) {
            self.position += close.len_utf8();
            true
        } else {
            false
        }
    }

    fn enter(&self, level: usize, offset: usize) -> Result<()> {
        if level > self.max_depth {
            Err(Error::depth_exceeded_at(self.max_depth, offset))
        } else {
            Ok(())
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if is_identifier_continue(ch) {
                self.position += 1;
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }

    fn parse_value(&mut self, level: usize) -> Result<Value> {
        self.skip_whitespace();
        let start = self.position;
        match self.peek_char() {
            None => Err(Error::unexpected_eof(start, "a value")),
            Some(format::QUOTE) | Some(format::ALT_QUOTE) => self.parse_text().map(Value::Text),
            Some(format::SEQ_OPEN) => self.parse_sequence(level),
            Some(format::MAP_OPEN) => self.parse_mapping(level),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if is_identifier_start(ch) => {
                let word = self.read_identifier();
                self.skip_whitespace();
                if self.peek_char() == Some(format::PARAMS_OPEN) {
                    return self.parse_params(word, level, start).map(Value::Node);
                }
                match word {
                    format::ABSENT => Ok(Value::Absent),
                    format::TRUE => Ok(Value::Bool(true)),
                    format::FALSE => Ok(Value::Bool(false)),
                    format::NAN => Ok(Value::Float(f64::NAN)),
                    format::INFINITY => Ok(Value::Float(f64::INFINITY)),
                    _ => Err(Error::unexpected_token(start, "a value", word)),
                }
            }
            Some(ch) => Err(Error::unexpected_token(start, "a value", &describe(ch))),
        }
    }

    fn parse_params(&mut self, name: &str, level: usize, start: usize) -> Result<Node> {
        self.enter(level, start)?;
        self.expect(format::PARAMS_OPEN)?;

        let mut params = Params::new();
        if self.eat_close(format::PARAMS_CLOSE) {
            return Ok(Node::new(name, params));
        }
        loop {
            self.skip_whitespace();
            let key_start = self.position;
            match self.peek_char() {
                Some(ch) if is_identifier_start(ch) => {}
                Some(ch) => {
                    return Err(Error::unexpected_token(
                        key_start,
                        "a parameter name",
                        &describe(ch),
                    ))
                }
                None => return Err(Error::unexpected_eof(key_start, "a parameter name")),
            }
            let key = self.read_identifier();
            self.expect(format::ASSIGN)?;
            let value = self.parse_value(level + 1)?;
            if params.contains_key(key) {
                return Err(Error::duplicate_key(key_start, key));
            }
            params.insert(key, value);

            if !self.separator_or(format::PARAMS_CLOSE)? {
                return Ok(Node::new(name, params));
            }
        }
    }

    fn parse_sequence(&mut self, level: usize) -> Result<Value> {
        self.enter(level, self.position)?;
        self.expect(format::SEQ_OPEN)?;

        let mut items = Vec::new();
        if self.eat_close(format::SEQ_CLOSE) {
            return Ok(Value::Sequence(items));
        }
        loop {
            items.push(self.parse_value(level + 1)?);
            if !self.separator_or(format::SEQ_CLOSE)? {
                return Ok(Value::Sequence(items));
            }
        }
    }

    fn parse_mapping(&mut self, level: usize) -> Result<Value> {
        self.enter(level, self.position)?;
        self.expect(format::MAP_OPEN)?;

        let mut entries: Vec<(Value, Value)> = Vec::new();
        if self.eat_close(format::MAP_CLOSE) {
            return Ok(Value::Mapping(entries));
        }
        loop {
            self.skip_whitespace();
            let key_start = self.position;
            let key = self.parse_value(level + 1)?;
            self.expect(format::MAP_ENTRY)?;
            let value = self.parse_value(level + 1)?;
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(Error::duplicate_key(key_start, &key.to_string()));
            }
            entries.push((key, value));

            if !self.separator_or(format::MAP_CLOSE)? {
                return Ok(Value::Mapping(entries));
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.position;
        if self.peek_char() == Some('-') {
            self.position += 1;
            if self.peek_char().is_some_and(is_identifier_start) {
                let word = self.read_identifier();
                return if word == format::INFINITY {
                    Ok(Value::Float(f64::NEG_INFINITY))
                } else {
                    Err(Error::invalid_number(start, &self.input[start..self.position]))
                };
            }
        }

        let mut is_float = false;
        while let Some(ch) = self.peek_char() {
            match ch {
                '0'..='9' | '+' | '-' => {}
                '.' | 'e' | 'E' => is_float = true,
                _ => break,
            }
            self.position += 1;
        }

        let literal = &self.input[start..self.position];
        let starts_with_digit = literal
            .trim_start_matches('-')
            .starts_with(|c: char| c.is_ascii_digit());
        if !starts_with_digit {
            return Err(Error::invalid_number(start, literal));
        }
        if is_float {
            literal
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| Error::invalid_number(start, literal))
        } else {
            literal
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| Error::invalid_number(start, literal))
        }
    }

    fn parse_text(&mut self) -> Result<String> {
        let quote = match self.next_char() {
            Some(ch) => ch,
            None => return Err(Error::unexpected_eof(self.position, "text")),
        };
        let mut result = String::new();

        loop {
            let escape_start = self.position;
            match self.next_char() {
                None => {
                    return Err(Error::unexpected_eof(
                        self.position,
                        &format!("closing {}", describe(quote)),
                    ))
                }
                Some(ch) if ch == quote => return Ok(result),
                Some(format::ESCAPE) => result.push(self.parse_escape(escape_start)?),
                Some(ch) => result.push(ch),
            }
        }
    }

    fn parse_escape(&mut self, escape_start: usize) -> Result<char> {
        match self.next_char() {
            Some('\'') => Ok('\''),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('0') => Ok('\0'),
            Some('u') => {
                let digits_start = self.position;
                for _ in 0..4 {
                    match self.next_char() {
                        Some(ch) if ch.is_ascii_hexdigit() => {}
                        Some(_) => {
                            return Err(Error::invalid_escape(
                                escape_start,
                                &self.input[escape_start..self.position],
                            ))
                        }
                        None => {
                            return Err(Error::unexpected_eof(self.position, "4 hex digits"))
                        }
                    }
                }
                let hex = &self.input[digits_start..self.position];
                u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        Error::invalid_escape(escape_start, &self.input[escape_start..self.position])
                    })
            }
            Some(_) => Err(Error::invalid_escape(
                escape_start,
                &self.input[escape_start..self.position],
            )),
            None => Err(Error::unexpected_eof(self.position, "an escape sequence")),
        }
    }
}

fn describe(ch: char) -> String {
    format!("{:?}", ch)
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(Value, Value)>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(entries: Vec<(Value, Value)>) -> Self {
        MapDeserializer {
            iter: entries.into_iter(),
            value: None,
        }
    }

    fn from_params(params: Params) -> Self {
        Self::new(
            params
                .into_iter()
                .map(|(key, value)| (Value::Text(key), value))
                .collect(),
        )
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    params: Option<Params>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name: de::value::StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(name)?;
        Ok((variant, VariantDeserializer { params: self.params }))
    }
}

/// Unit variants arrive as text, struct variants as nodes.
struct VariantDeserializer {
    params: Option<Params>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.params {
            None => Ok(()),
            Some(params) if params.is_empty() => Ok(()),
            Some(_) => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, _seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        Err(Error::unsupported("newtype variant"))
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("tuple variant"))
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.params {
            Some(params) => visitor.visit_map(MapDeserializer::from_params(params)),
            None => Err(Error::custom("expected struct variant")),
        }
    }
}

/// Deserializer reading Rust types out of a [`Value`].
///
/// Used by [`from_value`](crate::from_value).
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Absent => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Text(s) => visitor.visit_string(s),
            Value::Node(node) => visitor.visit_map(MapDeserializer::from_params(node.params)),
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Mapping(entries) => visitor.visit_map(MapDeserializer::new(entries)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Absent => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Absent => visitor.visit_unit(),
            Value::Node(node) if node.name == name && node.params.is_empty() => visitor.visit_unit(),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Node(node) if node.name != name => Err(Error::custom(format!(
                "expected node {}, found {}",
                name, node.name
            ))),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Text(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                params: None,
            }),
            Value::Node(node) => visitor.visit_enum(EnumDeserializer {
                variant: node.name,
                params: Some(node.params),
            }),
            other => Err(Error::unsupported(&format!(
                "expected text or node for enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit seq tuple tuple_struct map identifier ignored_any
    }
}
