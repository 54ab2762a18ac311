//! Identity string rendering.
//!
//! This module turns a name plus [`Params`] into the canonical identity
//! string, and converts `Serialize` types into the [`Value`] model.
//!
//! ## Overview
//!
//! - **Canonical order**: parameters are always written in ascending byte-wise
//!   key order, whatever order they were inserted in
//! - **All or nothing**: names, keys and nesting depth are checked before a
//!   single byte is written
//! - **Escaping**: text is single quoted with `'` and `\` escaped, so nested
//!   nodes stay unambiguous at any depth
//!
//! ## Usage
//!
//! ```rust
//! use whatid::{params, render};
//!
//! let id = render("N", &params! { "b": 1, "a": 2 }).unwrap();
//! assert_eq!(id, "N(a=2,b=1)");
//! ```
//!
//! ## From Rust types
//!
//! Structs become nodes named after the struct. Fields starting or ending with
//! an underscore are treated as private and left out:
//!
//! ```rust
//! use serde::Serialize;
//! use whatid::to_id_string;
//!
//! #[derive(Serialize)]
//! struct Company {
//!     name: String,
//!     city: String,
//!     _verbose: bool,
//!     social_reason_: String,
//! }
//!
//! let company = Company {
//!     name: "Chupa Chups".to_string(),
//!     city: "Barcelona".to_string(),
//!     _verbose: true,
//!     social_reason_: "Chupa Chups S.A., Barcelona".to_string(),
//! };
//! assert_eq!(
//!     to_id_string(&company).unwrap(),
//!     "Company(city='Barcelona',name='Chupa Chups')"
//! );
//! ```

use crate::format::{self, is_identifier};
use crate::{Error, IdOptions, Node, Params, Result, Value};
use serde::{ser, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};

/// Render `name(params)` with default options.
///
/// # Errors
///
/// [`Error::InvalidName`] when the name or a key is not an identifier,
/// [`Error::DepthExceeded`] when values nest deeper than 64 levels.
pub fn render(name: &str, params: &Params) -> Result<String> {
    render_with_options(name, params, &IdOptions::default())
}

/// Render `name(params)` honouring non-id keys, synonyms, the depth limit and
/// the length cap in `options`.
///
/// # Examples
///
/// ```rust
/// use whatid::{params, render_with_options, IdOptions};
///
/// let params = params! { "criterion": "gini", "n_jobs": 4 };
/// let options = IdOptions::new().with_non_id_key("n_jobs").with_max_length(10);
/// let id = render_with_options("rfc", &params, &options).unwrap();
/// // "rfc(criterion='gini')" is too long, so its sha256 is returned instead
/// assert_eq!(id.len(), 64);
/// ```
pub fn render_with_options(name: &str, params: &Params, options: &IdOptions) -> Result<String> {
    let name = options.synonym(name);
    check_name(name)?;
    enter(1, options.max_depth)?;

    let mut entries = Vec::with_capacity(params.len());
    for (original, value) in params.iter() {
        if !options.renders_key(original) {
            continue;
        }
        let key = options.synonym(original);
        check_name(key)?;
        validate(value, 2, options.max_depth)?;
        entries.push((original.as_str(), key, value));
    }
    entries.sort_by(|(_, a, _), (_, b, _)| a.as_bytes().cmp(b.as_bytes()));
    if let Some(pair) = entries.windows(2).find(|pair| pair[0].1 == pair[1].1) {
        let (first, second) = if pair[0].0 <= pair[1].0 {
            (pair[0].0, pair[1].0)
        } else {
            (pair[1].0, pair[0].0)
        };
        return Err(Error::key_collision(pair[0].1, first, second));
    }

    let mut output = String::with_capacity(64);
    write_node(
        &mut output,
        name,
        entries.into_iter().map(|(_, key, value)| (key, value)),
    )
    .map_err(Error::custom)?;
    let output = cap_length(output, options.max_length);
    tracing::trace!(name, len = output.len(), "rendered identity string");
    Ok(output)
}

/// Render a bare value (scalar, container or node) with default options.
///
/// # Examples
///
/// ```rust
/// use whatid::{render_value, Value};
///
/// let value = Value::Sequence(vec![Value::from("l"), Value::Absent, Value::from(3.2)]);
/// assert_eq!(render_value(&value).unwrap(), "['l',None,3.2]");
/// ```
pub fn render_value(value: &Value) -> Result<String> {
    render_value_with_options(value, &IdOptions::default())
}

/// Render a bare value. Only `max_depth` and `max_length` apply here.
pub fn render_value_with_options(value: &Value, options: &IdOptions) -> Result<String> {
    validate(value, 1, options.max_depth)?;
    let mut output = String::new();
    write_value(&mut output, value).map_err(Error::custom)?;
    let output = cap_length(output, options.max_length);
    tracing::trace!(kind = value.kind(), len = output.len(), "rendered value");
    Ok(output)
}

pub(crate) fn cap_length(output: String, max_length: usize) -> String {
    if max_length > 0 && output.len() > max_length {
        tracing::debug!(
            len = output.len(),
            max_length,
            "identity string too long, using its sha256"
        );
        hex::encode(Sha256::digest(output.as_bytes()))
    } else {
        output
    }
}

fn check_name(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(Error::invalid_name(name))
    }
}

#[inline]
fn enter(level: usize, max_depth: usize) -> Result<()> {
    if level > max_depth {
        Err(Error::depth_exceeded(max_depth))
    } else {
        Ok(())
    }
}

/// Checks names and depth of a value living at nesting `level`.
fn validate(value: &Value, level: usize, max_depth: usize) -> Result<()> {
    match value {
        Value::Absent | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_) => Ok(()),
        Value::Node(node) => {
            enter(level, max_depth)?;
            check_name(&node.name)?;
            for (key, value) in node.params.iter() {
                check_name(key)?;
                validate(value, level + 1, max_depth)?;
            }
            Ok(())
        }
        Value::Sequence(items) => {
            enter(level, max_depth)?;
            items
                .iter()
                .try_for_each(|item| validate(item, level + 1, max_depth))
        }
        Value::Mapping(entries) => {
            enter(level, max_depth)?;
            for (i, (key, value)) in entries.iter().enumerate() {
                validate(key, level + 1, max_depth)?;
                validate(value, level + 1, max_depth)?;
                if entries[..i].iter().any(|(earlier, _)| earlier == key) {
                    return Err(Error::unsupported(&format!(
                        "mapping with duplicate key {}",
                        key
                    )));
                }
            }
            Ok(())
        }
    }
}

// Writers below never validate; `Display` relies on that.

pub(crate) fn write_node<'a, W, K, I>(out: &mut W, name: &str, entries: I) -> fmt::Result
where
    W: Write + ?Sized,
    K: AsRef<str>,
    I: IntoIterator<Item = (K, &'a Value)>,
{
    out.write_str(name)?;
    out.write_char(format::PARAMS_OPEN)?;
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.write_char(format::SEPARATOR)?;
        }
        out.write_str(key.as_ref())?;
        out.write_char(format::ASSIGN)?;
        write_value(out, value)?;
    }
    out.write_char(format::PARAMS_CLOSE)
}

pub(crate) fn write_value<W: Write + ?Sized>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Absent => out.write_str(format::ABSENT),
        Value::Bool(b) => out.write_str(if *b { format::TRUE } else { format::FALSE }),
        Value::Int(i) => write!(out, "{}", i),
        Value::Float(f) => write_float(out, *f),
        Value::Text(s) => write_text(out, s),
        Value::Node(node) => write_node(out, &node.name, node.params.sorted()),
        Value::Sequence(items) => {
            out.write_char(format::SEQ_OPEN)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(format::SEPARATOR)?;
                }
                write_value(out, item)?;
            }
            out.write_char(format::SEQ_CLOSE)
        }
        Value::Mapping(entries) => {
            let mut rendered: Vec<(Option<&str>, String, String)> = entries
                .iter()
                .map(|(k, v)| (k.as_str(), k.to_string(), v.to_string()))
                .collect();
            if rendered.iter().all(|(raw, _, _)| raw.is_some()) {
                // Text keys order like parameter keys, by their raw bytes.
                rendered.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(&b.2)));
            } else {
                // Mixed key kinds order by their rendering.
                rendered.sort_unstable_by(|a, b| (&a.1, &a.2).cmp(&(&b.1, &b.2)));
            }

            out.write_char(format::MAP_OPEN)?;
            for (i, (_, key, value)) in rendered.iter().enumerate() {
                if i > 0 {
                    out.write_char(format::SEPARATOR)?;
                }
                out.write_str(key)?;
                out.write_char(format::MAP_ENTRY)?;
                out.write_str(value)?;
            }
            out.write_char(format::MAP_CLOSE)
        }
    }
}

fn write_float<W: Write + ?Sized>(out: &mut W, f: f64) -> fmt::Result {
    if f.is_nan() {
        out.write_str(format::NAN)
    } else if f.is_infinite() {
        out.write_str(if f > 0.0 {
            format::INFINITY
        } else {
            format::NEG_INFINITY
        })
    } else {
        // Debug is the shortest round-trip form and always keeps a '.' or an
        // exponent, which tells floats apart from ints on the way back.
        write!(out, "{:?}", f)
    }
}

fn write_text<W: Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char(format::QUOTE)?;
    for ch in s.chars() {
        match ch {
            '\'' => out.write_str("\\'")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\0' => out.write_str("\\0")?,
            c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char(format::QUOTE)
}

/// Fields following the private naming convention stay out of identities.
#[inline]
fn is_harvested(field: &str) -> bool {
    !field.starts_with('_') && !field.ends_with('_')
}

/// Serializer producing a [`Value`] from any `T: Serialize`.
///
/// Used by [`to_value`](crate::to_value).
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMapping {
    entries: Vec<(Value, Value)>,
    current_key: Option<Value>,
}

pub struct SerializeNode {
    node: Node,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMapping;
    type SerializeStruct = SerializeNode;
    type SerializeStructVariant = SerializeNode;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::unsupported(&format!("integer {} does not fit in i64", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::unsupported(&format!("integer {} does not fit in i64", v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::unsupported(&format!("integer {} does not fit in i64", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Sequence(
            v.iter().map(|&b| Value::Int(b as i64)).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Absent)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Absent)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::Node(Node::named(name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported(&format!("newtype variant {}", variant)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported(&format!("tuple variant {}", variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMapping> {
        Ok(SerializeMapping {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeNode> {
        Ok(SerializeNode::new(name))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeNode> {
        Ok(SerializeNode::new(variant))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeNode {
    fn new(name: &str) -> Self {
        SerializeNode {
            node: Node::named(name),
        }
    }

    fn push<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if is_harvested(key) {
            self.node.params.insert(key, to_value(value)?);
        }
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeMap for SerializeMapping {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.entries))
    }
}

impl ser::SerializeStruct for SerializeNode {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Node(self.node))
    }
}

impl ser::SerializeStructVariant for SerializeNode {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Node(self.node))
    }
}

pub(crate) fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_sorted_keys() {
        let id = render("N", &params! { "b": 1, "a": 2 }).unwrap();
        assert_eq!(id, "N(a=2,b=1)");
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(render("rfc", &Params::new()).unwrap(), "rfc()");
    }

    #[test]
    fn test_scalars() {
        let params = params! {
            "absent": Value::Absent,
            "flag": false,
            "neg": -12,
            "zero": 0,
            "text": "gini",
        };
        assert_eq!(
            render("s", &params).unwrap(),
            "s(absent=None,flag=false,neg=-12,text='gini',zero=0)"
        );
    }

    #[test]
    fn test_floats() {
        let cases = [
            (1.0, "1.0"),
            (1.34, "1.34"),
            (-0.5, "-0.5"),
            (1e300, "1e300"),
            (1e-9, "1e-9"),
            (f64::NAN, "nan"),
            (f64::INFINITY, "inf"),
            (f64::NEG_INFINITY, "-inf"),
        ];
        for (f, expected) in cases {
            assert_eq!(render_value(&Value::Float(f)).unwrap(), expected);
        }
    }

    #[test]
    fn test_text_escaping() {
        let rendered = render_value(&Value::from("it's a \"test\" \\ ok\n")).unwrap();
        assert_eq!(rendered, r#"'it\'s a "test" \\ ok\n'"#);
        assert_eq!(
            render_value(&Value::from("\u{1b}")).unwrap(),
            "'\\u001b'"
        );
    }

    #[test]
    fn test_text_is_not_absent() {
        assert_eq!(render_value(&Value::from("None")).unwrap(), "'None'");
        assert_eq!(render_value(&Value::Absent).unwrap(), "None");
    }

    #[test]
    fn test_mapping_sorted_by_rendered_key() {
        let mapping = Value::Mapping(vec![
            (Value::from("a"), Value::Int(2)),
            (Value::Absent, Value::from("c")),
            (Value::Int(10), Value::Bool(true)),
        ]);
        assert_eq!(
            render_value(&mapping).unwrap(),
            "{'a':2,10:true,None:'c'}"
        );
    }

    #[test]
    fn test_text_keyed_mapping_sorted_by_raw_key() {
        let mapping = Value::Mapping(vec![
            (Value::from("a b"), Value::Int(2)),
            (Value::from("a"), Value::Int(1)),
        ]);
        assert_eq!(render_value(&mapping).unwrap(), "{'a':1,'a b':2}");

        // The escaped quote would sort after '(' if compared rendered
        let mapping = Value::Mapping(vec![
            (Value::from("x("), Value::Int(2)),
            (Value::from("x'"), Value::Int(1)),
        ]);
        assert_eq!(render_value(&mapping).unwrap(), r"{'x\'':1,'x(':2}");
    }

    #[test]
    fn test_signed_zero_mapping_keys() {
        let mapping = Value::Mapping(vec![
            (Value::Float(0.0), Value::from("pos")),
            (Value::Float(-0.0), Value::from("neg")),
        ]);
        assert_eq!(render_value(&mapping).unwrap(), "{-0.0:'neg',0.0:'pos'}");
    }

    #[test]
    fn test_mapping_duplicate_keys() {
        let mapping = Value::Mapping(vec![
            (Value::Int(1), Value::from("a")),
            (Value::Int(1), Value::from("b")),
        ]);
        assert!(matches!(
            render_value(&mapping),
            Err(Error::UnsupportedValueKind(_))
        ));
    }

    #[test]
    fn test_invalid_names() {
        assert!(matches!(
            render("", &Params::new()),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(
            render("a(b", &Params::new()),
            Err(Error::InvalidName { .. })
        ));
        assert_eq!(
            render("ok", &params! { "bad key": 1 }),
            Err(Error::invalid_name("bad key"))
        );
        let nested = params! { "inner": Node::named("no-dash") };
        assert_eq!(
            render("ok", &nested),
            Err(Error::invalid_name("no-dash"))
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::Int(1);
        for _ in 0..63 {
            value = Value::Sequence(vec![value]);
        }
        // The node is level 1, so 63 sequences fit under a limit of 64.
        assert!(render("deep", &params! { "v": value.clone() }).is_ok());

        let deeper = Value::Sequence(vec![value]);
        assert_eq!(
            render("deep", &params! { "v": deeper }),
            Err(Error::depth_exceeded(64))
        );
    }

    #[test]
    fn test_non_id_keys_and_synonyms() {
        let params = params! { "n_estimators": 100, "verbose": true, "max_depth": 3 };
        let options = IdOptions::new()
            .with_non_id_key("verbose")
            .with_synonym("n_estimators", "a_n")
            .with_synonym("RandomForest", "rf");
        assert_eq!(
            render_with_options("RandomForest", &params, &options).unwrap(),
            "rf(a_n=100,max_depth=3)"
        );
    }

    #[test]
    fn test_synonym_collision() {
        let params = params! { "b": 2, "a": 1 };
        let options = IdOptions::new().with_synonym("a", "b");
        assert_eq!(
            render_with_options("x", &params, &options),
            Err(Error::key_collision("b", "a", "b"))
        );

        let options = IdOptions::new().with_synonym("a", "k").with_synonym("b", "k");
        let err = render_with_options("x", &params, &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameters \"a\" and \"b\" both render as key \"k\""
        );
    }

    #[test]
    fn test_non_ids_too() {
        let params = params! { "n_trees": 10, "verbose": true };
        let options = IdOptions::new().with_non_id_key("verbose");
        assert_eq!(
            render_with_options("rfc", &params, &options).unwrap(),
            "rfc(n_trees=10)"
        );

        let options = options.with_non_ids_too(true);
        assert_eq!(
            render_with_options("rfc", &params, &options).unwrap(),
            "rfc(n_trees=10,verbose=true)"
        );
    }

    #[test]
    fn test_max_length_hashes() {
        let params = params! { "criterion": "gini" };
        let full = render("rfc", &params).unwrap();
        let options = IdOptions::new().with_max_length(full.len());
        assert_eq!(render_with_options("rfc", &params, &options).unwrap(), full);

        let options = IdOptions::new().with_max_length(full.len() - 1);
        let hashed = render_with_options("rfc", &params, &options).unwrap();
        assert_eq!(hashed, hex::encode(Sha256::digest(full.as_bytes())));
        assert!(hashed.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_to_value_skips_private_fields() {
        #[derive(Serialize)]
        struct Rfc {
            n_trees: u32,
            _seed: u64,
            cache_: bool,
            depth: Option<u32>,
        }

        let value = to_value(&Rfc {
            n_trees: 10,
            _seed: 7,
            cache_: true,
            depth: None,
        })
        .unwrap();
        assert_eq!(value.to_string(), "Rfc(depth=None,n_trees=10)");
    }

    #[test]
    fn test_to_value_rejects_large_u64() {
        assert!(matches!(
            to_value(&u64::MAX),
            Err(Error::UnsupportedValueKind(_))
        ));
        assert_eq!(to_value(&42u64).unwrap(), Value::Int(42));
    }
}
