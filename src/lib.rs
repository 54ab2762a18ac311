//! # whatid
//!
//! Canonical identity strings for configurations.
//!
//! ## What is an identity string?
//!
//! An identity string names a configuration and lists the parameters that
//! define it, for example a model with its hyperparameters:
//!
//! ```text
//! rfc(criterion='gini',depth=None,n_trees=10)
//! ```
//!
//! The same configuration always yields the same bytes, whatever order its
//! parameters were declared in, so identity strings work as cache keys,
//! experiment ids or file names. They can also be parsed back into the value
//! tree they came from.
//!
//! ## Key Features
//!
//! - **Deterministic**: keys are sorted byte-wise, floats use the shortest
//!   round-trip form, text is always single quoted
//! - **Reversible**: `parse(render(v)) == v` for everything `render` accepts
//! - **Nested**: configurations can contain other configurations, sequences
//!   and mappings
//! - **Serde Compatible**: `#[derive(Serialize)]` structs become identities
//!   directly, with `_private` fields left out
//! - **Bounded**: rendering and parsing both stop at a configurable depth
//!
//! ## Quick Start
//!
//! ```rust
//! use whatid::{params, parse, render, Value};
//!
//! let id = render("rfc", &params! { "n_trees": 10, "criterion": "gini" }).unwrap();
//! assert_eq!(id, "rfc(criterion='gini',n_trees=10)");
//!
//! let node = parse(&id).unwrap();
//! assert_eq!(node.name, "rfc");
//! assert_eq!(node.get("n_trees"), Some(&Value::Int(10)));
//! ```
//!
//! ### From Rust types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use whatid::{from_str, to_id_string};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Svm {
//!     c: f64,
//!     kernel: String,
//!     #[serde(default)]
//!     _cache_size: u32,
//! }
//!
//! let svm = Svm { c: 1.0, kernel: "rbf".to_string(), _cache_size: 200 };
//! let id = to_id_string(&svm).unwrap();
//! assert_eq!(id, "Svm(c=1.0,kernel='rbf')");
//!
//! let back: Svm = from_str(&id).unwrap();
//! assert_eq!(back, Svm { c: 1.0, kernel: "rbf".to_string(), _cache_size: 0 });
//! ```
//!
//! ### Long identities
//!
//! ```rust
//! use whatid::{params, render_with_options, IdOptions};
//!
//! let options = IdOptions::new().with_max_length(16);
//! let id = render_with_options("a_long_name", &params! { "with": "many values" }, &options)
//!     .unwrap();
//! assert_eq!(id.len(), 64); // sha256 hex digest
//! ```
//!
//! ### Nicknames
//!
//! A [`Registry`] binds short nicknames to identity strings, one-to-one.
//!
//! ## Format
//!
//! The grammar and token table live in the [`format`] module.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber:
//! `trace` on every successful render or parse, `debug` when an identity is
//! replaced by its digest or when parsing fails.

pub mod de;
pub mod error;
pub mod format;
pub mod identity;
pub mod macros;
pub mod map;
pub mod options;
pub mod registry;
pub mod ser;
pub mod value;

pub use de::{parse, parse_value, parse_value_with_options, parse_with_options, Parser};
pub use error::{Error, Result};
pub use identity::{IdentityAdapter, ProvidesIdentity};
pub use map::Params;
pub use options::{IdOptions, DEFAULT_MAX_DEPTH};
pub use registry::Registry;
pub use ser::{render, render_value, render_value_with_options, render_with_options};
pub use value::{Node, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert any `T: Serialize` to a [`Value`].
///
/// Structs become nodes named after the struct, skipping fields whose name
/// starts or ends with `_`. Sequences, tuples and maps become sequences and
/// mappings; `None` and `()` become [`Value::Absent`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use whatid::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_node());
/// assert_eq!(value.to_string(), "Point(x=1,y=2)");
/// ```
///
/// # Errors
///
/// [`Error::UnsupportedValueKind`] for integers outside `i64`, and for
/// newtype or tuple enum variants.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

/// Identity string of a `T: Serialize` whose serialized form is a node.
///
/// # Errors
///
/// Fails when `T` does not serialize to a struct, plus every error of
/// [`render`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_id_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_id_string_with_options(value, &IdOptions::default())
}

/// Identity string of a `T: Serialize` with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use whatid::{to_id_string_with_options, IdOptions};
///
/// #[derive(Serialize)]
/// struct Rfc { n_trees: u32, n_jobs: u32 }
///
/// let options = IdOptions::new().with_non_id_key("n_jobs").with_synonym("n_trees", "nt");
/// let id = to_id_string_with_options(&Rfc { n_trees: 10, n_jobs: 8 }, &options).unwrap();
/// assert_eq!(id, "Rfc(nt=10)");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_id_string_with_options<T>(value: &T, options: &IdOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Node(node) => render_with_options(&node.name, &node.params, options),
        other => Err(Error::unsupported(&format!(
            "expected a struct, found {}",
            other.kind()
        ))),
    }
}

/// Deserialize an instance of `T` from a [`Value`].
///
/// Nodes read like maps of their parameters, unit variants from text and
/// struct variants from nodes named after the variant.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use whatid::{from_value, parse_value};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let value = parse_value("Point(y=2,x=1)").unwrap();
/// let point: Point = from_value(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

/// Deserialize an instance of `T` from an identity string.
///
/// # Errors
///
/// Every parse error of [`parse_value`], plus shape mismatches as in
/// [`from_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_value(s)?)
}
