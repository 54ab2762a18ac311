//! Identity string format.
//!
//! This module documents the canonical grammar produced by
//! [`render`](crate::render) and accepted by [`parse`](crate::parse), and
//! holds the fixed tokens both sides share.
//!
//! # Overview
//!
//! An identity string names a configuration and lists its parameters, sorted
//! by key:
//!
//! ```text
//! rfc(alpha=1.34,criterion='gini',depth=None,n_trees=10,split=2)
//! ```
//!
//! Declaration order never matters: the same name with the same key/value
//! pairs always produces the same bytes.
//!
//! # Grammar
//!
//! ```text
//! node      := name '(' [ param (',' param)* ] ')'
//! param     := key '=' value
//! value     := node | text | number | bool | absent | sequence | mapping
//! sequence  := '[' [ value (',' value)* ] ']'
//! mapping   := '{' [ (value ':' value) (',' (value ':' value))* ] '}'
//! text      := "'" (char | '\' escape)* "'"
//! name, key := [_A-Za-z][_A-Za-z0-9]*
//! number    := '-'? digits ('.' digits*)? ([eE] [+-]? digits)? | 'inf' | '-inf' | 'nan'
//! bool      := 'true' | 'false'
//! absent    := 'None'
//! ```
//!
//! Every production is picked by its first character, so the parser needs a
//! single character of lookahead and never backtracks.
//!
//! # Scalars
//!
//! | Kind | Rendering | Example |
//! |------|-----------|---------|
//! | Absent | `None` | `depth=None` |
//! | Bool | `true` / `false` | `verbose=false` |
//! | Int | decimal digits, optional `-` | `n=-3` |
//! | Float | shortest round-trip, always with `.` or exponent | `alpha=1.0`, `tol=1e-9` |
//! | Special floats | `nan`, `inf`, `-inf` | `limit=inf` |
//! | Text | single quoted | `name='Chupa Chups'` |
//!
//! Literal tokens are case sensitive: `True` is not a boolean.
//!
//! # Text escaping
//!
//! Inside quotes, `'` and `\` are written as `\'` and `\\`. Control
//! characters use `\n`, `\r`, `\t`, `\0` or `\uXXXX`. The encoder always
//! escapes and never switches quote style; the parser additionally accepts
//! double-quoted text (with `\"`) for hand-written input.
//!
//! ```text
//! note='it\'s a "test"'
//! ```
//!
//! # Containers
//!
//! Sequences keep their order: `[1,'a',None]`. Mappings whose keys are all
//! text are sorted by the raw key bytes, like parameters: `{'a':1,'a b':2}`.
//! Other mappings are sorted by the rendered key: `{'a':2,None:'c'}`. Nodes
//! nest directly as values:
//!
//! ```text
//! ducked(company=Company(city='Barcelona',name='Chupa Chups'),name='salty-lollypops',quantity=33)
//! ```
//!
//! # Whitespace
//!
//! The encoder never emits whitespace outside text. The parser skips ASCII
//! whitespace between tokens, so `N( a = 1 )` parses like `N(a=1)`.
//!
//! # Limitations
//!
//! - No cyclic references
//! - No byte strings, dates or big integers: convert them first
//! - The older `name#key=value#...` form is not understood

pub const ABSENT: &str = "None";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const NAN: &str = "nan";
pub const INFINITY: &str = "inf";
pub const NEG_INFINITY: &str = "-inf";

pub const QUOTE: char = '\'';
pub const ALT_QUOTE: char = '"';
pub const ESCAPE: char = '\\';

pub const PARAMS_OPEN: char = '(';
pub const PARAMS_CLOSE: char = ')';
pub const ASSIGN: char = '=';
pub const SEPARATOR: char = ',';
pub const SEQ_OPEN: char = '[';
pub const SEQ_CLOSE: char = ']';
pub const MAP_OPEN: char = '{';
pub const MAP_CLOSE: char = '}';
pub const MAP_ENTRY: char = ':';

#[inline]
pub(crate) fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_identifier_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Returns `true` if `s` can be used as a node name or parameter key.
///
/// # Examples
///
/// ```rust
/// use whatid::format::is_identifier;
///
/// assert!(is_identifier("n_trees"));
/// assert!(is_identifier("_private2"));
/// assert!(!is_identifier(""));
/// assert!(!is_identifier("2nd"));
/// assert!(!is_identifier("a(b"));
/// ```
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_continue),
        _ => false,
    }
}
