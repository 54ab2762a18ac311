//! Configuration options for rendering and parsing identity strings.
//!
//! [`IdOptions`] controls the nesting limit shared by the encoder and the
//! decoder, plus the rendering tweaks that only touch the top-level node:
//! keys left out of the identity, key synonyms and a length cap.
//!
//! ## Examples
//!
//! ```rust
//! use whatid::{params, render_with_options, IdOptions};
//!
//! let params = params! { "n_trees": 10, "verbose": true };
//!
//! let options = IdOptions::new()
//!     .with_non_id_key("verbose")
//!     .with_synonym("n_trees", "nt");
//! assert_eq!(render_with_options("rfc", &params, &options).unwrap(), "rfc(nt=10)");
//! ```

use std::collections::{BTreeMap, BTreeSet};

/// Default maximum nesting depth for both rendering and parsing.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration options for identity strings.
///
/// # Examples
///
/// ```rust
/// use whatid::IdOptions;
///
/// // Defaults: depth limit 64, no length cap
/// let options = IdOptions::new();
/// assert_eq!(options.max_depth, 64);
/// assert_eq!(options.max_length, 0);
///
/// // Ids longer than 64 characters get replaced by their sha256
/// let options = IdOptions::new().with_max_length(64).with_max_depth(16);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IdOptions {
    /// Deepest container nesting accepted; the top-level node is level 1.
    pub max_depth: usize,
    /// When non-zero, longer identity strings are replaced by their SHA-256 hex digest.
    pub max_length: usize,
    /// Top-level parameters that do not take part in the identity.
    pub non_id_keys: BTreeSet<String>,
    /// Top-level key (or node name) → shorter token used in the identity.
    pub synonyms: BTreeMap<String, String>,
    /// Render non-id keys as well, giving the full description of a configuration.
    pub non_ids_too: bool,
}

impl Default for IdOptions {
    fn default() -> Self {
        IdOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: 0,
            non_id_keys: BTreeSet::new(),
            synonyms: BTreeMap::new(),
            non_ids_too: false,
        }
    }
}

impl IdOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::{parse_value_with_options, Error, IdOptions};
    ///
    /// let options = IdOptions::new().with_max_depth(2);
    /// assert!(parse_value_with_options("[[1]]", &options).is_ok());
    /// assert!(matches!(
    ///     parse_value_with_options("[[[1]]]", &options),
    ///     Err(Error::DepthExceeded { limit: 2, .. })
    /// ));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the length above which identities are replaced by their SHA-256 digest.
    ///
    /// `0` disables the cap.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Excludes a top-level key from the identity string.
    #[must_use]
    pub fn with_non_id_key(mut self, key: impl Into<String>) -> Self {
        self.non_id_keys.insert(key.into());
        self
    }

    /// Excludes several top-level keys from the identity string.
    #[must_use]
    pub fn with_non_id_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_id_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Keeps non-id keys in the output when `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::{params, render_with_options, IdOptions};
    ///
    /// let params = params! { "n_trees": 10, "n_jobs": 4 };
    /// let options = IdOptions::new().with_non_id_key("n_jobs").with_non_ids_too(true);
    /// assert_eq!(
    ///     render_with_options("rfc", &params, &options).unwrap(),
    ///     "rfc(n_jobs=4,n_trees=10)"
    /// );
    /// ```
    #[must_use]
    pub fn with_non_ids_too(mut self, non_ids_too: bool) -> Self {
        self.non_ids_too = non_ids_too;
        self
    }

    /// Renders `name` as `synonym` when it appears as a top-level key or node name.
    #[must_use]
    pub fn with_synonym(mut self, name: impl Into<String>, synonym: impl Into<String>) -> Self {
        self.synonyms.insert(name.into(), synonym.into());
        self
    }

    /// Returns the synonym registered for `name`, or `name` itself.
    #[must_use]
    pub fn synonym<'a>(&'a self, name: &'a str) -> &'a str {
        self.synonyms.get(name).map_or(name, String::as_str)
    }

    pub(crate) fn is_id_key(&self, key: &str) -> bool {
        !self.non_id_keys.contains(key)
    }

    pub(crate) fn renders_key(&self, key: &str) -> bool {
        self.non_ids_too || self.is_id_key(key)
    }
}
