//! Nicknames for identity strings.
//!
//! Long identities are hard to read in reports and file names, so a
//! [`Registry`] binds short nicknames to them. Bindings are one-to-one: a
//! nickname names a single id and an id has a single nickname. Rebinding
//! either side requires removing the old binding first.
//!
//! The registry is a plain value owned by the caller; there is no process-wide
//! instance.
//!
//! ## Examples
//!
//! ```rust
//! use whatid::{node, IdOptions, Registry};
//!
//! let rfc = node!(rfc { "n_trees": 100, "criterion": "gini" });
//!
//! let mut registry = Registry::new();
//! registry.register("forest", &rfc).unwrap();
//!
//! assert_eq!(
//!     registry.nickname_to_id("forest"),
//!     Some("rfc(criterion='gini',n_trees=100)")
//! );
//! assert_eq!(
//!     registry.nickname_or_identity(&rfc, &IdOptions::default()).unwrap(),
//!     "forest"
//! );
//! ```

use crate::ser::cap_length;
use crate::{Error, IdOptions, Node, ProvidesIdentity, Result};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
struct Binding {
    nickname: String,
    what: Option<Node>,
}

/// Bidirectional nickname ↔ identity string bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    by_id: HashMap<String, Binding>,
    by_nickname: BTreeMap<String, String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `nickname` to the identity string `id`.
    ///
    /// Registering an existing binding again is accepted, and forgets any
    /// node saved with it.
    ///
    /// # Errors
    ///
    /// [`Error::NicknameTaken`] when `nickname` is bound to another id,
    /// [`Error::IdTaken`] when `id` already has another nickname.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::{Error, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.register_nickname("gini", "rfc(criterion='gini')").unwrap();
    /// assert!(matches!(
    ///     registry.register_nickname("gini", "rfc(criterion='entropy')"),
    ///     Err(Error::NicknameTaken { .. })
    /// ));
    /// ```
    pub fn register_nickname(
        &mut self,
        nickname: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<()> {
        self.bind(nickname.into(), id.into(), None)
    }

    /// Binds `nickname` to the identity of `what`.
    pub fn register<W>(&mut self, nickname: impl Into<String>, what: &W) -> Result<()>
    where
        W: ProvidesIdentity + ?Sized,
    {
        self.bind(nickname.into(), what.identity()?, None)
    }

    /// Binds `nickname` to the identity of `what` and keeps its node, so it
    /// can be looked up later with [`nickname_to_what`](Registry::nickname_to_what).
    pub fn register_what<W>(&mut self, nickname: impl Into<String>, what: &W) -> Result<()>
    where
        W: ProvidesIdentity + ?Sized,
    {
        let node = what.what();
        let id = node.identity()?;
        self.bind(nickname.into(), id, Some(node))
    }

    fn bind(&mut self, nickname: String, id: String, what: Option<Node>) -> Result<()> {
        if let Some(bound) = self.by_nickname.get(&nickname) {
            if *bound != id {
                return Err(Error::nickname_taken(&nickname, bound));
            }
        }
        if let Some(binding) = self.by_id.get(&id) {
            if binding.nickname != nickname {
                return Err(Error::id_taken(&id, &binding.nickname));
            }
        }

        tracing::debug!(nickname = %nickname, id = %id, "registered nickname");
        self.by_nickname.insert(nickname.clone(), id.clone());
        self.by_id.insert(id, Binding { nickname, what });
        Ok(())
    }

    /// Removes a nickname and its id binding, returning the id it named.
    pub fn remove_nickname(&mut self, nickname: &str) -> Option<String> {
        let id = self.by_nickname.remove(nickname)?;
        self.by_id.remove(&id);
        Some(id)
    }

    /// Removes the binding of `id`, returning the nickname it had.
    pub fn remove_id(&mut self, id: &str) -> Option<String> {
        let binding = self.by_id.remove(id)?;
        self.by_nickname.remove(&binding.nickname);
        Some(binding.nickname)
    }

    #[must_use]
    pub fn nickname_to_id(&self, nickname: &str) -> Option<&str> {
        self.by_nickname.get(nickname).map(String::as_str)
    }

    #[must_use]
    pub fn id_to_nickname(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(|binding| binding.nickname.as_str())
    }

    /// Node saved through [`register_what`](Registry::register_what), if any.
    #[must_use]
    pub fn id_to_what(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).and_then(|binding| binding.what.as_ref())
    }

    #[must_use]
    pub fn nickname_to_what(&self, nickname: &str) -> Option<&Node> {
        self.nickname_to_id(nickname)
            .and_then(|id| self.id_to_what(id))
    }

    /// The nickname bound to the plain identity of `what`, or its identity
    /// string rendered with `options` when it has none.
    ///
    /// The length cap in `options` applies to nicknames too.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::{node, IdOptions, Registry};
    ///
    /// let svm = node!(svm { "c": 1.0, "verbose": true });
    /// let options = IdOptions::new().with_non_id_key("verbose");
    ///
    /// let mut registry = Registry::new();
    /// assert_eq!(registry.nickname_or_identity(&svm, &options).unwrap(), "svm(c=1.0)");
    ///
    /// registry.register("baseline", &svm).unwrap();
    /// assert_eq!(registry.nickname_or_identity(&svm, &options).unwrap(), "baseline");
    /// ```
    pub fn nickname_or_identity<W>(&self, what: &W, options: &IdOptions) -> Result<String>
    where
        W: ProvidesIdentity + ?Sized,
    {
        match self.id_to_nickname(&what.identity()?) {
            Some(nickname) => Ok(cap_length(nickname.to_string(), options.max_length)),
            None => what.identity_with_options(options),
        }
    }

    /// The nickname bound to `id`, or `id` itself.
    #[must_use]
    pub fn nickname_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.id_to_nickname(id).unwrap_or(id)
    }

    /// All `(nickname, id)` bindings, sorted by nickname.
    pub fn all_nicknames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_nickname
            .iter()
            .map(|(nickname, id)| (nickname.as_str(), id.as_str()))
    }

    /// Drops every binding.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_nickname.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_nickname.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_nickname.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node, params};

    const GINI: &str = "rfc(criterion='gini')";
    const ENTROPY: &str = "rfc(criterion='entropy')";

    #[test]
    fn test_bindings_go_both_ways() {
        let mut registry = Registry::new();
        registry.register_nickname("gini", GINI).unwrap();

        assert_eq!(registry.nickname_to_id("gini"), Some(GINI));
        assert_eq!(registry.id_to_nickname(GINI), Some("gini"));
        assert_eq!(registry.nickname_to_id("entropy"), None);
        assert_eq!(registry.id_to_nickname(ENTROPY), None);
        assert_eq!(registry.nickname_or_id(GINI), "gini");
        assert_eq!(registry.nickname_or_id(ENTROPY), ENTROPY);
    }

    #[test]
    fn test_one_to_one() {
        let mut registry = Registry::new();
        registry.register_nickname("gini", GINI).unwrap();

        assert_eq!(
            registry.register_nickname("gini", ENTROPY),
            Err(Error::nickname_taken("gini", GINI))
        );
        assert_eq!(
            registry.register_nickname("other", GINI),
            Err(Error::id_taken(GINI, "gini"))
        );
        // Same binding again is fine
        registry.register_nickname("gini", GINI).unwrap();
        assert_eq!(registry.len(), 1);

        registry.remove_nickname("gini");
        registry.register_nickname("gini", ENTROPY).unwrap();
        assert_eq!(registry.nickname_to_id("gini"), Some(ENTROPY));
    }

    #[test]
    fn test_remove() {
        let mut registry = Registry::new();
        registry.register_nickname("gini", GINI).unwrap();
        registry.register_nickname("entropy", ENTROPY).unwrap();

        assert_eq!(registry.remove_nickname("gini"), Some(GINI.to_string()));
        assert_eq!(registry.remove_nickname("gini"), None);
        assert_eq!(registry.id_to_nickname(GINI), None);

        assert_eq!(registry.remove_id(ENTROPY), Some("entropy".to_string()));
        assert_eq!(registry.nickname_to_id("entropy"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_all_nicknames_sorted() {
        let mut registry = Registry::new();
        registry.register_nickname("zeta", "z()").unwrap();
        registry.register_nickname("alpha", "a()").unwrap();
        registry.register_nickname("Beta", "b()").unwrap();

        let all: Vec<_> = registry.all_nicknames().collect();
        assert_eq!(all, vec![("Beta", "b()"), ("alpha", "a()"), ("zeta", "z()")]);

        registry.clear();
        assert_eq!(registry.all_nicknames().count(), 0);
    }

    #[test]
    fn test_register_what() {
        let rfc = node!(rfc { "criterion": "gini" });
        let mut registry = Registry::new();

        registry.register("plain", &rfc).unwrap();
        assert_eq!(registry.id_to_nickname(GINI), Some("plain"));
        assert_eq!(registry.nickname_to_what("plain"), None);

        registry.remove_nickname("plain");
        registry.register_what("kept", &rfc).unwrap();
        assert_eq!(registry.nickname_to_what("kept"), Some(&rfc));
        assert_eq!(registry.id_to_what(GINI), Some(&rfc));

        // Re-registering without the node forgets it
        registry.register("kept", &rfc).unwrap();
        assert_eq!(registry.nickname_to_what("kept"), None);
    }

    #[test]
    fn test_register_invalid_identity() {
        let mut registry = Registry::new();
        let bad = Node::new("not valid", params! {});
        assert_eq!(
            registry.register("bad", &bad),
            Err(Error::invalid_name("not valid"))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_nickname_or_identity_honours_options() {
        let rfc = node!(rfc { "criterion": "gini", "n_jobs": 4 });
        let mut registry = Registry::new();

        let full = IdOptions::new().with_non_ids_too(true);
        assert_eq!(
            registry.nickname_or_identity(&rfc, &full).unwrap(),
            "rfc(criterion='gini',n_jobs=4)"
        );

        registry.register("a_rather_long_nickname", &rfc).unwrap();
        assert_eq!(
            registry.nickname_or_identity(&rfc, &full).unwrap(),
            "a_rather_long_nickname"
        );
        let capped = IdOptions::new().with_max_length(8);
        assert_eq!(
            registry.nickname_or_identity(&rfc, &capped).unwrap().len(),
            64
        );
    }
}
