//! Identity capability for configurable objects.
//!
//! Anything that can name itself and list its parameters implements
//! [`ProvidesIdentity`] and gets its identity string for free. Types that
//! cannot implement the trait themselves (foreign types, or types whose
//! parameters live behind accessors) are wrapped in an [`IdentityAdapter`].
//!
//! ## Examples
//!
//! ```rust
//! use whatid::{params, Params, ProvidesIdentity};
//!
//! struct RandomForest {
//!     n_trees: u32,
//!     criterion: &'static str,
//!     n_jobs: u32,
//! }
//!
//! impl ProvidesIdentity for RandomForest {
//!     fn name(&self) -> String {
//!         "rfc".to_string()
//!     }
//!
//!     fn params(&self) -> Params {
//!         // n_jobs does not change the model, so it stays out
//!         params! { "n_trees": self.n_trees, "criterion": self.criterion }
//!     }
//! }
//!
//! let rfc = RandomForest { n_trees: 10, criterion: "gini", n_jobs: 4 };
//! assert_eq!(rfc.identity().unwrap(), "rfc(criterion='gini',n_trees=10)");
//! ```

use crate::{render_with_options, IdOptions, Node, Params, Result};

/// Capability to describe a configuration as a [`Node`].
///
/// Only [`name`](ProvidesIdentity::name) and
/// [`params`](ProvidesIdentity::params) are required.
pub trait ProvidesIdentity {
    /// Name of the configuration, rendered before the parameter list.
    fn name(&self) -> String;

    /// Parameters that take part in the identity.
    fn params(&self) -> Params;

    /// The configuration as a node, ready to nest inside another one.
    fn what(&self) -> Node {
        Node::new(self.name(), self.params())
    }

    /// Canonical identity string with default options.
    fn identity(&self) -> Result<String> {
        self.identity_with_options(&IdOptions::default())
    }

    fn identity_with_options(&self, options: &IdOptions) -> Result<String> {
        render_with_options(&self.name(), &self.params(), options)
    }
}

impl ProvidesIdentity for Node {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn params(&self) -> Params {
        self.params.clone()
    }

    fn what(&self) -> Node {
        self.clone()
    }

    fn identity_with_options(&self, options: &IdOptions) -> Result<String> {
        render_with_options(&self.name, &self.params, options)
    }
}

/// Gives an identity to a borrowed value through a parameter harvesting closure.
///
/// # Examples
///
/// ```rust
/// use whatid::{params, IdentityAdapter, ProvidesIdentity};
///
/// let scaler = (0.0_f64, 1.0_f64);
/// let adapter = IdentityAdapter::new(&scaler, "MinMax", |(lo, hi): &(f64, f64)| {
///     params! { "lo": *lo, "hi": *hi }
/// });
/// assert_eq!(adapter.identity().unwrap(), "MinMax(hi=1.0,lo=0.0)");
/// ```
pub struct IdentityAdapter<'a, T: ?Sized, F> {
    target: &'a T,
    name: String,
    harvest: F,
}

impl<'a, T, F> IdentityAdapter<'a, T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Params,
{
    pub fn new(target: &'a T, name: impl Into<String>, harvest: F) -> Self {
        IdentityAdapter {
            target,
            name: name.into(),
            harvest,
        }
    }

    /// The wrapped value.
    pub fn target(&self) -> &'a T {
        self.target
    }
}

impl<T, F> ProvidesIdentity for IdentityAdapter<'_, T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Params,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn params(&self) -> Params {
        (self.harvest)(self.target)
    }
}
