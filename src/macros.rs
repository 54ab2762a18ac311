/// Builds [`Params`](crate::Params) from `"key": value` pairs.
///
/// Values go through [`Value::from`](crate::Value), so anything with an
/// `Into<Value>` conversion can be used directly.
///
/// # Examples
///
/// ```rust
/// use whatid::{params, Value};
///
/// let params = params! { "n_trees": 10, "criterion": "gini", "depth": None::<i64> };
/// assert_eq!(params.get("n_trees"), Some(&Value::Int(10)));
/// assert_eq!(params.get("depth"), Some(&Value::Absent));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };

    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert($key, $crate::Value::from($value));
        )+
        params
    }};
}

/// Builds a [`Node`](crate::Node) from a bare name and `"key": value` pairs.
///
/// # Examples
///
/// ```rust
/// use whatid::node;
///
/// let company = node!(Company { "name": "Chupa Chups", "city": "Barcelona" });
/// let ducked = node!(ducked {
///     "name": "salty-lollypops",
///     "company": company,
///     "quantity": 33,
/// });
/// assert_eq!(
///     ducked.to_string(),
///     "ducked(company=Company(city='Barcelona',name='Chupa Chups'),name='salty-lollypops',quantity=33)"
/// );
/// assert_eq!(node!(empty).to_string(), "empty()");
/// ```
#[macro_export]
macro_rules! node {
    ($name:ident) => {
        $crate::Node::named(stringify!($name))
    };

    ($name:ident { $($body:tt)* }) => {
        $crate::Node::new(stringify!($name), $crate::params! { $($body)* })
    };
}

#[cfg(test)]
mod tests {
    use crate::{Node, Params, Value};

    #[test]
    fn test_params_macro() {
        assert_eq!(params! {}, Params::new());

        let params = params! {
            "flag": true,
            "ratio": 0.5,
            "items": vec![Value::from(1), Value::from("a")],
        };
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("flag"), Some(&Value::Bool(true)));
        assert_eq!(params.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(
            params.get("items"),
            Some(&Value::Sequence(vec![Value::Int(1), Value::from("a")]))
        );
    }

    #[test]
    fn test_node_macro() {
        let node = node!(rfc { "n_trees": 10 });
        assert_eq!(node, Node::named("rfc").with("n_trees", 10));
        assert_eq!(node!(rfc {}), Node::named("rfc"));
    }
}
