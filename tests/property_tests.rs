//! Property-based tests for the round-trip and canonical-order guarantees.
//!
//! Values are generated as whole trees (nodes, sequences and mappings nested
//! several levels deep) with every scalar kind at the leaves, including NaN,
//! infinities and text full of quotes and control characters.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use whatid::{from_str, parse, parse_value, render, render_value, to_id_string, Node, Params, Value};

fn identifier() -> impl Strategy<Value = String> {
    "[_A-Za-z][_A-Za-z0-9]{0,8}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Absent),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        prop::num::f64::ANY.prop_map(Value::Float),
        any::<String>().prop_map(Value::Text),
        "[ '\"\\\\a-z()=,\\[\\]{}:]{0,12}".prop_map(Value::Text),
    ]
}

fn without_duplicate_keys(entries: Vec<(Value, Value)>) -> Vec<(Value, Value)> {
    let mut unique: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if !unique.iter().any(|(existing, _)| *existing == key) {
            unique.push((key, value));
        }
    }
    unique
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(10, 64, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4)
                .prop_map(|entries| Value::Mapping(without_duplicate_keys(entries))),
            (identifier(), prop::collection::btree_map(identifier(), inner, 0..4))
                .prop_map(|(name, params)| Value::Node(Node::new(name, Params::from(params)))),
        ]
    })
}

fn tricky_text() -> impl Strategy<Value = String> {
    "[ !\"#$&'()\\\\a-c]{0,6}"
}

fn params() -> impl Strategy<Value = BTreeMap<String, Value>> {
    prop::collection::btree_map(identifier(), value(), 0..6)
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Config {
    count: i32,
    enabled: bool,
    label: String,
    limit: Option<u16>,
    weights: Vec<i64>,
}

fn config() -> impl Strategy<Value = Config> {
    (
        any::<i32>(),
        any::<bool>(),
        any::<String>(),
        proptest::option::of(any::<u16>()),
        prop::collection::vec(any::<i64>(), 0..8),
    )
        .prop_map(|(count, enabled, label, limit, weights)| Config {
            count,
            enabled,
            label,
            limit,
            weights,
        })
}

proptest! {
    #[test]
    fn prop_node_round_trip(name in identifier(), params in params()) {
        let params = Params::from(params);
        let id = render(&name, &params).unwrap();
        let node = parse(&id).unwrap();
        prop_assert_eq!(&node, &Node::new(name, params));
        // Re-rendering the parsed node reproduces the same bytes
        prop_assert_eq!(render(&node.name, &node.params).unwrap(), id);
    }

    #[test]
    fn prop_value_round_trip(value in value()) {
        let rendered = render_value(&value).unwrap();
        prop_assert_eq!(parse_value(&rendered).unwrap(), value);
    }

    #[test]
    fn prop_insertion_order_is_irrelevant(name in identifier(), params in params()) {
        let forward: Params = params.clone().into_iter().collect();
        let backward: Params = params.into_iter().rev().collect();
        prop_assert_eq!(render(&name, &forward).unwrap(), render(&name, &backward).unwrap());
    }

    #[test]
    fn prop_text_keys_render_in_raw_key_order(
        entries in prop::collection::btree_map(tricky_text(), scalar(), 0..8)
    ) {
        let mapping = Value::Mapping(
            entries.into_iter().rev().map(|(k, v)| (Value::Text(k), v)).collect(),
        );
        let parsed = parse_value(&render_value(&mapping).unwrap()).unwrap();
        let keys: Vec<&str> = parsed
            .as_mapping()
            .unwrap()
            .iter()
            .filter_map(|(key, _)| key.as_str())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        prop_assert_eq!(keys, sorted);
        prop_assert_eq!(parsed, mapping);
    }

    #[test]
    fn prop_parse_never_panics(input in any::<String>()) {
        let _ = parse(&input);
        let _ = parse_value(&input);
    }

    #[test]
    fn prop_parse_errors_have_offsets_within_input(input in "[a-z(),='\\[\\]{}:0-9 .-]{0,24}") {
        if let Err(err) = parse(&input) {
            if let Some(offset) = err.offset() {
                prop_assert!(offset <= input.len());
            }
        }
    }

    #[test]
    fn prop_struct_round_trip(config in config()) {
        let id = to_id_string(&config).unwrap();
        prop_assert!(id.starts_with("Config("));
        let back: Config = from_str(&id).unwrap();
        prop_assert_eq!(back, config);
    }
}
