use whatid::{node, params, render, Node, Params, Value};

#[test]
fn test_params_macro_empty() {
    let params = params! {};
    assert_eq!(params, Params::new());
    assert_eq!(render("empty", &params).unwrap(), "empty()");
}

#[test]
fn test_params_macro_scalars() {
    let params = params! {
        "absent": Value::Absent,
        "flag": false,
        "count": -123,
        "ratio": 3.5,
        "label": "hello world",
        "owned": String::from("owned"),
    };
    assert_eq!(params.get("absent"), Some(&Value::Absent));
    assert_eq!(params.get("flag"), Some(&Value::Bool(false)));
    assert_eq!(params.get("count"), Some(&Value::Int(-123)));
    assert_eq!(params.get("ratio"), Some(&Value::Float(3.5)));
    assert_eq!(params.get("label"), Some(&Value::from("hello world")));
    assert_eq!(params.get("owned"), Some(&Value::from("owned")));
}

#[test]
fn test_params_macro_options() {
    let depth: Option<u32> = None;
    let seed: Option<i64> = Some(42);
    let params = params! { "depth": depth, "seed": seed };
    assert_eq!(render("opt", &params).unwrap(), "opt(depth=None,seed=42)");
}

#[test]
fn test_params_macro_keeps_insertion_order() {
    let params = params! { "z": 1, "a": 2, "m": 3 };
    let keys: Vec<&str> = params.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    assert_eq!(render("N", &params).unwrap(), "N(a=2,m=3,z=1)");
}

#[test]
fn test_params_macro_last_duplicate_wins() {
    let params = params! { "a": 1, "a": 2 };
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("a"), Some(&Value::Int(2)));
}

#[test]
fn test_node_macro_nested() {
    let company = node!(Company { "name": "Chupa Chups", "city": "Barcelona" });
    let ducked = node!(ducked {
        "name": "salty-lollypops",
        "company": company.clone(),
        "quantity": 33,
    });

    assert_eq!(ducked.name, "ducked");
    assert_eq!(ducked.get("company"), Some(&Value::Node(company)));
    assert_eq!(
        ducked.to_string(),
        "ducked(company=Company(city='Barcelona',name='Chupa Chups'),name='salty-lollypops',quantity=33)"
    );
}

#[test]
fn test_node_macro_without_params() {
    assert_eq!(node!(Scaler), Node::named("Scaler"));
    assert_eq!(node!(Scaler {}), Node::named("Scaler"));
    assert_eq!(node!(Scaler).to_string(), "Scaler()");
}

#[test]
fn test_node_macro_with_expressions() {
    let n = 5;
    let node = node!(grid {
        "values": (0..n).map(Value::from).collect::<Vec<_>>(),
        "scale": n as f64 / 2.0,
    });
    assert_eq!(node.to_string(), "grid(scale=2.5,values=[0,1,2,3,4])");
}
