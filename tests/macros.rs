use std::collections::BTreeMap;

use whisker::{value, Record, Value};

#[test]
fn value_empty() {
    let v = value! {};
    let exp = Value::Map(Default::default());
    assert_eq!(v, exp);
}

#[test]
fn value_literal() {
    let tests = [
        (value! { f: None }, Value::from([("f", Value::None)])),
        (value! { f: true }, Value::from([("f", true)])),
        (value! { f: false }, Value::from([("f", false)])),
        (value! { f: 123 }, Value::from([("f", 123)])),
        (value! { f: -123 }, Value::from([("f", -123)])),
        (value! { f: 12.3 }, Value::from([("f", 12.3)])),
        (value! { f: -12.3 }, Value::from([("f", -12.3)])),
        (value! { f: "test" }, Value::from([("f", "test")])),
    ];
    for (v, exp) in tests {
        assert_eq!(v, exp);
    }
}

#[test]
fn value_expressions() {
    let name = String::from("John");
    let v = value! {
        sum: 1 + 2 * 3,
        name: name.clone(),
        upper: name.to_uppercase(),
        opt: Some(1),
    };
    let exp = Value::from([
        ("sum", Value::from(7)),
        ("name", Value::from("John")),
        ("upper", Value::from("JOHN")),
        ("opt", Value::from(1)),
    ]);
    assert_eq!(v, exp);
}

#[test]
fn value_list() {
    // empty list
    let v = value! { field: [] };
    let exp = Value::from([("field", Value::List(vec![]))]);
    assert_eq!(v, exp);

    // single element list
    let v = value! { field: [true] };
    let exp = Value::from([("field", Value::from(vec![true]))]);
    assert_eq!(v, exp);

    // single element expression list, with trailing comma
    let v = value! { field: [ (1 + 2 * 3), ] };
    let exp = Value::from([("field", Value::from(vec![7]))]);
    assert_eq!(v, exp);

    // a variety of elements
    let v = value! { all: [None, false, true, 123, 12.3, "testing...", [], {}] };
    let exp = Value::from([(
        "all",
        vec![
            Value::None,
            Value::Bool(false),
            Value::Bool(true),
            Value::Integer(123),
            Value::Float(12.3),
            Value::String("testing...".into()),
            Value::List(Vec::new()),
            Value::Map(BTreeMap::new()),
        ],
    )]);
    assert_eq!(v, exp);
}

#[test]
fn value_map() {
    // empty map
    let v = value! { field: {} };
    let exp = Value::from([("field", Value::Map(Default::default()))]);
    assert_eq!(v, exp);

    // single field map, with trailing comma
    let v = value! { field: { x: "hello", } };
    let exp = Value::from([("field", Value::from([("x", "hello")]))]);
    assert_eq!(v, exp);

    // nested lists of maps
    let v = value! {
        users: [
            { name: "a", roles: ["admin"] },
            { name: "b", roles: [] },
        ]
    };
    let exp = Value::from([(
        "users",
        Value::from([
            Value::from([("name", Value::from("a")), ("roles", Value::from(["admin"]))]),
            Value::from([("name", Value::from("b")), ("roles", Value::List(vec![]))]),
        ]),
    )]);
    assert_eq!(v, exp);
}

#[test]
fn value_records_and_lambdas() {
    let record = Record::named("User").field("Name", "John");
    let lambda = Value::lambda(|s| s.to_owned());
    let v = value! { user: record.clone(), wrap: lambda.clone() };
    let exp = Value::from([("user", Value::from(record)), ("wrap", lambda)]);
    assert_eq!(v, exp);
}

#[test]
fn value_renders() {
    let v = value! { user: { name: "John", tags: ["a", "b"] } };
    let result = whisker::Template::parse("{{# user }}{{ name }}:{{# tags }}{{ . }}{{/ tags }}{{/ user }}", ())
        .unwrap()
        .render_from(&v)
        .unwrap();
    assert_eq!(result, "John:ab");
}
