#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde::Serialize;

#[derive(Debug, Serialize, Arbitrary)]
enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

fuzz_target!(|data: (&str, Vec<(&str, &str)>, Value)| {
    let (root, partials, value) = data;
    let mut engine = whisker::Engine::new();
    for (name, source) in partials {
        let _ = engine.add_partial(name, source);
    }
    if engine.add_template("fuzz", root).is_err() {
        return;
    }
    let _ = engine.render("fuzz", &value);
});
