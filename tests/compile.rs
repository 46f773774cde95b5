use std::collections::BTreeMap;

use whisker::{Engine, Error, ErrorKind, Template};

#[test]
fn compile_empty() {
    Template::parse("", ()).unwrap();
}

#[test]
fn compile_raw() {
    Template::parse("lorem ipsum dolor sit amet", ()).unwrap();
}

#[test]
fn compile_every_tag() {
    Template::parse(
        "{{ a }} {{{ b }}} {{& c.d }} {{# e }}{{^ f }}{{/ f }}{{/ e }} {{> g }} {{! h }} {{=<% %>=}}",
        (),
    )
    .unwrap();
}

#[test]
fn compile_err_unclosed_tag() {
    let err = Template::parse("lorem {{ ipsum", ()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.to_string(), "unclosed tag, expected `}}` on line 1");
    assert_format(
        &err,
        "
   |
 1 | lorem {{ ipsum
   |       ^^ unclosed tag, expected `}}`
",
    );
}

#[test]
fn compile_err_unclosed_raw_tag() {
    let err = Template::parse("lorem {{{ ipsum }}", ()).unwrap_err();
    assert_eq!(err.message(), "unclosed tag, expected `}}}`");
}

#[test]
fn compile_err_unclosed_section() {
    let err = Template::parse("lorem\nipsum {{# a }}", ()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_format(
        &err,
        "
   |
 2 | ipsum {{# a }}
   |       ^^^^^^^^ unclosed section `a`
",
    );
}

#[test]
fn compile_err_unexpected_close_section() {
    let err = Template::parse("lorem {{/ ipsum }}", ()).unwrap_err();
    assert_eq!(err.message(), "unexpected close section `ipsum`");
}

#[test]
fn compile_err_mismatched_close_section() {
    let err = Template::parse("{{# a }}{{# b }}{{/ a }}{{/ b }}", ()).unwrap_err();
    assert_eq!(
        err.message(),
        "mismatched close section, expected `b`, found `a`"
    );
    assert_format(
        &err,
        "
   |
 1 | {{# a }}{{# b }}{{/ a }}{{/ b }}
   |                     ^ mismatched close section, expected `b`, found `a`
",
    );
}

#[test]
fn compile_err_invalid_set_delimiters() {
    let sources = [
        "{{=<%=}}",
        "{{=<% %> %>=}}",
        "{{==}}",
        "{{=<= =>=}}",
        "{{=<% %>}}",
    ];
    for source in sources {
        let err = Template::parse(source, ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{source}");
    }
}

#[test]
fn compile_err_empty_tag() {
    for source in ["{{}}", "{{ }}", "{{#}}{{/}}", "{{&  }}", "{{>}}"] {
        let err = Template::parse(source, ()).unwrap_err();
        assert_eq!(err.message(), "expected a name", "{source}");
    }
}

#[test]
fn compile_err_in_partial_names_partial() {
    let partials = BTreeMap::from([(String::from("card"), String::from("\n{{# a }}"))]);
    let err = Template::parse("{{> card }}", partials).unwrap_err();
    assert_eq!(err.name(), Some("card"));
    assert_eq!(err.line(), Some(2));
    assert_eq!(
        err.to_string(),
        "unclosed section `a` on line 2 in template `card`"
    );
    assert_format(
        &err,
        "
  --> card:2:1
   |
 2 | {{# a }}
   | ^^^^^^^^ unclosed section `a`
",
    );
}

#[test]
fn compile_err_in_engine_names_template() {
    let mut engine = Engine::new();
    let err = engine.add_template("index", "{{# a }}").unwrap_err();
    assert_eq!(err.name(), Some("index"));
    assert!(engine.get_template("index").unwrap_err().is_not_found());
}

#[test]
fn compile_err_display_multibyte() {
    let err = Template::parse("привіт {{# a }}", ()).unwrap_err();
    assert_format(
        &err,
        "
   |
 1 | привіт {{# a }}
   |        ^^^^^^^^ unclosed section `a`
",
    );
}

#[track_caller]
fn assert_format(err: &Error, expected: &str) {
    let display = format!("{err:#}");
    let debug = format!("{err:?}");
    assert_eq!(display, debug);
    if display != expected {
        panic!("\n\nDisplay:\n{display}\nExpected:\n{expected}\n\n");
    }
}
