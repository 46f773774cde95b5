#![allow(dead_code)]

mod writer;

#[allow(unused_imports)]
pub use writer::Writer;

use whisker::{Template, Value};

/// Parse and render a template with no partials from a [`Value`].
#[track_caller]
pub fn render(source: &str, ctx: &Value) -> String {
    Template::parse(source, ())
        .unwrap()
        .render_from(ctx)
        .unwrap()
}
