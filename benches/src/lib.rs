pub mod context;
#[cfg(test)]
mod tests;

/// Abstraction for a template engine.
pub trait Engine {
    fn name() -> &'static str;
    fn new() -> Self;
    fn add_template(&mut self, name: &'static str, source: &str);
    fn render<S>(&self, name: &'static str, ctx: &S) -> String
    where
        S: serde::Serialize;
}

////////////////////////////////////////////////////////////////////////////////
/// handlebars
////////////////////////////////////////////////////////////////////////////////

pub type Handlebars = handlebars::Handlebars<'static>;

impl Engine for Handlebars {
    #[inline]
    fn name() -> &'static str {
        "handlebars"
    }

    #[inline]
    fn new() -> Self {
        let mut hbs = handlebars::Handlebars::new();
        // both engines escape HTML by default, disable it so that only the
        // template machinery is measured
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    #[inline]
    fn add_template(&mut self, name: &'static str, source: &str) {
        self.register_template_string(name, source).unwrap();
    }

    #[inline]
    fn render<S>(&self, name: &'static str, ctx: &S) -> String
    where
        S: serde::Serialize,
    {
        handlebars::Handlebars::render(self, name, ctx).unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////
/// whisker
////////////////////////////////////////////////////////////////////////////////

pub type Whisker = whisker::Engine;

impl Engine for Whisker {
    #[inline]
    fn name() -> &'static str {
        "whisker"
    }

    #[inline]
    fn new() -> Self {
        let options = whisker::Options::new().escape(whisker::fmt::no_escape);
        whisker::Engine::with_options(options)
    }

    #[inline]
    fn add_template(&mut self, name: &'static str, source: &str) {
        whisker::Engine::add_template(self, name, source).unwrap();
    }

    #[inline]
    fn render<S>(&self, name: &'static str, ctx: &S) -> String
    where
        S: serde::Serialize,
    {
        whisker::Engine::render(self, name, ctx).unwrap()
    }
}
