//! A logic-less Mustache template engine.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Variables: `{{ user.name }}`, raw variables: `{{{ html }}}` or
//!   `{{& html }}`
//! - Sections: `{{# users }} ... {{/ users }}`
//! - Inverted sections: `{{^ users }} no users {{/ users }}`
//! - Partials: `{{> header }}`
//! - Comments: `{{! ignored }}`
//! - Custom delimiters: `{{=<% %>=}}`
//! - Lambda sections and variables using [`Value::lambda`]
//!
//! ### Engine
//!
//! - Templates are owned, cheap to clone and can be shared between threads
//! - Render to a [`String`] or any [`std::io::Write`] implementor
//! - Render using any [`serde`] serializable values or [`Value`]s built with
//!   the [`value!`] macro, [`Record`]s with methods
//! - Layered contexts and layouts
//! - An optional registry, [`Engine`], for named templates and partials
//!   including loading them from the filesystem
//!
//! # Getting started
//!
//! A template is parsed using [`Template::parse`] together with a
//! [`PartialProvider`] which is used to look up any partials. Use `()` if the
//! template doesn't reference any partials.
//!
//! ```
//! let template = whisker::Template::parse("Hello {{ user.name }}!", ())?;
//! let result = template.render(whisker::value! { user: { name: "John Smith" } })?;
//! assert_eq!(result, "Hello John Smith!");
//! # Ok::<(), whisker::Error>(())
//! ```
//!
//! Alternatively, the [`Engine`] struct stores named templates and partials.
//!
//! ```
//! let mut engine = whisker::Engine::new();
//! engine.add_partial("user", "<b>{{ name }}</b>")?;
//! engine.add_template("hello", "Hello {{> user }}")?;
//! let result = engine.render("hello", whisker::value! { name: "Bob" })?;
//! assert_eq!(result, "Hello <b>Bob</b>");
//! # Ok::<(), whisker::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Render using structured data
//!
//! Serialized structs become [`Record`]s. Record fields can be referred to
//! using their name with the first character lower-cased.
//!
//! ```
//! #[derive(serde::Serialize)]
//! struct Context { user: User }
//!
//! #[derive(serde::Serialize)]
//! #[allow(non_snake_case)]
//! struct User { Name: String }
//!
//! let ctx = Context { user: User { Name: "John Smith".into() } };
//!
//! let result = whisker::Template::parse("Hello {{ user.name }}", ())?
//!     .render(&ctx)?;
//!
//! assert_eq!(result, "Hello John Smith");
//! # Ok::<(), whisker::Error>(())
//! ```
//!
//! ### Loop over a list
//!
//! ```
//! let result = whisker::Template::parse("{{# items }}<{{ . }}>{{/ items }}", ())?
//!     .render(whisker::value! { items: [1, 2, 3] })?;
//! assert_eq!(result, "<1><2><3>");
//! # Ok::<(), whisker::Error>(())
//! ```
//!
//! ### Render a template to an `impl io::Write`
//!
//! ```
//! use std::io;
//!
//! let stdout = io::BufWriter::new(io::stdout());
//!
//! whisker::Template::parse("Hello {{ user.name }}", ())?
//!     .renderer()
//!     .context(whisker::value! { user: { name: "John Smith" } })
//!     .to_writer(stdout)?;
//! # Ok::<(), whisker::Error>(())
//! ```

mod compile;
mod error;
pub mod fmt;
mod fs;
mod macros;
mod options;
mod partial;
mod render;
mod types;
mod value;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use crate::error::{Error, ErrorKind};
pub use crate::options::Options;
pub use crate::partial::PartialProvider;
pub use crate::render::Renderer;
pub use crate::types::syntax::Delimiters;
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{Lambda, List, Map, Method, Record, Value};

use crate::types::program::Program;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A compiled template.
///
/// Templates are immutable once parsed. Cloning a template is cheap and
/// templates can be rendered concurrently from multiple threads.
#[derive(Clone)]
pub struct Template {
    program: Arc<Program>,
    options: Arc<Options>,
    partials: Arc<dyn PartialProvider>,
}

/// A registry of named templates and partials.
///
/// Partials added to the engine are available to every template it stores
/// and compiles. Each engine has its own set of partials.
pub struct Engine {
    options: Options,
    partials: Arc<BTreeMap<String, String>>,
    templates: BTreeMap<String, Template>,
}

impl Template {
    /// Parse a template using the default options.
    ///
    /// Every partial referenced by the template is looked up using the given
    /// provider while parsing.
    #[inline]
    pub fn parse<P>(source: impl Into<String>, partials: P) -> Result<Self>
    where
        P: PartialProvider + 'static,
    {
        Self::parse_with(source, partials, Options::default())
    }

    /// Parse a template using the given options.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker::{Options, Template};
    ///
    /// let options = Options::new().delimiters("<%", "%>");
    /// let result = Template::parse_with("Hello <% name %>", (), options)?
    ///     .render(whisker::value! { name: "John" })?;
    /// assert_eq!(result, "Hello John");
    /// # Ok::<(), whisker::Error>(())
    /// ```
    #[inline]
    pub fn parse_with<P>(source: impl Into<String>, partials: P, options: Options) -> Result<Self>
    where
        P: PartialProvider + 'static,
    {
        Self::compile(source.into(), Arc::new(options), Arc::new(partials))
    }

    fn compile(
        source: String,
        options: Arc<Options>,
        partials: Arc<dyn PartialProvider>,
    ) -> Result<Self> {
        let program = compile::template(source, &options.delimiters, &options, &*partials)?;
        Ok(Self {
            program: Arc::new(program),
            options,
            partials,
        })
    }

    /// Render the template to a string using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render<S>(&self, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.renderer().context(ctx).to_string()
    }

    /// Render the template to a string using the provided [`Value`].
    #[inline]
    pub fn render_from(&self, value: &Value) -> Result<String> {
        self.renderer().context_value(value).to_string()
    }

    /// Render the template to a writer using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_to_writer<W, S>(&self, writer: W, ctx: S) -> Result<()>
    where
        W: std::io::Write,
        S: serde::Serialize,
    {
        self.renderer().context(ctx).to_writer(writer)
    }

    /// Render the template inside the given layout.
    ///
    /// See [`Renderer::layout`].
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_in_layout<S>(&self, layout: &Template, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.renderer().context(ctx).layout(layout).to_string()
    }

    /// Returns a renderer for this template.
    ///
    /// The renderer can be used to layer multiple contexts, render inside a
    /// layout or render to a writer.
    #[inline]
    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(self)
    }

    /// Returns the original template source.
    #[inline]
    pub fn source(&self) -> &str {
        &self.program.root.source
    }

    /// Returns the options this template was parsed with.
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns whether the template references the named partial, directly
    /// or through another partial.
    fn references(&self, partial: &str) -> bool {
        self.program.partials.contains_key(partial)
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new engine with the default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Construct a new engine with the given options.
    #[inline]
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            partials: Arc::new(BTreeMap::new()),
            templates: BTreeMap::new(),
        }
    }

    /// Returns the options used for templates added after this call.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut engine = whisker::Engine::new();
    /// *engine.options_mut() = whisker::Options::new().allow_missing_variables(false);
    /// let err = engine.compile("{{ name }}")?.render(whisker::value! {}).unwrap_err();
    /// assert_eq!(err.kind(), whisker::ErrorKind::MissingVariable);
    /// # Ok::<(), whisker::Error>(())
    /// ```
    #[inline]
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Compile a template and store it under the given name.
    ///
    /// If a template with the same name already exists it is replaced. If the
    /// template fails to compile nothing is stored.
    pub fn add_template(&mut self, name: impl Into<String>, source: impl Into<String>) -> Result<()> {
        let name = name.into();
        let template = self
            .compile(source)
            .map_err(|err| err.with_template_name(&name))?;
        tracing::debug!(template = %name, "registered template");
        self.templates.insert(name, template);
        Ok(())
    }

    /// Store a partial under the given name.
    ///
    /// Stored templates that reference the partial are compiled again so that
    /// they see the new source. If any of them fail to compile the engine is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut engine = whisker::Engine::new();
    /// engine.add_template("page", "Hello {{> name }}")?;
    /// assert_eq!(engine.render("page", whisker::value! {})?, "Hello ");
    ///
    /// engine.add_partial("name", "World")?;
    /// assert_eq!(engine.render("page", whisker::value! {})?, "Hello World");
    /// # Ok::<(), whisker::Error>(())
    /// ```
    pub fn add_partial(&mut self, name: impl Into<String>, source: impl Into<String>) -> Result<()> {
        let name = name.into();

        let mut partials = Arc::clone(&self.partials);
        Arc::make_mut(&mut partials).insert(name.clone(), source.into());
        let provider: Arc<dyn PartialProvider> = partials.clone();

        let mut templates = BTreeMap::new();
        let mut recompiled = 0;
        for (template_name, template) in &self.templates {
            let template = if template.references(&name) {
                recompiled += 1;
                let source = template.source().to_owned();
                Template::compile(source, template.options.clone(), provider.clone())
                    .map_err(|err| err.with_template_name(template_name))?
            } else {
                Template {
                    partials: provider.clone(),
                    ..template.clone()
                }
            };
            templates.insert(template_name.clone(), template);
        }

        tracing::debug!(partial = %name, recompiled, "registered partial");
        self.partials = partials;
        self.templates = templates;
        Ok(())
    }

    /// Compile a template using the engine's options and partials without
    /// storing it.
    pub fn compile(&self, source: impl Into<String>) -> Result<Template> {
        Template::compile(
            source.into(),
            Arc::new(self.options.clone()),
            self.partials.clone(),
        )
    }

    /// Lookup a template by name.
    #[inline]
    pub fn get_template(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| Error::template_not_found(name))
    }

    /// Lookup the source of a partial by name.
    #[inline]
    pub fn get_partial(&self, name: &str) -> Option<&str> {
        self.partials.as_ref().get(name).map(String::as_str)
    }

    /// Remove a template by name, returning it if it existed.
    #[inline]
    pub fn remove_template(&mut self, name: &str) -> Option<Template> {
        self.templates.remove(name)
    }

    /// Render the named template to a string using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn render<S>(&self, name: &str, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.renderer(name)?.context(ctx).to_string()
    }

    /// Render the named template to a string using the provided [`Value`].
    ///
    /// Use this instead of [`.render(..)`][Engine::render] when the value
    /// contains records or lambdas.
    #[inline]
    pub fn render_from(&self, name: &str, value: &Value) -> Result<String> {
        self.renderer(name)?.context_value(value).to_string()
    }

    /// Returns a renderer for the named template.
    ///
    /// Errors raised while rendering are attached to `name`.
    #[inline]
    pub fn renderer<'render>(&'render self, name: &'render str) -> Result<Renderer<'render>> {
        Ok(self.get_template(name)?.renderer().with_name(name))
    }

    /// Render the named template inside the named layout.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut engine = whisker::Engine::new();
    /// engine.add_template("layout", "<body>{{{ content }}}</body>")?;
    /// engine.add_template("page", "Hi {{ name }}")?;
    /// let result = engine.render_in_layout("page", "layout", whisker::value! { name: "Ann" })?;
    /// assert_eq!(result, "<body>Hi Ann</body>");
    /// # Ok::<(), whisker::Error>(())
    /// ```
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn render_in_layout<S>(&self, name: &str, layout: &str, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        let layout_template = self.get_template(layout)?;
        self.renderer(name)?
            .context(ctx)
            .named_layout(layout_template, layout)
            .to_string()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("partials", &self.partials.keys())
            .field("templates", &self.templates.keys())
            .finish()
    }
}
