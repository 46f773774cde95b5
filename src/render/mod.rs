#![allow(clippy::wrong_self_convention)]

mod core;
mod stack;
mod value;

use std::io;

use crate::fmt::{Formatter, Writer};
use crate::render::core::RendererImpl;
use crate::render::stack::Stack;
use crate::value::ValueCow;
use crate::{Error, Result, Template, Value};

/// A renderer that interprets a compiled [`Template`].
///
/// This struct is created by [`Template::renderer`] or
/// [`Engine::renderer`][crate::Engine::renderer]. Context values are layered
/// in the order they are added: names are first looked up in the first
/// context and fall through to the next one if they are not found.
///
/// # Examples
///
/// ```
/// let template = whisker::Template::parse("{{ x }} {{ y }}", ())?;
/// let result = template
///     .renderer()
///     .context(whisker::value! { x: "a" })
///     .context(whisker::value! { x: "b", y: "b" })
///     .to_string()?;
/// assert_eq!(result, "a b");
/// # Ok::<(), whisker::Error>(())
/// ```
#[must_use = "must call `.to_string()` or `.to_writer(..)` on the renderer"]
pub struct Renderer<'render> {
    template: &'render Template,
    name: Option<&'render str>,
    layers: Vec<Layer<'render>>,
    layout: Option<(&'render Template, Option<&'render str>)>,
    allow_missing_variables: Option<bool>,
}

enum Layer<'render> {
    Owned(Result<Value>),
    Borrowed(&'render Value),
}

impl<'render> Renderer<'render> {
    pub(crate) fn new(template: &'render Template) -> Self {
        Self {
            template,
            name: None,
            layers: Vec::new(),
            layout: None,
            allow_missing_variables: None,
        }
    }

    /// Sets the template name attached to rendering errors.
    pub(crate) fn with_name(mut self, name: &'render str) -> Self {
        self.name = Some(name);
        self
    }

    /// Like [`.layout(..)`][Renderer::layout] but errors raised by the layout
    /// are attached to the layout's name.
    pub(crate) fn named_layout(mut self, layout: &'render Template, name: &'render str) -> Self {
        self.layout = Some((layout, Some(name)));
        self
    }

    /// Add a context layer from any serializable value.
    ///
    /// If the value fails to serialize the error is returned when rendering.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn context<S>(mut self, ctx: S) -> Self
    where
        S: ::serde::Serialize,
    {
        self.layers.push(Layer::Owned(crate::to_value(ctx)));
        self
    }

    /// Add a context layer from a borrowed [`Value`].
    ///
    /// Unlike [`.context(..)`][Renderer::context] this does not clone the
    /// value and supports values containing records with methods and lambdas.
    pub fn context_value(mut self, value: &'render Value) -> Self {
        self.layers.push(Layer::Borrowed(value));
        self
    }

    /// Render the template inside the given layout.
    ///
    /// The template is rendered first and the result is made available to the
    /// layout as `content`, below all the other context layers.
    ///
    /// # Examples
    ///
    /// ```
    /// let layout = whisker::Template::parse("<main>{{{ content }}}</main>", ())?;
    /// let result = whisker::Template::parse("Hello {{ name }}", ())?
    ///     .renderer()
    ///     .context(whisker::value! { name: "John" })
    ///     .layout(&layout)
    ///     .to_string()?;
    /// assert_eq!(result, "<main>Hello John</main>");
    /// # Ok::<(), whisker::Error>(())
    /// ```
    pub fn layout(mut self, layout: &'render Template) -> Self {
        self.layout = Some((layout, None));
        self
    }

    /// Set whether variables that cannot be resolved render as an empty
    /// string.
    ///
    /// Defaults to the template setting, see
    /// [`Options::allow_missing_variables`][crate::Options::allow_missing_variables].
    pub fn allow_missing_variables(mut self, yes: bool) -> Self {
        self.allow_missing_variables = Some(yes);
        self
    }

    /// Render the template to a string.
    pub fn to_string(self) -> Result<String> {
        let mut s = String::with_capacity(self.template.source().len());
        let mut f = Formatter::with_string(&mut s);
        self.render(&mut f)?;
        Ok(s)
    }

    /// Render the template to the given writer.
    pub fn to_writer<W>(self, writer: W) -> Result<()>
    where
        W: io::Write,
    {
        let mut w = Writer::new(writer);
        let mut f = Formatter::with_writer(&mut w);
        self.render(&mut f)
            .map_err(|err| w.take_err().map(Error::from).unwrap_or(err))
    }

    fn render(self, f: &mut Formatter<'_>) -> Result<()> {
        let Self {
            template,
            name,
            layers,
            layout,
            allow_missing_variables,
        } = self;

        let layers = layers
            .into_iter()
            .map(|layer| match layer {
                Layer::Owned(result) => result.map(ValueCow::Owned),
                Layer::Borrowed(value) => Ok(ValueCow::Borrowed(value)),
            })
            .collect::<Result<Vec<_>>>()?;
        let values: Vec<&Value> = layers.iter().map(|v| &**v).collect();

        match layout {
            None => renderer(template, allow_missing_variables)
                .render(f, &Stack::new(&values))
                .map_err(|err| named(err, name)),
            Some((layout, layout_name)) => {
                let mut content = String::with_capacity(template.source().len());
                renderer(template, allow_missing_variables)
                    .render(&mut Formatter::with_string(&mut content), &Stack::new(&values))
                    .map_err(|err| named(err, name))?;
                let content = Value::from([("content", content)]);
                let mut values = values;
                values.push(&content);
                renderer(layout, allow_missing_variables)
                    .render(f, &Stack::new(&values))
                    .map_err(|err| named(err, layout_name))
            }
        }
    }
}

fn named(err: Error, name: Option<&str>) -> Error {
    match name {
        Some(name) => err.with_template_name(name),
        None => err,
    }
}

fn renderer(template: &Template, allow_missing_variables: Option<bool>) -> RendererImpl<'_> {
    RendererImpl {
        template,
        allow_missing_variables: allow_missing_variables
            .unwrap_or(template.options.allow_missing_variables),
    }
}
