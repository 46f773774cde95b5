use std::fmt;
use std::sync::Arc;

use crate::fmt::{escape_html, EscapeFn, Formatter};
use crate::types::syntax::Delimiters;

/// The parse and render configuration.
///
/// A snapshot of the options is stored in every [`Template`][crate::Template]
/// when it is parsed, so changing options on an [`Engine`][crate::Engine]
/// only affects templates added afterwards.
///
/// # Examples
///
/// ```
/// use whisker::Options;
///
/// let options = Options::new()
///     .delimiters("<%", "%>")
///     .allow_missing_variables(false)
///     .escape(whisker::fmt::no_escape);
/// ```
#[derive(Clone)]
pub struct Options {
    pub(crate) delimiters: Delimiters,
    pub(crate) allow_missing_variables: bool,
    pub(crate) decapitalize: bool,
    pub(crate) escape: Arc<EscapeFn>,
    pub(crate) max_partial_depth: usize,
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            allow_missing_variables: true,
            decapitalize: true,
            escape: Arc::new(escape_html),
            max_partial_depth: 64,
        }
    }
}

impl Options {
    /// Returns the default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiters that templates start out with.
    ///
    /// Partials are always parsed starting with these delimiters, regardless
    /// of the delimiters active at the point they are referenced.
    ///
    /// # Panics
    ///
    /// If either of the strings are empty, contain whitespace or contain `=`.
    #[inline]
    pub fn delimiters(mut self, open: &str, close: &str) -> Self {
        self.delimiters = Delimiters::new(open, close);
        self
    }

    /// Set whether variables that cannot be resolved render as an empty
    /// string.
    ///
    /// Defaults to `true`. If disabled then rendering fails with an
    /// [`ErrorKind::MissingVariable`][crate::ErrorKind::MissingVariable]
    /// error.
    #[inline]
    pub fn allow_missing_variables(mut self, yes: bool) -> Self {
        self.allow_missing_variables = yes;
        self
    }

    /// Set whether a name like `name` may match a record field or method
    /// spelled `Name`.
    ///
    /// Defaults to `true`. If disabled then only exact-case map keys and
    /// record fields are looked up, record methods are not consulted.
    #[inline]
    pub fn decapitalize(mut self, yes: bool) -> Self {
        self.decapitalize = yes;
        self
    }

    /// Set the function used to escape the output of variable tags.
    ///
    /// Defaults to [`escape_html`][crate::fmt::escape_html].
    #[inline]
    pub fn escape<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Formatter<'_>, &str) -> fmt::Result + Sync + Send + 'static,
    {
        self.escape = Arc::new(f);
        self
    }

    /// Set the maximum number of nested partials during rendering.
    ///
    /// Defaults to 64.
    #[inline]
    pub fn max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = depth;
        self
    }

    /// Returns the delimiters that templates start out with.
    #[inline]
    pub fn get_delimiters(&self) -> &Delimiters {
        &self.delimiters
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("delimiters", &self.delimiters)
            .field("allow_missing_variables", &self.allow_missing_variables)
            .field("decapitalize", &self.decapitalize)
            .field("max_partial_depth", &self.max_partial_depth)
            .finish_non_exhaustive()
    }
}
