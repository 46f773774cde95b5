//! The element tree representing a parsed template body.

use crate::types::span::Span;
use crate::types::syntax::Delimiters;

/// A sequence of elements, in rendering order.
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Scope {
    pub elements: Vec<Element>,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub enum Element {
    /// Raw template, copied verbatim.
    Text(Span),

    /// An interpolated value, e.g. `{{ name }}` or `{{{ name }}}`.
    Var(Var),

    /// A positive or inverted section, e.g. `{{# items }} ... {{/ items }}`.
    Section(Section),

    /// A reference to a partial, e.g. `{{> header }}`.
    Partial(Partial),

    /// A comment, e.g. `{{! ignored }}`.
    Comment,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Var {
    pub path: Path,
    /// Whether escaping is suppressed.
    pub raw: bool,
    /// The span of the tag name.
    pub span: Span,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Section {
    pub path: Path,
    pub inverted: bool,
    pub scope: Scope,
    /// The unparsed source between the opening and closing tags.
    pub raw: Span,
    /// The delimiters active at the opening tag.
    pub delimiters: Delimiters,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Partial {
    pub name: String,
    /// The span of the whole tag.
    pub span: Span,
}

/// A tag name, either the implicit iterator `.` or a dotted path.
#[cfg_attr(internal_debug, derive(Debug))]
pub enum Path {
    Implicit,
    Keys(Vec<Ident>),
}

#[derive(Clone, Copy)]
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Ident {
    pub span: Span,
}

impl Scope {
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl Path {
    /// Splits the given name into a path.
    ///
    /// The span must cover the trimmed tag name.
    pub fn new(source: &str, span: Span) -> Self {
        let name = &source[span];
        if name == "." {
            return Self::Implicit;
        }
        let mut keys = Vec::new();
        let mut m = span.m;
        for segment in name.split('.') {
            let n = m + segment.len();
            keys.push(Ident {
                span: Span::from(m..n),
            });
            m = n + 1;
        }
        Self::Keys(keys)
    }
}
