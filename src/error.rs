use std::cmp::max;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::types::span::Span;

/// An error that can occur during template parsing, rendering or loading.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    /// The error message.
    msg: String,
    /// The name of the template or partial the error occurred in.
    name: Option<String>,
    /// The template source and span the error refers to.
    pretty: Option<(String, Span)>,
    /// The underlying cause, only populated for IO errors.
    cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

/// The kind of an [`Error`].
///
/// This can be used to branch on what went wrong without relying on the
/// error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The template source is malformed, e.g. an unclosed tag or section.
    Syntax,
    /// A variable tag did not resolve and missing variables are not allowed.
    MissingVariable,
    /// Partials were nested deeper than the configured maximum.
    MaxPartialDepth,
    /// No template is registered under the requested name.
    TemplateNotFound,
    /// A value could not be converted to a [`Value`][crate::Value].
    Serialize,
    /// The escape function failed to write its output.
    Format,
    /// Reading a template or writing the output failed.
    Io,
    /// A glob pattern is invalid or did not match any files.
    Pattern,
}

impl Error {
    fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            name: None,
            pretty: None,
            cause: None,
        }
    }

    /// Constructs a new syntax error.
    pub(crate) fn syntax(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        let mut err = Self::new(ErrorKind::Syntax, msg);
        err.pretty = Some((source.to_owned(), span.into()));
        err
    }

    /// Constructs an error for a variable that could not be resolved.
    pub(crate) fn missing_variable(source: &str, span: Span) -> Self {
        let mut err = Self::new(
            ErrorKind::MissingVariable,
            format!("missing variable `{}`", &source[span]),
        );
        err.pretty = Some((source.to_owned(), span));
        err
    }

    pub(crate) fn max_partial_depth(max: usize) -> Self {
        Self::new(
            ErrorKind::MaxPartialDepth,
            format!("reached maximum partial depth ({max})"),
        )
    }

    pub(crate) fn template_not_found(name: &str) -> Self {
        Self::new(
            ErrorKind::TemplateNotFound,
            format!("template `{name}` not found"),
        )
    }

    pub(crate) fn pattern(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Pattern, msg)
    }

    /// Attaches the source location, if not already set.
    pub(crate) fn with_span(mut self, source: &str, span: Span) -> Self {
        if self.pretty.is_none() {
            self.pretty = Some((source.to_owned(), span));
        }
        self
    }

    /// Attaches the name of the template or partial, if not already set.
    pub(crate) fn with_template_name(mut self, name: &str) -> Self {
        if self.name.is_none() {
            self.name = Some(name.to_owned());
        }
        self
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if this error is a missing template error.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::TemplateNotFound
    }

    /// Returns the 1-based line in the template source that this error refers
    /// to, if any.
    pub fn line(&self) -> Option<usize> {
        self.pretty.as_ref().map(|(source, span)| span.line(source))
    }

    /// Returns the name of the template or partial this error occurred in, if
    /// known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the error message without any location information.
    pub fn message(&self) -> &str {
        &self.msg
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(ErrorKind::Serialize, msg.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        let mut e = Self::new(ErrorKind::Io, err.to_string());
        e.cause = Some(Arc::new(err));
        e
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::new(ErrorKind::Format, "failed to format value")
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Self::pattern(format!("invalid glob pattern: {err}"))
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        let path = err.path().display().to_string();
        let mut e = Self::from(io::Error::from(err));
        e.name = Some(path);
        e
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|err| &**err as &(dyn std::error::Error + 'static))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pretty {
            Some((source, span)) => fmt_pretty(&self.msg, self.name.as_deref(), source, *span, f),
            None => fmt::Display::fmt(self, f),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pretty {
            Some((source, span)) if f.alternate() => {
                fmt_pretty(&self.msg, self.name.as_deref(), source, *span, f)
            }
            Some((source, span)) => {
                write!(f, "{} on line {}", self.msg, span.line(source))?;
                if let Some(name) = &self.name {
                    write!(f, " in template `{name}`")?;
                }
                Ok(())
            }
            None => match &self.name {
                Some(name) => write!(f, "{} ({name})", self.msg),
                None => write!(f, "{}", self.msg),
            },
        }
    }
}

fn fmt_pretty(
    msg: &str,
    name: Option<&str>,
    source: &str,
    span: Span,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let width = max(1, width(&source[span]));
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    let num = (line + 1).to_string();
    let pad = num.len();
    let pipe = "|";
    let underline = "^".repeat(width);

    if let Some(name) = name {
        write!(f, "\n {0:pad$}--> {name}:{num}:{col}", "", col = col + 1)?;
    }
    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, width(&line[..offset - n]));
        }
        n += len;
    }
    (lines.len(), lines.last().map(|l| width(l)).unwrap_or(0))
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}
