//! Types for escape functions.
//!
//! Escape functions are applied to the output of every variable tag that is
//! not raw, i.e. `{{ name }}` but not `{{{ name }}}` or `{{& name }}`. They
//! are configured using [`Options::escape`][crate::Options::escape].
//!
//! This module defines a [`Formatter`] type that is similar to
//! [`std::fmt::Formatter`] so it should be a familiar API. A mutable reference
//! to this struct is passed to escape functions and writing to it will update
//! the underlying buffer, be it a [`String`] or an arbitrary
//! [`std::io::Write`] buffer.
//!
//! All escape functions must have the following signature.
//!
//! ```text
//! use whisker::fmt;
//! Fn(&mut fmt::Formatter<'_>, &str) -> std::fmt::Result;
//! ```
//!
//! # Examples
//!
//! ### Escape ASCII
//!
//! Consider a use case where you want to escape all non-ascii characters
//! instead of HTML entities. We could define an escape function for that
//! using the standard library function [`escape_ascii`][slice::escape_ascii].
//!
//! ```
//! use std::fmt::Write;
//! use whisker::{fmt, Options};
//!
//! fn escape_ascii(f: &mut fmt::Formatter<'_>, s: &str) -> std::fmt::Result {
//!     write!(f, "{}", s.as_bytes().escape_ascii())
//! }
//!
//! let options = Options::new().escape(escape_ascii);
//! let result = whisker::Template::parse_with("{{ name }}", (), options)?
//!     .render(whisker::value! { name: "Amélie" })?;
//! assert_eq!(result, r"Am\xc3\xa9lie");
//! # Ok::<(), whisker::Error>(())
//! ```

use std::fmt;
use std::io;

/// An escape function or closure.
pub(crate) type EscapeFn =
    dyn Fn(&mut Formatter<'_>, &str) -> fmt::Result + Sync + Send + 'static;

/// A [`std::fmt::Write`] façade.
pub struct Formatter<'a> {
    buf: &'a mut (dyn fmt::Write + 'a),
}

pub(crate) struct Writer<W> {
    writer: W,
    err: Option<io::Error>,
}

impl<'a> Formatter<'a> {
    pub(crate) fn with_string(buf: &'a mut String) -> Self {
        Self { buf }
    }

    pub(crate) fn with_writer<W>(buf: &'a mut Writer<W>) -> Self
    where
        W: io::Write,
    {
        Self { buf }
    }
}

impl fmt::Write for Formatter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        fmt::Write::write_str(self.buf, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        fmt::Write::write_char(self.buf, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        fmt::Write::write_fmt(self.buf, args)
    }
}

impl<W> Writer<W>
where
    W: io::Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer, err: None }
    }

    pub fn take_err(&mut self) -> Option<io::Error> {
        self.err.take()
    }
}

impl<W> fmt::Write for Writer<W>
where
    W: io::Write,
{
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|e| {
            self.err = Some(e);
            fmt::Error
        })
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        self.write_str(c.encode_utf8(&mut [0; 4]))
    }
}

/// The default escape function.
///
/// Replaces the following characters with HTML entities.
///
/// | Character | Entity  |
/// | --------- | ------- |
/// | `<`       | `&lt;`  |
/// | `>`       | `&gt;`  |
/// | `&`       | `&amp;` |
/// | `"`       | `&#34;` |
/// | `'`       | `&#39;` |
pub fn escape_html(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    let mut last = 0;
    for (i, byte) in s.bytes().enumerate() {
        let entity = match byte {
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'&' => "&amp;",
            b'"' => "&#34;",
            b'\'' => "&#39;",
            _ => continue,
        };
        fmt::Write::write_str(f, &s[last..i])?;
        fmt::Write::write_str(f, entity)?;
        last = i + 1;
    }
    fmt::Write::write_str(f, &s[last..])
}

/// An escape function that writes the value unchanged.
///
/// Useful when rendering text that is not HTML.
#[inline]
pub fn no_escape(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    fmt::Write::write_str(f, s)
}
