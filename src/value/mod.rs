//! Defines the [`Value`] enum, representing any valid renderable data.

mod cow;
mod from;
mod record;
#[cfg(feature = "serde")]
mod ser;

use std::borrow::Cow;
pub use std::collections::BTreeMap as Map;
use std::mem;
pub use std::vec::Vec as List;

pub(crate) use crate::value::cow::ValueCow;
pub use crate::value::record::{Lambda, Method, Record};
#[cfg(feature = "serde")]
pub use crate::value::ser::to_value;

/// Data to be rendered represented as a recursive enum.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    /// A mapping from keys to values, looked up by exact key.
    Map(Map<String, Value>),
    /// A structured record with named fields and methods.
    Record(Record),
    /// A function used to render a lambda section or variable.
    Lambda(Lambda),
}

impl Value {
    /// Construct a lambda value from the given function.
    ///
    /// When used as a section, e.g. `{{# bold }}Hi {{ name }}{{/ bold }}`, the
    /// function is called with the unrendered section source and the returned
    /// text is rendered in place of the section. When used as a variable the
    /// function is called with an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker::Value;
    ///
    /// let bold = Value::lambda(|text| format!("<b>{text}</b>"));
    /// let result = whisker::Template::parse("{{# bold }}Hi {{ name }}{{/ bold }}", ())?
    ///     .render_from(&whisker::value! { bold: bold, name: "John" })?;
    /// assert_eq!(result, "<b>Hi John</b>");
    /// # Ok::<(), whisker::Error>(())
    /// ```
    #[inline]
    pub fn lambda<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Lambda(Lambda::new(f))
    }

    /// Returns whether this value renders a section body.
    ///
    /// `None`, `false`, zero, the empty string, the empty list and the empty
    /// map are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::List(list) => !list.is_empty(),
            Self::Map(map) => !map.is_empty(),
            Self::Record(_) | Self::Lambda(_) => true,
        }
    }

    /// Returns the text this value is rendered as, if it has one.
    ///
    /// Lists, maps, records and lambdas have no textual form.
    pub(crate) fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::None => Some(Cow::Borrowed("")),
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            Self::Integer(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::String(s) => Some(Cow::Borrowed(s)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            (Self::Record(s), Self::Record(o)) => s == o,
            (Self::Lambda(s), Self::Lambda(o)) => s == o,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}
