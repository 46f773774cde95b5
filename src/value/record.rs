use std::fmt;
use std::sync::Arc;

use crate::value::Map;
use crate::Value;

/// A structured record with named fields and zero-argument methods.
///
/// Serializing a struct results in a record whose fields are the serialized
/// fields of the struct. Unlike [`Value::Map`] keys, record fields and methods
/// are also matched with their first character lower-cased, so a template
/// can refer to a field `Name` as `{{ name }}`. See
/// [`Options::decapitalize`][crate::Options::decapitalize].
///
/// Records keep these lookup rules only when passed as a [`Value`], using
/// [`Template::render_from`][crate::Template::render_from] or
/// [`Renderer::context_value`][crate::Renderer::context_value]. Serializing a
/// record yields a plain map of its fields, and fails if it has methods.
///
/// # Examples
///
/// ```
/// use whisker::{Record, Value};
///
/// let name = String::from("Bob");
/// let user = Record::named("User")
///     .field("Name", name.clone())
///     .method("Initial", move || Value::from(&name[..1]));
///
/// let result = whisker::Template::parse("{{ name }} ({{ initial }})", ())?
///     .render_from(&Value::from(user))?;
/// assert_eq!(result, "Bob (B)");
/// # Ok::<(), whisker::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Record {
    name: Option<String>,
    fields: Map<String, Value>,
    methods: Map<String, Method>,
}

/// A zero-argument method on a [`Record`].
#[derive(Clone)]
pub struct Method(Arc<dyn Fn() -> Value + Send + Sync>);

/// A function that renders a section from its unparsed source.
///
/// See [`Value::lambda`].
#[derive(Clone)]
pub struct Lambda(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Record {
    /// Construct a new empty record.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a new empty record with the given type name.
    #[inline]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Add a field to the record.
    #[inline]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a zero-argument method to the record.
    ///
    /// The method is called every time a template resolves it.
    #[inline]
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Method(Arc::new(f)));
        self
    }

    /// Insert a field into the record, returning the previous value.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Returns the type name of the record, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the field with exactly the given name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns an iterator over the fields of the record.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields in the record.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has any methods.
    #[inline]
    pub fn has_methods(&self) -> bool {
        !self.methods.is_empty()
    }

    /// Returns `true` if the record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by name, optionally also matching a field whose name
    /// with the first character lower-cased equals `key`.
    pub(crate) fn lookup_field(&self, key: &str, decapitalize: bool) -> Option<&Value> {
        if let Some(value) = self.fields.get(key) {
            return Some(value);
        }
        if !decapitalize {
            return None;
        }
        self.fields
            .iter()
            .find(|(name, _)| is_decapitalized(name, key))
            .map(|(_, value)| value)
    }

    /// Looks up a method using the same rules as fields and calls it.
    pub(crate) fn call_method(&self, key: &str) -> Option<Value> {
        let method = match self.methods.get(key) {
            Some(method) => method,
            None => {
                self.methods
                    .iter()
                    .find(|(name, _)| is_decapitalized(name, key))?
                    .1
            }
        };
        Some((method.0)())
    }
}

impl Lambda {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Calls the lambda with the given section source.
    #[inline]
    pub fn call(&self, text: &str) -> String {
        (self.0)(text)
    }
}

/// Returns `true` if `name` with its first character lower-cased is `key`.
fn is_decapitalized(name: &str, key: &str) -> bool {
    let mut name = name.chars();
    let mut key = key.chars();
    match (name.next(), key.next()) {
        (Some(n), Some(k)) => {
            n.to_lowercase().eq(std::iter::once(k)) && name.as_str() == key.as_str()
        }
        _ => false,
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.fields == other.fields
            && self.methods.len() == other.methods.len()
            && self
                .methods
                .iter()
                .zip(&other.methods)
                .all(|((a, m), (b, n))| a == b && Arc::ptr_eq(&m.0, &n.0))
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Record");
        d.field("name", &self.name);
        d.field("fields", &self.fields);
        d.field("methods", &self.methods.keys().collect::<Vec<_>>());
        d.finish()
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<method>")
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<lambda>")
    }
}
