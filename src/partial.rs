//! Defines the [`PartialProvider`] trait used to look up partial sources.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A source of partial templates.
///
/// The provider is consulted while a template is parsed: every `{{> name }}`
/// tag is resolved by calling [`get`][PartialProvider::get] once per distinct
/// name and the returned source is parsed together with the template. If the
/// provider returns [`None`] the partial renders as an empty string.
///
/// This trait is implemented for maps from names to sources, for `()`
/// which provides no partials, and for closures.
///
/// # Examples
///
/// ```
/// let partials = |name: &str| match name {
///     "user" => Some(String::from("<b>{{ name }}</b>")),
///     _ => None,
/// };
/// let result = whisker::Template::parse("Hello {{> user }}", partials)?
///     .render(whisker::value! { name: "John" })?;
/// assert_eq!(result, "Hello <b>John</b>");
/// # Ok::<(), whisker::Error>(())
/// ```
pub trait PartialProvider: Send + Sync {
    /// Returns the source of the named partial.
    fn get(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl PartialProvider for () {
    #[inline]
    fn get(&self, _: &str) -> Option<Cow<'_, str>> {
        None
    }
}

impl PartialProvider for BTreeMap<String, String> {
    #[inline]
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        BTreeMap::get(self, name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl<S> PartialProvider for HashMap<String, String, S>
where
    S: std::hash::BuildHasher + Send + Sync,
{
    #[inline]
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        HashMap::get(self, name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl<P> PartialProvider for Arc<P>
where
    P: PartialProvider + ?Sized,
{
    #[inline]
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).get(name)
    }
}

impl<F> PartialProvider for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    #[inline]
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self(name).map(Cow::Owned)
    }
}
