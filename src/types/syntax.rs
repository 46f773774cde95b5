use std::fmt;

/// A pair of tag delimiters, e.g. `{{` and `}}`.
///
/// Templates start out using the delimiters configured in
/// [`Options`][crate::Options] and may change them at any point using a set
/// delimiter tag, e.g. `{{=<% %>=}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub(crate) open: String,
    pub(crate) close: String,
}

impl Default for Delimiters {
    /// Returns the standard Mustache delimiters `{{` and `}}`.
    #[inline]
    fn default() -> Self {
        Self {
            open: String::from("{{"),
            close: String::from("}}"),
        }
    }
}

impl Delimiters {
    /// Construct a new delimiter pair.
    ///
    /// # Examples
    ///
    /// ```
    /// let delims = whisker::Delimiters::new("<%", "%>");
    /// assert_eq!(delims.open(), "<%");
    /// ```
    ///
    /// # Panics
    ///
    /// If either of the strings are empty, contain whitespace or contain `=`.
    #[inline]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        let open = open.into();
        let close = close.into();
        assert!(
            is_valid(&open) && is_valid(&close),
            "delimiters must be non-empty and must not contain whitespace or `=`"
        );
        Self { open, close }
    }

    /// Parses the contents of a set delimiter tag, e.g. `<% %>`.
    pub(crate) fn parse(directive: &str) -> Option<Self> {
        let mut parts = directive.split_whitespace();
        let open = parts.next()?;
        let close = parts.next()?;
        if parts.next().is_some() || !is_valid(open) || !is_valid(close) {
            return None;
        }
        Some(Self {
            open: open.to_owned(),
            close: close.to_owned(),
        })
    }

    /// Returns the opening delimiter.
    #[inline]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Returns the closing delimiter.
    #[inline]
    pub fn close(&self) -> &str {
        &self.close
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.open, self.close)
    }
}

fn is_valid(delim: &str) -> bool {
    !delim.is_empty() && !delim.contains(|c: char| c == '=' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiters_parse() {
        let d = Delimiters::parse(" <%   %> ").unwrap();
        assert_eq!(d, Delimiters::new("<%", "%>"));
    }

    #[test]
    fn delimiters_parse_invalid() {
        assert!(Delimiters::parse("").is_none());
        assert!(Delimiters::parse("<%").is_none());
        assert!(Delimiters::parse("<% %> !!").is_none());
        assert!(Delimiters::parse("<= =>").is_none());
    }

    #[test]
    #[should_panic]
    fn delimiters_new_empty() {
        Delimiters::new("", "}}");
    }
}
