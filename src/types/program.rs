//! Defines a compiled [`Program`], the root template body together with the
//! table of partials it references.

use std::collections::BTreeMap;

use crate::types::ast;

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Program {
    pub root: Body,
    /// Every partial referenced by the root or by another partial, keyed by
    /// name. `None` if the provider did not know the partial.
    pub partials: BTreeMap<String, Option<Body>>,
}

/// A parsed template source.
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Body {
    pub source: String,
    pub scope: ast::Scope,
}

impl Program {
    /// Returns the body of the named partial, if it was resolved.
    pub fn partial(&self, name: &str) -> Option<&Body> {
        self.partials.get(name).and_then(Option::as_ref)
    }
}

#[cfg(not(internal_debug))]
impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<compiled>")
    }
}
