use crate::types::ast;
use crate::value::ValueCow;
use crate::Value;

use super::value::{lookup, lookup_cow};

/// The context stack used to resolve names during rendering.
///
/// The stack is persistent: entering a section pushes a new frame that
/// borrows its parent, so frames never outlive the values they refer to and
/// popping is simply returning from the render call.
#[cfg_attr(internal_debug, derive(Debug))]
pub enum Stack<'a> {
    /// The values provided by the caller, highest priority first.
    Root(&'a [&'a Value]),

    /// A value pushed by a section.
    Frame {
        value: &'a Value,
        parent: &'a Stack<'a>,
    },
}

impl<'a> Stack<'a> {
    pub fn new(layers: &'a [&'a Value]) -> Self {
        Self::Root(layers)
    }

    /// Returns a new frame with the given value on top of this stack.
    pub fn push<'b>(&'b self, value: &'b Value) -> Stack<'b>
    where
        'a: 'b,
    {
        Stack::Frame {
            value,
            parent: self,
        }
    }

    /// Returns the value on top of the stack, if there is one.
    pub fn top(&self) -> Option<&'a Value> {
        match *self {
            Self::Root(layers) => layers.first().copied(),
            Self::Frame { value, .. } => Some(value),
        }
    }

    /// Resolves a path to a value on the stack.
    ///
    /// The first segment is looked up in each frame from the top of the stack
    /// down, stopping at the first frame that contains it even if the value
    /// found is falsy. Subsequent segments are only looked up in the value
    /// found for the previous segment.
    pub fn resolve(
        &self,
        source: &str,
        path: &ast::Path,
        decapitalize: bool,
    ) -> Option<ValueCow<'a>> {
        match path {
            ast::Path::Implicit => self.top().map(ValueCow::Borrowed),
            ast::Path::Keys(keys) => {
                let (first, rest) = keys.split_first()?;
                let value = self.find(&source[first.span], decapitalize)?;
                rest.iter().try_fold(value, |value, key| {
                    lookup_cow(value, &source[key.span], decapitalize)
                })
            }
        }
    }

    fn find(&self, key: &str, decapitalize: bool) -> Option<ValueCow<'a>> {
        let mut stack = self;
        loop {
            match *stack {
                Self::Root(layers) => {
                    return layers
                        .iter()
                        .find_map(|value| lookup(value, key, decapitalize));
                }
                Self::Frame { value, parent } => {
                    if let Some(found) = lookup(value, key, decapitalize) {
                        return Some(found);
                    }
                    stack = parent;
                }
            }
        }
    }
}
