//! Compile a template source into a program that can be executed by the
//! renderer.
//!
//! This process has two stages:
//! - The lexer chunks the template source into raw text and tags.
//! - The parser constructs the element tree from the token stream.
//!
//! Afterwards every partial referenced by the template, directly or through
//! another partial, is fetched from the provider and parsed in the same way.

mod lex;
mod parse;

use std::collections::{BTreeMap, BTreeSet};

use crate::partial::PartialProvider;
use crate::types::program::{Body, Program};
use crate::types::syntax::Delimiters;
use crate::{Options, Result};

/// Compile a template into a program.
///
/// The root source starts out with the given delimiters, partials always
/// start out with the delimiters configured in the options.
pub fn template(
    source: String,
    delimiters: &Delimiters,
    options: &Options,
    provider: &dyn PartialProvider,
) -> Result<Program> {
    let (root, mut queue) = body(source, delimiters.clone())?;

    let mut partials = BTreeMap::new();
    while let Some(name) = queue.pop_first() {
        if partials.contains_key(&name) {
            continue;
        }
        let partial = match provider.get(&name) {
            Some(source) => {
                let (body, names) = body(source.into_owned(), options.delimiters.clone())
                    .map_err(|err| err.with_template_name(&name))?;
                queue.extend(names.into_iter().filter(|n| !partials.contains_key(n)));
                Some(body)
            }
            None => {
                tracing::debug!(partial = %name, "partial not found");
                None
            }
        };
        partials.insert(name, partial);
    }

    Ok(Program { root, partials })
}

fn body(source: String, delimiters: Delimiters) -> Result<(Body, BTreeSet<String>)> {
    let parsed = parse::Parser::new(&source, delimiters).parse_template()?;
    let body = Body {
        source,
        scope: parsed.scope,
    };
    Ok((body, parsed.partials))
}
