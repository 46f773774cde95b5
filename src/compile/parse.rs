use std::collections::BTreeSet;

use crate::compile::lex::{Lexer, Tag, TagKind, Token};
use crate::types::ast;
use crate::types::span::Span;
use crate::types::syntax::Delimiters;
use crate::{Error, Result};

/// A parser that constructs an element tree from a token stream.
///
/// The parser is implemented as a simple hand written parser with no
/// recursion, nested sections are tracked using an explicit stack.
pub struct Parser<'source> {
    /// A lexer that tokenizes the template source.
    tokens: Lexer<'source>,

    /// The names of all partials referenced in the template.
    partials: BTreeSet<String>,
}

/// Stores the state of a section during parsing.
struct State {
    /// The section name as a path.
    path: ast::Path,
    /// The span of the section name in the opening tag.
    name: Span,
    /// Whether this is an inverted section.
    inverted: bool,
    /// The span of the opening tag.
    span: Span,
    /// The delimiters in effect right after the opening tag.
    delimiters: Delimiters,
}

/// The result of parsing a template body.
pub struct Parsed {
    pub scope: ast::Scope,
    pub partials: BTreeSet<String>,
}

impl<'source> Parser<'source> {
    /// Construct a new parser.
    pub fn new(source: &'source str, delimiters: Delimiters) -> Self {
        Self {
            tokens: Lexer::new(source, delimiters),
            partials: BTreeSet::new(),
        }
    }

    /// Parses a template.
    ///
    /// This function works using two stacks:
    /// - A stack of sections that are currently open.
    /// - A stack of scopes which collect each parsed element.
    pub fn parse_template(mut self) -> Result<Parsed> {
        let mut blocks: Vec<State> = Vec::new();
        let mut scopes = vec![ast::Scope::new()];

        while let Some(next) = self.tokens.next()? {
            let elem = match next {
                // Simply raw template, emit a single element for it.
                Token::Raw(span) => ast::Element::Text(span),

                Token::Tag(Tag { kind, span, name }) => match kind {
                    TagKind::Escaped | TagKind::Unescaped => ast::Element::Var(ast::Var {
                        path: ast::Path::new(self.source(), name),
                        raw: kind == TagKind::Unescaped,
                        span: name,
                    }),

                    TagKind::Comment => ast::Element::Comment,

                    TagKind::Partial => {
                        let name = self.source()[name].to_owned();
                        self.partials.insert(name.clone());
                        ast::Element::Partial(ast::Partial { name, span })
                    }

                    // The start of a section. For example:
                    //
                    //   {{# items }}
                    //
                    // We must push a block to the block stack and a scope to
                    // the scope stack because a section starts a new scope.
                    TagKind::Section | TagKind::Inverted => {
                        blocks.push(State {
                            path: ast::Path::new(self.source(), name),
                            name,
                            inverted: kind == TagKind::Inverted,
                            span,
                            delimiters: self.tokens.delimiters().clone(),
                        });
                        scopes.push(ast::Scope::new());
                        continue;
                    }

                    // The end of a section. For example:
                    //
                    //   {{/ items }}
                    //
                    // We expect that the innermost open section has the same
                    // name.
                    TagKind::Close => {
                        let open = blocks
                            .pop()
                            .ok_or_else(|| self.err_unexpected_close(name))?;
                        let expected = &self.source()[open.name];
                        let found = &self.source()[name];
                        if expected != found {
                            return Err(Error::syntax(
                                format!(
                                    "mismatched close section, expected `{expected}`, found `{found}`"
                                ),
                                self.source(),
                                name,
                            ));
                        }
                        let scope = scopes.pop().unwrap();
                        ast::Element::Section(ast::Section {
                            path: open.path,
                            inverted: open.inverted,
                            scope,
                            raw: Span::from(open.span.n..span.m),
                            delimiters: open.delimiters,
                        })
                    }

                    TagKind::SetDelimiters => {
                        panic!("lexer bug: received set delimiters tag at {span:?}");
                    }
                },
            };
            scopes.last_mut().unwrap().elements.push(elem);
        }

        if let Some(block) = blocks.last() {
            let msg = format!("unclosed section `{}`", &self.source()[block.name]);
            return Err(Error::syntax(msg, self.source(), block.span));
        }

        assert!(
            scopes.len() == 1,
            "parser bug: we should end with a single scope"
        );

        Ok(Parsed {
            scope: scopes.remove(0),
            partials: self.partials,
        })
    }

    fn source(&self) -> &'source str {
        self.tokens.source
    }

    fn err_unexpected_close(&self, name: Span) -> Error {
        Error::syntax(
            format!("unexpected close section `{}`", &self.source()[name]),
            self.source(),
            name,
        )
    }
}
