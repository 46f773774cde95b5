use std::fmt::Write;

use crate::compile;
use crate::fmt::Formatter;
use crate::render::stack::Stack;
use crate::types::ast;
use crate::types::program::{Body, Program};
use crate::types::syntax::Delimiters;
use crate::{Error, Result, Template, Value};

#[cfg_attr(internal_debug, derive(Debug))]
pub struct RendererImpl<'render> {
    pub(crate) template: &'render Template,
    pub(crate) allow_missing_variables: bool,
}

impl RendererImpl<'_> {
    pub(crate) fn render(&self, f: &mut Formatter<'_>, stack: &Stack<'_>) -> Result<()> {
        let program = &*self.template.program;
        self.render_body(f, program, &program.root, &program.root.scope, stack, 0)
    }

    fn render_body(
        &self,
        f: &mut Formatter<'_>,
        program: &Program,
        body: &Body,
        scope: &ast::Scope,
        stack: &Stack<'_>,
        depth: usize,
    ) -> Result<()> {
        let options = &*self.template.options;
        let source = body.source.as_str();

        for elem in &scope.elements {
            match elem {
                ast::Element::Text(span) => {
                    // We don't need to enrich this error because it can only
                    // fail because of an IO error.
                    f.write_str(&source[*span])?;
                }

                ast::Element::Comment => {}

                ast::Element::Var(ast::Var { path, raw, span }) => {
                    let value = match stack.resolve(source, path, options.decapitalize) {
                        Some(value) => value,
                        None if self.allow_missing_variables => {
                            tracing::trace!(
                                variable = &source[*span],
                                "missing variable rendered as empty"
                            );
                            continue;
                        }
                        None => return Err(Error::missing_variable(source, *span)),
                    };
                    match &*value {
                        Value::Lambda(lambda) => {
                            let text = lambda.call("");
                            let mut s = String::with_capacity(text.len());
                            self.render_lambda(
                                &mut Formatter::with_string(&mut s),
                                text,
                                &options.delimiters,
                                stack,
                                depth,
                            )?;
                            self.emit(f, &s, *raw)?;
                        }
                        value => {
                            if let Some(text) = value.to_text() {
                                self.emit(f, &text, *raw)?;
                            }
                        }
                    }
                }

                ast::Element::Section(ast::Section {
                    path,
                    inverted,
                    scope,
                    raw,
                    delimiters,
                }) => {
                    let value = stack.resolve(source, path, options.decapitalize);

                    if *inverted {
                        if !value.is_some_and(|v| v.is_truthy()) {
                            self.render_body(f, program, body, scope, stack, depth)?;
                        }
                        continue;
                    }

                    let Some(value) = value else {
                        continue;
                    };
                    match &*value {
                        Value::Lambda(lambda) => {
                            let text = lambda.call(&source[*raw]);
                            self.render_lambda(f, text, delimiters, stack, depth)?;
                        }
                        value if !value.is_truthy() => {}
                        Value::List(list) => {
                            for item in list {
                                let stack = stack.push(item);
                                self.render_body(f, program, body, scope, &stack, depth)?;
                            }
                        }
                        value => {
                            let stack = stack.push(value);
                            self.render_body(f, program, body, scope, &stack, depth)?;
                        }
                    }
                }

                ast::Element::Partial(ast::Partial { name, span }) => {
                    if let Some(partial) = program.partial(name) {
                        let depth = self
                            .nested(depth)
                            .map_err(|err| err.with_span(source, *span))?;
                        self.render_body(f, program, partial, &partial.scope, stack, depth)
                            .map_err(|err| err.with_template_name(name))?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Compiles the text returned by a lambda and renders it in place using
    /// the current stack.
    fn render_lambda(
        &self,
        f: &mut Formatter<'_>,
        text: String,
        delimiters: &Delimiters,
        stack: &Stack<'_>,
        depth: usize,
    ) -> Result<()> {
        let depth = self.nested(depth)?;
        let program = compile::template(
            text,
            delimiters,
            &self.template.options,
            &*self.template.partials,
        )?;
        self.render_body(f, &program, &program.root, &program.root.scope, stack, depth)
    }

    fn emit(&self, f: &mut Formatter<'_>, text: &str, raw: bool) -> Result<()> {
        if raw {
            f.write_str(text)?;
        } else {
            (self.template.options.escape)(f, text)?;
        }
        Ok(())
    }

    fn nested(&self, depth: usize) -> Result<usize> {
        let max = self.template.options.max_partial_depth;
        if depth >= max {
            return Err(Error::max_partial_depth(max));
        }
        Ok(depth + 1)
    }
}
