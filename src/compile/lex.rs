use crate::types::span::Span;
use crate::types::syntax::Delimiters;
use crate::{Error, Result};

/// A lexer that splits the template source into raw text and tags so that
/// the parser doesn't have to operate on raw text.
///
/// The lexer is implemented as a fallible iterator. The parser should
/// repeatedly call the [`.next()?`][Lexer::next] method to return the next
/// token until [`None`] is returned.
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Lexer<'source> {
    /// The original template source.
    pub source: &'source str,

    /// A cursor over the template source.
    cursor: usize,

    /// The delimiters currently in effect.
    delimiters: Delimiters,

    /// A buffer to store the next token.
    next: Option<Token>,
}

/// The unit yielded by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Raw template.
    Raw(Span),
    /// A tag, e.g. `{{# name }}`.
    Tag(Tag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    /// The span of the whole tag including delimiters.
    pub span: Span,
    /// The span of the trimmed tag content.
    pub name: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `{{ name }}`
    Escaped,
    /// `{{{ name }}}` or `{{& name }}`
    Unescaped,
    /// `{{# name }}`
    Section,
    /// `{{^ name }}`
    Inverted,
    /// `{{/ name }}`
    Close,
    /// `{{> name }}`
    Partial,
    /// `{{! comment }}`
    Comment,
    /// `{{=<% %>=}}`
    SetDelimiters,
}

impl<'source> Lexer<'source> {
    /// Construct a new lexer.
    pub fn new(source: &'source str, delimiters: Delimiters) -> Self {
        Self {
            source,
            cursor: 0,
            delimiters,
            next: None,
        }
    }

    /// Returns the delimiters in effect at the current position.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Returns the next token, skipping set delimiter tags which are handled
    /// by the lexer itself.
    pub fn next(&mut self) -> Result<Option<Token>> {
        loop {
            match self.lex()? {
                Some(Token::Tag(Tag {
                    kind: TagKind::SetDelimiters,
                    ..
                })) => continue,
                tk => return Ok(tk),
            }
        }
    }

    fn lex(&mut self) -> Result<Option<Token>> {
        if let Some(next) = self.next.take() {
            return Ok(Some(next));
        }

        // We are within raw template, that means all we have to do is find
        // the next open delimiter from `i`. The following diagram helps
        // describe the variable naming.
        //
        // xxxxxxx{{xxxxx}}xxxx
        //    ^   ^       ^
        //    i   j       k

        let i = self.cursor;
        if self.source[i..].is_empty() {
            return Ok(None);
        }

        let j = match self.source[i..].find(self.delimiters.open()) {
            Some(d) => i + d,
            None => {
                self.cursor = self.source.len();
                return Ok(Some(Token::Raw(Span::from(i..self.source.len()))));
            }
        };

        let tag = self.lex_tag(j)?;
        let k = tag.span.n;

        let mut raw_end = j;
        if tag.kind.may_be_standalone() {
            if let Some((line_start, line_end)) = self.standalone(i, j, k) {
                raw_end = line_start;
                self.cursor = line_end;
            }
        }

        if i == raw_end {
            Ok(Some(Token::Tag(tag)))
        } else {
            // We must first emit the raw token, so we store the tag in the
            // `next` buffer.
            self.next = Some(Token::Tag(tag));
            Ok(Some(Token::Raw(Span::from(i..raw_end))))
        }
    }

    /// Lexes the tag starting at `j` and moves the cursor past it.
    fn lex_tag(&mut self, j: usize) -> Result<Tag> {
        let begin = j + self.delimiters.open().len();

        let (kind, suffix) = match self.source[begin..].chars().next() {
            Some('{') => (TagKind::Unescaped, "}"),
            Some('&') => (TagKind::Unescaped, ""),
            Some('#') => (TagKind::Section, ""),
            Some('^') => (TagKind::Inverted, ""),
            Some('/') => (TagKind::Close, ""),
            Some('>') => (TagKind::Partial, ""),
            Some('!') => (TagKind::Comment, ""),
            Some('=') => (TagKind::SetDelimiters, "="),
            _ => (TagKind::Escaped, ""),
        };
        let m = match kind {
            TagKind::Escaped => begin,
            _ => begin + 1,
        };

        let end = format!("{suffix}{}", self.delimiters.close());
        let n = match self.source[m..].find(&end) {
            Some(d) => m + d,
            None => return Err(self.err_unclosed_tag(j..begin, &end)),
        };
        let k = n + end.len();
        let span = Span::from(j..k);
        let name = trim(self.source, Span::from(m..n));
        self.cursor = k;

        match kind {
            TagKind::Comment => {}
            TagKind::SetDelimiters => {
                self.delimiters = Delimiters::parse(&self.source[name])
                    .ok_or_else(|| self.err_invalid_delimiters(span))?;
            }
            _ if name.is_empty() => return Err(self.err_empty_tag(span)),
            _ => {}
        }

        Ok(Tag { kind, span, name })
    }

    /// Checks whether the tag from `j` to `k` is the only thing on its line
    /// apart from whitespace. If it is then returns the start of the line and
    /// the position after the line ending.
    fn standalone(&self, i: usize, j: usize, k: usize) -> Option<(usize, usize)> {
        let line_start = self.source[..j].rfind('\n').map_or(0, |n| n + 1);
        if line_start < i || !self.source[line_start..j].chars().all(is_whitespace) {
            return None;
        }

        let rest = &self.source[k..];
        let after = rest.trim_start_matches(is_whitespace);
        let ws = k + rest.len() - after.len();
        if after.is_empty() {
            Some((line_start, ws))
        } else if after.starts_with("\r\n") {
            Some((line_start, ws + 2))
        } else if after.starts_with('\n') {
            Some((line_start, ws + 1))
        } else {
            None
        }
    }

    fn err_unclosed_tag(&self, span: impl Into<Span>, end: &str) -> Error {
        Error::syntax(format!("unclosed tag, expected `{end}`"), self.source, span)
    }

    fn err_invalid_delimiters(&self, span: Span) -> Error {
        Error::syntax(
            "invalid set delimiters tag, expected two delimiters separated by whitespace",
            self.source,
            span,
        )
    }

    fn err_empty_tag(&self, span: Span) -> Error {
        Error::syntax("expected a name", self.source, span)
    }
}

impl TagKind {
    /// Variable tags are never standalone, all others may be.
    fn may_be_standalone(&self) -> bool {
        !matches!(self, Self::Escaped | Self::Unescaped)
    }
}

fn trim(source: &str, span: Span) -> Span {
    let s = &source[span];
    let m = span.m + (s.len() - s.trim_start().len());
    let n = span.n - (s.len() - s.trim_end().len());
    Span::from(m..n.max(m))
}

fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Tk<'a> {
        Raw(&'a str),
        Tag(TagKind, &'a str),
    }

    #[test]
    fn lex_empty() {
        let tokens = lex("").unwrap();
        assert_eq!(tokens, []);
    }

    #[test]
    fn lex_raw() {
        let tokens = lex("lorem ipsum").unwrap();
        assert_eq!(tokens, [Tk::Raw("lorem ipsum")]);
    }

    #[test]
    fn lex_variables() {
        let tokens = lex("lorem {{ ipsum }} {{{dolor}}} {{& sit.amet }}").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Raw("lorem "),
                Tk::Tag(TagKind::Escaped, "ipsum"),
                Tk::Raw(" "),
                Tk::Tag(TagKind::Unescaped, "dolor"),
                Tk::Raw(" "),
                Tk::Tag(TagKind::Unescaped, "sit.amet"),
            ]
        );
    }

    #[test]
    fn lex_sigils() {
        let tokens = lex("{{#a}}{{^b}}{{/c}}{{>d}}{{!e}}").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Tag(TagKind::Section, "a"),
                Tk::Tag(TagKind::Inverted, "b"),
                Tk::Tag(TagKind::Close, "c"),
                Tk::Tag(TagKind::Partial, "d"),
                Tk::Tag(TagKind::Comment, "e"),
            ]
        );
    }

    #[test]
    fn lex_comment_may_contain_anything() {
        let tokens = lex("a{{! {{ # / \n }}b").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Raw("a"),
                Tk::Tag(TagKind::Comment, "{{ # /"),
                Tk::Raw("b")
            ]
        );
    }

    #[test]
    fn lex_set_delimiters() {
        let tokens = lex("{{ a }}{{=<% %>=}}<% b %>{{ c }}<%={{ }}=%>{{ d }}").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Tag(TagKind::Escaped, "a"),
                Tk::Tag(TagKind::SetDelimiters, "<% %>"),
                Tk::Tag(TagKind::Escaped, "b"),
                Tk::Raw("{{ c }}"),
                Tk::Tag(TagKind::SetDelimiters, "{{ }}"),
                Tk::Tag(TagKind::Escaped, "d"),
            ]
        );
    }

    #[test]
    fn lex_triple_mustache_with_custom_delimiters() {
        let tokens = lex("{{=| |=}}|{ a }|").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Tag(TagKind::SetDelimiters, "| |"),
                Tk::Tag(TagKind::Unescaped, "a"),
            ]
        );
    }

    #[test]
    fn lex_standalone_section() {
        let tokens = lex("begin\n  {{# a }}  \n  x\n\t{{/ a }}\nend").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Raw("begin\n"),
                Tk::Tag(TagKind::Section, "a"),
                Tk::Raw("  x\n"),
                Tk::Tag(TagKind::Close, "a"),
                Tk::Raw("end"),
            ]
        );
    }

    #[test]
    fn lex_standalone_crlf_and_eof() {
        let tokens = lex("a\r\n{{! c }}\r\nb\n  {{> p }}").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Raw("a\r\n"),
                Tk::Tag(TagKind::Comment, "c"),
                Tk::Raw("b\n"),
                Tk::Tag(TagKind::Partial, "p"),
            ]
        );
    }

    #[test]
    fn lex_not_standalone() {
        let tokens = lex("x {{# a }}\n{{ b }} {{/ a }}\n").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Raw("x "),
                Tk::Tag(TagKind::Section, "a"),
                Tk::Raw("\n"),
                Tk::Tag(TagKind::Escaped, "b"),
                Tk::Raw(" "),
                Tk::Tag(TagKind::Close, "a"),
                Tk::Raw("\n"),
            ]
        );
    }

    #[test]
    fn lex_variable_never_standalone() {
        let tokens = lex("  {{ a }}\n").unwrap();
        assert_eq!(
            tokens,
            [
                Tk::Raw("  "),
                Tk::Tag(TagKind::Escaped, "a"),
                Tk::Raw("\n"),
            ]
        );
    }

    #[test]
    fn lex_err_unclosed_tag() {
        let err = lex("lorem {{ ipsum").unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "
   |
 1 | lorem {{ ipsum
   |       ^^ unclosed tag, expected `}}`
"
        );
    }

    #[test]
    fn lex_err_unclosed_triple_mustache() {
        let err = lex("{{{ ipsum }}").unwrap_err();
        assert_eq!(err.message(), "unclosed tag, expected `}}}`");
    }

    #[test]
    fn lex_err_invalid_delimiters() {
        for source in ["{{=<%=}}", "{{=<% %> x=}}", "{{= =}}"] {
            let err = lex(source).unwrap_err();
            assert!(err.message().starts_with("invalid set delimiters tag"));
        }
    }

    #[test]
    fn lex_err_empty_tag() {
        let err = lex("{{ }}").unwrap_err();
        assert_eq!(err.message(), "expected a name");
    }

    #[track_caller]
    fn lex(source: &str) -> Result<Vec<Tk<'_>>> {
        let mut lexer = Lexer::new(source, Delimiters::default());
        let mut tokens = Vec::new();
        while let Some(tk) = lexer.lex()? {
            tokens.push(match tk {
                Token::Raw(span) => Tk::Raw(&source[span]),
                Token::Tag(tag) => Tk::Tag(tag.kind, &source[tag.name]),
            });
        }
        for _ in 0..3 {
            assert!(lexer.lex().unwrap().is_none());
        }
        Ok(tokens)
    }
}
