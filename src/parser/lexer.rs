//! Lexer for templates using logos
//!
//! Lexing happens at two levels. The outer level splits the source into
//! literal text, `{% tag %}`, `{{ expression }}` and `{# comment #}`
//! segments. The inside of tags and expressions is then lexed into keywords,
//! identifiers and strings.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Tokens handed to the parser
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal template text
    Text(String),
    /// `{%`
    TagOpen,
    /// `%}`
    TagClose,
    /// `{{`
    ExprOpen,
    /// `}}`
    ExprClose,

    // Tag keywords
    Extends,
    Block,
    EndBlock,

    Ident(String),
    String(String),
    Dot,

    /// Anything inside a tag the lexer does not recognize
    Invalid(String),
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum Segment {
    // Quoted strings may contain `%}`
    #[regex(r#"\{%([^%"']|%+[^%}"']|%*"([^"\\]|\\.)*"|%*'([^'\\]|\\.)*')*%+\}"#)]
    Tag,

    #[regex(r"\{\{([^}]|\}[^}])*\}\}")]
    Expr,

    #[regex(r"\{#([^#]|#[^}])*#\}")]
    Comment,

    #[regex(r"[^{]+")]
    Text,

    // A lone brace that does not start a tag is plain text
    #[token("{")]
    Brace,

    // Opening delimiter with no matching close anywhere after it
    #[token("{%")]
    #[token("{{")]
    #[token("{#")]
    Unclosed,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum TagToken {
    #[token("extends")]
    Extends,
    #[token("block")]
    Block,
    #[token("endblock")]
    EndBlock,
    #[token(".")]
    Dot,

    // Identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_\-]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unquote(lex.slice()))]
    String(String),
}

/// Strip the quotes from a string literal and decode `\x` escapes to `x`
fn unquote(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal[1..literal.len() - 1].chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

impl From<TagToken> for Token {
    fn from(tok: TagToken) -> Self {
        match tok {
            TagToken::Extends => Token::Extends,
            TagToken::Block => Token::Block,
            TagToken::EndBlock => Token::EndBlock,
            TagToken::Dot => Token::Dot,
            TagToken::Ident(s) => Token::Ident(s),
            TagToken::String(s) => Token::String(s),
        }
    }
}

/// Collects tokens, merging adjacent pieces of literal text
#[derive(Default)]
struct TokenSink {
    tokens: Vec<(Token, Span)>,
    text: Option<(String, Span)>,
}

impl TokenSink {
    fn text(&mut self, slice: &str, span: Span) {
        match &mut self.text {
            Some((text, pending)) => {
                text.push_str(slice);
                pending.end = span.end;
            }
            None => self.text = Some((slice.to_string(), span)),
        }
    }

    fn flush(&mut self) {
        if let Some((text, span)) = self.text.take() {
            self.tokens.push((Token::Text(text), span));
        }
    }

    fn push(&mut self, tok: Token, span: Span) {
        self.flush();
        self.tokens.push((tok, span));
    }

    /// Lex the inside of a tag or expression whose body starts at `offset`
    fn inner(&mut self, body: &str, offset: usize) {
        let mut lexer = TagToken::lexer(body);
        while let Some(tok) = lexer.next() {
            let span = lexer.span();
            let span = span.start + offset..span.end + offset;
            match tok {
                Ok(tok) => self.push(tok.into(), span),
                Err(()) => self.push(Token::Invalid(lexer.slice().to_string()), span),
            }
        }
    }

    fn delimited(&mut self, slice: &str, span: Span, open: Token, close: Token) {
        self.push(open, span.start..span.start + 2);
        self.inner(&slice[2..slice.len() - 2], span.start + 2);
        self.push(close, span.end - 2..span.end);
    }

    /// Everything from an unclosed delimiter to the end of input is invalid
    fn unclosed(&mut self, input: &str, start: usize) {
        let rest = start..input.len();
        self.push(Token::Invalid(input[rest.clone()].to_string()), rest);
    }

    fn finish(mut self) -> Vec<(Token, Span)> {
        self.flush();
        self.tokens
    }
}

fn is_opening(slice: &str) -> bool {
    ["{%", "{{", "{#"].iter().any(|open| slice.starts_with(open))
}

/// Lex template source into tokens with spans
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut sink = TokenSink::default();
    let mut lexer = Segment::lexer(input);

    while let Some(segment) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        match segment {
            Ok(Segment::Tag) => sink.delimited(slice, span, Token::TagOpen, Token::TagClose),
            Ok(Segment::Expr) => sink.delimited(slice, span, Token::ExprOpen, Token::ExprClose),
            Ok(Segment::Comment) => sink.flush(),
            Ok(Segment::Unclosed) => {
                sink.unclosed(input, span.start);
                break;
            }
            Err(()) if is_opening(slice) => {
                sink.unclosed(input, span.start);
                break;
            }
            Ok(Segment::Text) | Ok(Segment::Brace) | Err(()) => sink.text(slice, span),
        }
    }

    sink.finish()
}
