//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse template source into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input)
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    };

    let string_literal = select! {
        Token::String(s) => s,
    };

    let text = select! {
        Token::Text(s) => Node::Text(s),
    };

    // {{ a.b.c }}
    let variable = identifier
        .clone()
        .separated_by(just(Token::Dot))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|segments| Node::Variable(VariablePath(segments)))
        .delimited_by(just(Token::ExprOpen), just(Token::ExprClose));

    let extends = just(Token::Extends)
        .ignore_then(string_literal)
        .map(Node::Extends);

    let block_start = just(Token::Block)
        .ignore_then(identifier.clone())
        .map(Node::BlockStart);

    let block_end = just(Token::EndBlock)
        .ignore_then(identifier.or_not())
        .map(Node::BlockEnd);

    let tag = choice((extends, block_start, block_end))
        .delimited_by(just(Token::TagOpen), just(Token::TagClose));

    let node = choice((text, variable, tag))
        .map_with(|n, e| Spanned::new(n, span_range(&e.span())));

    node.repeated()
        .collect()
        .then_ignore(end())
        .map(|nodes| Document { nodes })
}
