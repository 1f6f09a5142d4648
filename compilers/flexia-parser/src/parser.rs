use flexia_protocol::AttributeSet;
use nom::{
    bytes::complete::{take_till, take_till1, take_while},
    character::complete::char,
    combinator::{all_consuming, opt},
    sequence::{delimited, pair},
    IResult,
};

use crate::token::{AnnotatedToken, Span};

fn is_brace(c: char) -> bool {
    c == '{' || c == '}'
}

/// `{body}` with no nested braces.
fn specifier(input: &str) -> IResult<&str, &str> {
    delimited(char('{'), take_till(is_brace), char('}'))(input)
}

/// `word` or `word{body}`, where the specifier has to close the token.
fn annotated_word(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    all_consuming(pair(take_till1(is_brace), opt(specifier)))(input)
}

/// Splits one whitespace-free token into its word and requested attributes.
///
/// Anything that does not fit the `word{attrs}` shape is kept whole as a bare
/// word, and a specifier without attributes counts as no specifier.
pub fn parse_token(span: Span, text: &str) -> AnnotatedToken<'_> {
    let (word, body) = match annotated_word(text) {
        Ok((_, parsed)) => parsed,
        Err(_) => (text, None),
    };

    let request = body
        .map(AttributeSet::parse)
        .filter(|attrs| !attrs.is_empty());

    AnnotatedToken {
        span,
        text,
        word,
        request,
    }
}

pub fn tokenize_with_spans(original_input: &str) -> Vec<AnnotatedToken<'_>> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace (any Unicode whitespace, not just ASCII)
        let skipped: IResult<&str, &str> = take_while(|c: char| c.is_whitespace())(input);
        input = match skipped {
            Ok((next_input, _)) => next_input,
            Err(_) => break,
        };

        if input.is_empty() {
            break;
        }

        // 2. Everything up to the next whitespace is one raw token
        let raw: IResult<&str, &str> = take_till1(|c: char| c.is_whitespace())(input);
        match raw {
            Ok((next_input, text)) => {
                let start = original_input.len() - input.len();
                result.push(parse_token(Span::new(start, start + text.len()), text));
                input = next_input;
            }
            Err(_) => break,
        }
    }

    result
}
