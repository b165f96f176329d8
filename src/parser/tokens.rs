//! Lexical atoms: identifiers, keywords, literals, placeholders.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::{preceded, tuple},
    IResult,
};

use crate::ast::{Expr, Literal};

/// Parse an identifier (table or column name), possibly qualified (`t.col`).
pub fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '.'),
    )))(input)
}

/// Match a whole word case-insensitively. `keyword("or")` will not match the
/// prefix of `ORDER`.
pub fn keyword(kw: &'static str) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let (rest, word) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
        if word.eq_ignore_ascii_case(kw) {
            Ok((rest, word))
        } else {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )))
        }
    }
}

/// Parse a named placeholder: `:name`.
pub fn parse_placeholder(input: &str) -> IResult<&str, Expr> {
    map(
        preceded(
            char(':'),
            take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        ),
        |name: &str| Expr::Placeholder(name.to_string()),
    )(input)
}

/// Parse a single-quoted string literal; `''` escapes a quote.
pub fn parse_string(input: &str) -> IResult<&str, Literal> {
    let (mut rest, _) = char('\'')(input)?;
    let mut out = String::new();
    loop {
        match rest.find('\'') {
            None => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    rest,
                    nom::error::ErrorKind::Char,
                )))
            }
            Some(i) => {
                out.push_str(&rest[..i]);
                rest = &rest[i + 1..];
                if let Some(tail) = rest.strip_prefix('\'') {
                    out.push('\'');
                    rest = tail;
                } else {
                    return Ok((rest, Literal::String(out)));
                }
            }
        }
    }
}

/// Parse a numeric literal; floats before integers.
pub fn parse_number(input: &str) -> IResult<&str, Literal> {
    alt((
        map_res(
            recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
            |s: &str| s.parse::<f64>().map(Literal::Float),
        ),
        map_res(recognize(tuple((opt(char('-')), digit1))), |s: &str| {
            s.parse::<i64>().map(Literal::Int)
        }),
    ))(input)
}

/// Parse an atomic operand: placeholder, literal, or column reference.
/// Bare words are classified so that `TRUE`/`FALSE`/`NULL` become literals
/// and everything else a column.
pub fn parse_operand(input: &str) -> IResult<&str, Expr> {
    alt((
        parse_placeholder,
        map(parse_string, Expr::Literal),
        map(parse_number, Expr::Literal),
        parse_word_operand,
    ))(input)
}

fn parse_word_operand(input: &str) -> IResult<&str, Expr> {
    let (rest, word) = parse_identifier(input)?;
    let expr = if word.eq_ignore_ascii_case("true") {
        Expr::Literal(Literal::Bool(true))
    } else if word.eq_ignore_ascii_case("false") {
        Expr::Literal(Literal::Bool(false))
    } else if word.eq_ignore_ascii_case("null") {
        Expr::Literal(Literal::Null)
    } else {
        Expr::Column(word.to_string())
    };
    Ok((rest, expr))
}
