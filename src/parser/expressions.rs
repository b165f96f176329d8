//! Boolean filter expression grammar.
//!
//! Precedence, loosest first: OR, AND, predicate. BETWEEN's inner `AND` is
//! consumed inside the predicate, so it never folds into the boolean chain.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, multispace1},
    combinator::map,
    multi::separated_list1,
    sequence::{delimited, tuple},
    IResult,
};

use super::tokens::{keyword, parse_operand};
use crate::ast::{CompareOp, Expr};

/// Parse a complete filter expression.
pub fn parse_expr(input: &str) -> IResult<&str, Expr> {
    parse_or(input)
}

fn parse_or(input: &str) -> IResult<&str, Expr> {
    let (mut input, mut expr) = parse_and(input)?;
    loop {
        let sep: IResult<&str, _> = tuple((multispace1, keyword("or"), multispace1))(input);
        match sep {
            Ok((rest, _)) => {
                let (rest, rhs) = parse_and(rest)?;
                expr = Expr::or(expr, rhs);
                input = rest;
            }
            Err(_) => break,
        }
    }
    Ok((input, expr))
}

fn parse_and(input: &str) -> IResult<&str, Expr> {
    let (mut input, mut expr) = parse_predicate(input)?;
    loop {
        let sep: IResult<&str, _> = tuple((multispace1, keyword("and"), multispace1))(input);
        match sep {
            Ok((rest, _)) => {
                let (rest, rhs) = parse_predicate(rest)?;
                expr = Expr::and(expr, rhs);
                input = rest;
            }
            Err(_) => break,
        }
    }
    Ok((input, expr))
}

fn parse_predicate(input: &str) -> IResult<&str, Expr> {
    alt((parse_group, parse_condition))(input)
}

fn parse_group(input: &str) -> IResult<&str, Expr> {
    delimited(
        tuple((char('('), multispace0)),
        parse_expr,
        tuple((multispace0, char(')'))),
    )(input)
}

fn parse_condition(input: &str) -> IResult<&str, Expr> {
    let (input, subject) = parse_operand(input)?;

    let between: IResult<&str, _> = tuple((multispace1, keyword("between"), multispace1))(input);
    if let Ok((rest, _)) = between {
        let (rest, start) = parse_operand(rest)?;
        let (rest, _) = tuple((multispace1, keyword("and"), multispace1))(rest)?;
        let (rest, end) = parse_operand(rest)?;
        return Ok((
            rest,
            Expr::Between {
                subject: Box::new(subject),
                start: Box::new(start),
                end: Box::new(end),
            },
        ));
    }

    let in_list: IResult<&str, _> =
        tuple((multispace1, keyword("in"), multispace0, char('('), multispace0))(input);
    if let Ok((rest, _)) = in_list {
        let (rest, list) = separated_list1(
            tuple((multispace0, char(','), multispace0)),
            parse_operand,
        )(rest)?;
        let (rest, _) = tuple((multispace0, char(')')))(rest)?;
        return Ok((
            rest,
            Expr::In {
                subject: Box::new(subject),
                list,
            },
        ));
    }

    let like: IResult<&str, _> = tuple((multispace1, keyword("like"), multispace1))(input);
    if let Ok((rest, _)) = like {
        let (rest, pattern) = parse_operand(rest)?;
        return Ok((
            rest,
            Expr::Like {
                left: Box::new(subject),
                right: Box::new(pattern),
            },
        ));
    }

    let (input, _) = multispace0(input)?;
    let (input, op) = parse_compare_op(input)?;
    let (input, _) = multispace0(input)?;
    let (input, right) = parse_operand(input)?;
    Ok((input, Expr::comparison(op, subject, right)))
}

fn parse_compare_op(input: &str) -> IResult<&str, CompareOp> {
    alt((
        map(tag(">="), |_| CompareOp::Gte),
        map(tag("<="), |_| CompareOp::Lte),
        map(tag("="), |_| CompareOp::Eq),
        map(tag(">"), |_| CompareOp::Gt),
        map(tag("<"), |_| CompareOp::Lt),
    ))(input)
}
