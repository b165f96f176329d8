//! Statement grammars: single-table SELECT / INSERT / UPDATE / DELETE.

use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::map,
    multi::{many0, separated_list1},
    sequence::tuple,
    IResult,
};

use super::expressions::parse_expr;
use super::tokens::{keyword, parse_identifier, parse_operand};
use crate::ast::{
    Assignment, Delete, Expr, Insert, InsertSource, Join, JoinKind, OrderBy, Select, SortOrder,
    Statement, Update,
};

pub fn parse_statement(input: &str) -> IResult<&str, Statement> {
    alt((
        map(parse_select, Statement::Select),
        map(parse_insert, Statement::Insert),
        map(parse_update, Statement::Update),
        map(parse_delete, Statement::Delete),
    ))(input)
}

fn comma(input: &str) -> IResult<&str, ()> {
    map(tuple((multispace0, char(','), multispace0)), |_| ())(input)
}

pub fn parse_select(input: &str) -> IResult<&str, Select> {
    let (input, _) = keyword("select")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, columns) = parse_projection(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = keyword("from")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, joins) = many0(parse_join)(input)?;
    let (input, filter) = parse_where(input)?;
    let (input, order_by) = parse_order_by(input)?;

    Ok((
        input,
        Select {
            table: table.to_string(),
            columns,
            joins,
            filter,
            order_by,
        },
    ))
}

fn parse_projection(input: &str) -> IResult<&str, Vec<String>> {
    alt((
        map(char('*'), |_| vec!["*".to_string()]),
        map(separated_list1(comma, parse_identifier), |cols| {
            cols.into_iter().map(String::from).collect()
        }),
    ))(input)
}

fn parse_join(input: &str) -> IResult<&str, Join> {
    let (input, _) = multispace1(input)?;
    let (input, kind) = alt((
        map(tuple((keyword("inner"), multispace1, keyword("join"))), |_| {
            JoinKind::Inner
        }),
        map(tuple((keyword("left"), multispace1, keyword("join"))), |_| {
            JoinKind::Left
        }),
        map(tuple((keyword("right"), multispace1, keyword("join"))), |_| {
            JoinKind::Right
        }),
        map(keyword("join"), |_| JoinKind::Inner),
    ))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = keyword("on")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, on) = parse_expr(input)?;

    Ok((
        input,
        Join {
            kind,
            table: table.to_string(),
            on,
        },
    ))
}

fn parse_where(input: &str) -> IResult<&str, Option<Expr>> {
    let prefix: IResult<&str, _> = tuple((multispace1, keyword("where"), multispace1))(input);
    match prefix {
        Ok((rest, _)) => {
            let (rest, expr) = parse_expr(rest)?;
            Ok((rest, Some(expr)))
        }
        Err(_) => Ok((input, None)),
    }
}

fn parse_order_by(input: &str) -> IResult<&str, Vec<OrderBy>> {
    let prefix: IResult<&str, _> = tuple((
        multispace1,
        keyword("order"),
        multispace1,
        keyword("by"),
        multispace1,
    ))(input);
    match prefix {
        Ok((rest, _)) => separated_list1(comma, parse_order_item)(rest),
        Err(_) => Ok((input, Vec::new())),
    }
}

fn parse_order_item(input: &str) -> IResult<&str, OrderBy> {
    let (input, column) = parse_identifier(input)?;
    let direction: IResult<&str, _> = tuple((
        multispace1,
        alt((
            map(keyword("asc"), |_| SortOrder::Asc),
            map(keyword("desc"), |_| SortOrder::Desc),
        )),
    ))(input);
    match direction {
        Ok((rest, (_, order))) => Ok((
            rest,
            OrderBy {
                column: column.to_string(),
                order,
            },
        )),
        Err(_) => Ok((
            input,
            OrderBy {
                column: column.to_string(),
                order: SortOrder::Asc,
            },
        )),
    }
}

pub fn parse_insert(input: &str) -> IResult<&str, Insert> {
    let (input, _) = keyword("insert")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = keyword("into")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = tuple((multispace0, char('('), multispace0))(input)?;
    let (input, columns) = separated_list1(comma, parse_identifier)(input)?;
    let (input, _) = tuple((multispace0, char(')'), multispace1))(input)?;
    let (input, source) = parse_insert_source(input)?;

    Ok((
        input,
        Insert {
            table: table.to_string(),
            columns: columns.into_iter().map(String::from).collect(),
            source,
        },
    ))
}

fn parse_insert_source(input: &str) -> IResult<&str, InsertSource> {
    alt((
        map(parse_values_tuple, InsertSource::Values),
        map(parse_select, |s| InsertSource::Select(Box::new(s))),
    ))(input)
}

fn parse_values_tuple(input: &str) -> IResult<&str, Vec<Expr>> {
    let (input, _) = keyword("values")(input)?;
    let (input, _) = tuple((multispace0, char('('), multispace0))(input)?;
    let (input, values) = separated_list1(comma, parse_operand)(input)?;
    let (input, _) = tuple((multispace0, char(')')))(input)?;
    Ok((input, values))
}

pub fn parse_update(input: &str) -> IResult<&str, Update> {
    let (input, _) = keyword("update")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = keyword("set")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, assignments) = separated_list1(comma, parse_assignment)(input)?;
    let (input, filter) = parse_where(input)?;

    Ok((
        input,
        Update {
            table: table.to_string(),
            assignments,
            filter,
        },
    ))
}

fn parse_assignment(input: &str) -> IResult<&str, Assignment> {
    let (input, column) = parse_identifier(input)?;
    let (input, _) = tuple((multispace0, char('='), multispace0))(input)?;
    let (input, value) = parse_operand(input)?;

    Ok((
        input,
        Assignment {
            column: column.to_string(),
            value,
        },
    ))
}

pub fn parse_delete(input: &str) -> IResult<&str, Delete> {
    let (input, _) = keyword("delete")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = keyword("from")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, filter) = parse_where(input)?;

    Ok((
        input,
        Delete {
            table: table.to_string(),
            filter,
        },
    ))
}
