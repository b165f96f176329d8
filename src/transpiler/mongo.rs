//! Document-store translation.
//!
//! Renders a rewritten statement as a mongo-shell call string
//! (`db.users.find({...}, {...})` and friends). This path only ever sees
//! fully rewritten statements; an unresolved placeholder or a construct the
//! document model cannot express fails with a `Translation` error.

use crate::ast::{
    CompareOp, Expr, Insert, InsertSource, Literal, Select, SortOrder, Statement, Update,
};
use crate::error::{DynqError, DynqResult};

pub trait ToMongo {
    fn to_mongo(&self) -> DynqResult<String>;
}

impl ToMongo for Statement {
    fn to_mongo(&self) -> DynqResult<String> {
        match self {
            Statement::Select(s) => build_find(s),
            Statement::Update(u) => build_update(u),
            Statement::Insert(i) => build_insert(i),
            Statement::Delete(d) => {
                let query = filter_or_empty(&d.filter)?;
                Ok(format!("db.{}.deleteMany({})", d.table, query))
            }
        }
    }
}

fn build_find(select: &Select) -> DynqResult<String> {
    if !select.joins.is_empty() {
        return Err(DynqError::Translation(
            "JOIN is not supported for the document-store backend".to_string(),
        ));
    }

    let query = filter_or_empty(&select.filter)?;
    let projection = build_projection(select);
    let mut mongo = format!("db.{}.find({}, {})", select.table, query, projection);

    if !select.order_by.is_empty() {
        let fields: Vec<String> = select
            .order_by
            .iter()
            .map(|item| {
                let direction = match item.order {
                    SortOrder::Asc => 1,
                    SortOrder::Desc => -1,
                };
                format!("\"{}\": {}", item.column, direction)
            })
            .collect();
        mongo.push_str(&format!(".sort({{ {} }})", fields.join(", ")));
    }

    Ok(mongo)
}

fn build_projection(select: &Select) -> String {
    if select.columns.is_empty() || select.columns.iter().any(|c| c == "*") {
        return "{}".to_string();
    }
    let fields: Vec<String> = select
        .columns
        .iter()
        .map(|c| format!("\"{}\": 1", c))
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

fn build_update(update: &Update) -> DynqResult<String> {
    let query = filter_or_empty(&update.filter)?;
    let mut sets = Vec::with_capacity(update.assignments.len());
    for assignment in &update.assignments {
        sets.push(format!(
            "\"{}\": {}",
            assignment.column,
            literal_json_expr(&assignment.value)?
        ));
    }
    Ok(format!(
        "db.{}.updateMany({}, {{ \"$set\": {{ {} }} }})",
        update.table,
        query,
        sets.join(", ")
    ))
}

fn build_insert(insert: &Insert) -> DynqResult<String> {
    match &insert.source {
        InsertSource::Values(values) => {
            let mut fields = Vec::with_capacity(values.len());
            for (column, value) in insert.columns.iter().zip(values) {
                fields.push(format!("\"{}\": {}", column, literal_json_expr(value)?));
            }
            Ok(format!(
                "db.{}.insertOne({{ {} }})",
                insert.table,
                fields.join(", ")
            ))
        }
        InsertSource::Select(_) => Err(DynqError::Translation(
            "INSERT ... SELECT is not supported for the document-store backend".to_string(),
        )),
    }
}

fn filter_or_empty(filter: &Option<Expr>) -> DynqResult<String> {
    match filter {
        Some(expr) => filter_doc(expr),
        None => Ok("{}".to_string()),
    }
}

fn filter_doc(expr: &Expr) -> DynqResult<String> {
    match expr {
        Expr::And(left, right) => Ok(format!(
            "{{ \"$and\": [{}, {}] }}",
            filter_doc(left)?,
            filter_doc(right)?
        )),
        Expr::Or(left, right) => Ok(format!(
            "{{ \"$or\": [{}, {}] }}",
            filter_doc(left)?,
            filter_doc(right)?
        )),
        Expr::Comparison { op, left, right } => comparison_doc(*op, left, right),
        Expr::Like { left, right } => {
            let field = column_name(left)?;
            let pattern = match right.as_ref() {
                Expr::Literal(Literal::String(s)) => like_to_regex(s),
                other => {
                    return Err(DynqError::Translation(format!(
                        "LIKE pattern must be a string literal, got '{}'",
                        super::sql::expr_sql(other)
                    )))
                }
            };
            Ok(format!(
                "{{ \"{}\": {{ \"$regex\": {} }} }}",
                field,
                json_string(&pattern)
            ))
        }
        Expr::Between {
            subject,
            start,
            end,
        } => {
            let field = column_name(subject)?;
            Ok(format!(
                "{{ \"{}\": {{ \"$gte\": {}, \"$lte\": {} }} }}",
                field,
                literal_json_expr(start)?,
                literal_json_expr(end)?
            ))
        }
        Expr::In { subject, list } => {
            let field = column_name(subject)?;
            let mut elements = Vec::with_capacity(list.len());
            for element in list {
                elements.push(literal_json_expr(element)?);
            }
            Ok(format!(
                "{{ \"{}\": {{ \"$in\": [{}] }} }}",
                field,
                elements.join(", ")
            ))
        }
        Expr::Placeholder(name) => Err(DynqError::Translation(format!(
            "unresolved placeholder ':{}' reached the document-store translator",
            name
        ))),
        Expr::Literal(_) | Expr::Column(_) => Err(DynqError::Translation(format!(
            "bare expression '{}' is not a document filter",
            super::sql::expr_sql(expr)
        ))),
    }
}

fn comparison_doc(op: CompareOp, left: &Expr, right: &Expr) -> DynqResult<String> {
    let (field, literal, op) = match (left, right) {
        (Expr::Column(c), Expr::Literal(l)) => (c, l, op),
        // literal-on-the-left compares flip around the mirrored operator
        (Expr::Literal(l), Expr::Column(c)) => (c, l, op.mirrored()),
        (Expr::Placeholder(name), _) | (_, Expr::Placeholder(name)) => {
            return Err(DynqError::Translation(format!(
                "unresolved placeholder ':{}' reached the document-store translator",
                name
            )))
        }
        _ => {
            return Err(DynqError::Translation(
                "comparison must pair a column with a value".to_string(),
            ))
        }
    };
    let value = literal_json(literal);
    Ok(match op {
        CompareOp::Eq => format!("{{ \"{}\": {} }}", field, value),
        other => format!(
            "{{ \"{}\": {{ \"{}\": {} }} }}",
            field,
            mongo_op(other),
            value
        ),
    })
}

fn mongo_op(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "$eq",
        CompareOp::Gt => "$gt",
        CompareOp::Gte => "$gte",
        CompareOp::Lt => "$lt",
        CompareOp::Lte => "$lte",
    }
}

fn column_name(expr: &Expr) -> DynqResult<&str> {
    match expr {
        Expr::Column(name) => Ok(name),
        other => Err(DynqError::Translation(format!(
            "expected a column reference, got '{}'",
            super::sql::expr_sql(other)
        ))),
    }
}

fn literal_json_expr(expr: &Expr) -> DynqResult<String> {
    match expr {
        Expr::Literal(literal) => Ok(literal_json(literal)),
        Expr::Placeholder(name) => Err(DynqError::Translation(format!(
            "unresolved placeholder ':{}' reached the document-store translator",
            name
        ))),
        other => Err(DynqError::Translation(format!(
            "expected a literal value, got '{}'",
            super::sql::expr_sql(other)
        ))),
    }
}

fn literal_json(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => format!("{:?}", f),
        Literal::Decimal(d) => d.to_string(),
        Literal::String(s) => json_string(s),
        Literal::Date(d) => json_string(&d.format("%Y-%m-%d").to_string()),
        Literal::Time(t) => json_string(&t.format("%H:%M:%S%.f").to_string()),
        Literal::DateTime(dt) => json_string(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        Literal::Hex(h) => json_string(h),
        Literal::Uuid(u) => json_string(&u.to_string()),
    }
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

/// Translate a SQL LIKE pattern into an anchored regex: `%` matches any run,
/// `_` a single character; everything else is literal.
fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            c if ".^$*+?()[]{}|\\".contains(c) => {
                regex.push('\\');
                regex.push(c);
            }
            c => regex.push(c),
        }
    }
    regex.push('$');
    regex
}
