//! SQL text generation for the relational backend.

use super::ToSql;
use crate::ast::{
    Delete, Expr, Insert, InsertSource, Select, SortOrder, Statement, Update,
};

impl ToSql for Statement {
    fn to_sql(&self) -> String {
        match self {
            Statement::Select(s) => s.to_sql(),
            Statement::Update(u) => u.to_sql(),
            Statement::Insert(i) => i.to_sql(),
            Statement::Delete(d) => d.to_sql(),
        }
    }
}

impl ToSql for Select {
    fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        for join in &self.joins {
            sql.push_str(&format!(
                " {} {} ON {}",
                join.kind.sql_keyword(),
                join.table,
                expr_sql(&join.on)
            ));
        }

        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&expr_sql(filter));
        }

        if !self.order_by.is_empty() {
            let items: Vec<String> = self
                .order_by
                .iter()
                .map(|item| match item.order {
                    SortOrder::Asc => item.column.clone(),
                    SortOrder::Desc => format!("{} DESC", item.column),
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&items.join(", "));
        }

        sql
    }
}

impl ToSql for Update {
    fn to_sql(&self) -> String {
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .map(|a| format!("{} = {}", a.column, expr_sql(&a.value)))
            .collect();
        let mut sql = format!("UPDATE {} SET {}", self.table, assignments.join(", "));
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&expr_sql(filter));
        }
        sql
    }
}

impl ToSql for Insert {
    fn to_sql(&self) -> String {
        let columns = self.columns.join(", ");
        match &self.source {
            InsertSource::Values(values) => {
                let rendered: Vec<String> = values.iter().map(expr_sql).collect();
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    self.table,
                    columns,
                    rendered.join(", ")
                )
            }
            InsertSource::Select(select) => {
                format!("INSERT INTO {} ({}) {}", self.table, columns, select.to_sql())
            }
        }
    }
}

impl ToSql for Delete {
    fn to_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table);
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&expr_sql(filter));
        }
        sql
    }
}

/// Render an expression as SQL text.
pub fn expr_sql(expr: &Expr) -> String {
    render(expr, 0)
}

// precedence levels: 1 = OR, 2 = AND, 3 = predicate operand
fn render(expr: &Expr, parent: u8) -> String {
    match expr {
        Expr::Literal(literal) => literal.to_string(),
        Expr::Placeholder(name) => format!(":{}", name),
        Expr::Column(name) => name.clone(),
        Expr::Comparison { op, left, right } => format!(
            "{} {} {}",
            render(left, 3),
            op.sql_symbol(),
            render(right, 3)
        ),
        Expr::Like { left, right } => {
            format!("{} LIKE {}", render(left, 3), render(right, 3))
        }
        Expr::Between {
            subject,
            start,
            end,
        } => format!(
            "{} BETWEEN {} AND {}",
            render(subject, 3),
            render(start, 3),
            render(end, 3)
        ),
        Expr::In { subject, list } => {
            let elements: Vec<String> = list.iter().map(|e| render(e, 3)).collect();
            format!("{} IN ({})", render(subject, 3), elements.join(", "))
        }
        Expr::And(left, right) => {
            format!("{} AND {}", render(left, 2), render(right, 2))
        }
        Expr::Or(left, right) => {
            let rendered = format!("{} OR {}", render(left, 1), render(right, 1));
            if parent >= 2 {
                format!("({})", rendered)
            } else {
                rendered
            }
        }
    }
}
