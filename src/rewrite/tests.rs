use crate::ast::ParamValue;
use crate::error::DynqError;
use crate::params::Params;
use crate::parser::parse;
use crate::rewrite::rewrite_statement;
use crate::transpiler::ToSql;
use pretty_assertions::assert_eq;

fn rewrite_sql(template: &str, params: &Params) -> String {
    let statement = parse(template).unwrap();
    rewrite_statement(statement, params).unwrap().to_sql()
}

#[test]
fn test_and_keeps_both_sides() {
    let params = Params::new().bind("x", 5).bind("y", "ok");
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE a = :x AND b = :y", &params),
        "SELECT * FROM t WHERE a = 5 AND b = 'ok'"
    );
}

#[test]
fn test_and_with_one_absent_keeps_the_other() {
    let params = Params::new().bind("x", 5);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE a = :x AND b = :y", &params),
        "SELECT * FROM t WHERE a = 5"
    );
}

#[test]
fn test_all_absent_removes_where_entirely() {
    let params = Params::new();
    // no WHERE 1=1, no empty WHERE: the clause is gone
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE a = :x AND b = :y", &params),
        "SELECT * FROM t"
    );
}

#[test]
fn test_or_prunes_like_and() {
    // a pruned branch is "no constraint" for OR too, not "always false"
    let params = Params::new().bind("x", 1);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE a = :x OR b = :y", &params),
        "SELECT * FROM t WHERE a = 1"
    );
}

#[test]
fn test_null_binding_prunes_like_absent() {
    let params = Params::new().bind("x", ParamValue::Null).bind("y", 2);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE a = :x AND b = :y", &params),
        "SELECT * FROM t WHERE b = 2"
    );
}

#[test]
fn test_nested_groups_collapse() {
    let params = Params::new().bind("c", 3);
    assert_eq!(
        rewrite_sql(
            "SELECT * FROM t WHERE (a = :a OR b = :b) AND c = :c",
            &params
        ),
        "SELECT * FROM t WHERE c = 3"
    );
}

#[test]
fn test_or_group_keeps_parentheses_under_and() {
    let params = Params::new().bind("a", 1).bind("b", 2).bind("c", 3);
    assert_eq!(
        rewrite_sql(
            "SELECT * FROM t WHERE (a = :a OR b = :b) AND c = :c",
            &params
        ),
        "SELECT * FROM t WHERE (a = 1 OR b = 2) AND c = 3"
    );
}

#[test]
fn test_comparison_operators_substitute() {
    let params = Params::new().bind("lo", 10).bind("hi", 20);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE a >= :lo AND a < :hi", &params),
        "SELECT * FROM t WHERE a >= 10 AND a < 20"
    );
}

#[test]
fn test_like_substitutes_or_prunes() {
    let bound = Params::new().bind("p", "al%");
    assert_eq!(
        rewrite_sql("SELECT * FROM users WHERE name LIKE :p", &bound),
        "SELECT * FROM users WHERE name LIKE 'al%'"
    );

    let absent = Params::new();
    assert_eq!(
        rewrite_sql("SELECT * FROM users WHERE name LIKE :p", &absent),
        "SELECT * FROM users"
    );
}

#[test]
fn test_between_substitutes_both_bounds() {
    let params = Params::new().bind("lo", 1).bind("hi", 9);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE d BETWEEN :lo AND :hi", &params),
        "SELECT * FROM t WHERE d BETWEEN 1 AND 9"
    );
}

#[test]
fn test_between_is_all_or_nothing() {
    // never a half-bound BETWEEN
    let params = Params::new().bind("lo", 1);
    assert_eq!(
        rewrite_sql(
            "SELECT * FROM t WHERE d BETWEEN :lo AND :hi AND e = :lo",
            &params
        ),
        "SELECT * FROM t WHERE e = 1"
    );
}

#[test]
fn test_in_drops_absent_elements_in_order() {
    let params = Params::new().bind("a", 1).bind("c", 3);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE id IN (:a, :b, :c)", &params),
        "SELECT * FROM t WHERE id IN (1, 3)"
    );
}

#[test]
fn test_in_prunes_when_empty() {
    // never IN ()
    let params = Params::new();
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE id IN (:a, :b, :c)", &params),
        "SELECT * FROM t"
    );
}

#[test]
fn test_in_keeps_template_literals() {
    let params = Params::new();
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE id IN (:a, 7)", &params),
        "SELECT * FROM t WHERE id IN (7)"
    );
}

#[test]
fn test_rewrite_is_idempotent() {
    let params = Params::new().bind("x", 5).bind("a", 1);
    let once = rewrite_statement(
        parse("SELECT * FROM t WHERE a = :x AND id IN (:a, :b)").unwrap(),
        &params,
    )
    .unwrap();
    let twice = rewrite_statement(once.clone(), &params).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_unsupported_type_fails_and_names_kind() {
    let params = Params::new().bind(
        "x",
        ParamValue::Json(serde_json::json!({"nested": true})),
    );
    let err = rewrite_statement(
        parse("SELECT * FROM t WHERE a = :x").unwrap(),
        &params,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported parameter type: json object");
}

#[test]
fn test_update_drops_unbound_assignment() {
    let params = Params::new().bind("name", "alice").bind("id", 7);
    assert_eq!(
        rewrite_sql(
            "UPDATE users SET name = :name, age = :age WHERE id = :id",
            &params
        ),
        "UPDATE users SET name = 'alice' WHERE id = 7"
    );
}

#[test]
fn test_update_with_no_surviving_assignment_fails() {
    let params = Params::new().bind("id", 7);
    let err = rewrite_statement(
        parse("UPDATE users SET name = :name WHERE id = :id").unwrap(),
        &params,
    )
    .unwrap_err();
    match err {
        DynqError::EmptyAssignments { table } => assert_eq!(table, "users"),
        other => panic!("expected EmptyAssignments, got {:?}", other),
    }
}

#[test]
fn test_insert_substitutes_tuple() {
    let params = Params::new().bind("name", "bob").bind("age", 42);
    assert_eq!(
        rewrite_sql(
            "INSERT INTO users (name, age) VALUES (:name, :age)",
            &params
        ),
        "INSERT INTO users (name, age) VALUES ('bob', 42)"
    );
}

#[test]
fn test_insert_fails_fast_on_unbound_element() {
    // dropping the element would desync columns from values
    let params = Params::new().bind("name", "bob");
    let err = rewrite_statement(
        parse("INSERT INTO users (name, age) VALUES (:name, :age)").unwrap(),
        &params,
    )
    .unwrap_err();
    match err {
        DynqError::UnboundInsertValue { name, column } => {
            assert_eq!(name, "age");
            assert_eq!(column, "age");
        }
        other => panic!("expected UnboundInsertValue, got {:?}", other),
    }
}

#[test]
fn test_insert_select_delegates_to_select_rules() {
    let params = Params::new();
    assert_eq!(
        rewrite_sql(
            "INSERT INTO archive (id, name) SELECT id, name FROM users WHERE age > :cutoff",
            &params
        ),
        "INSERT INTO archive (id, name) SELECT id, name FROM users"
    );
}

#[test]
fn test_delete_filter_prunes() {
    let params = Params::new();
    assert_eq!(
        rewrite_sql("DELETE FROM sessions WHERE expires_at < :now", &params),
        "DELETE FROM sessions"
    );
}

#[test]
fn test_bare_placeholder_policy() {
    use crate::ast::{Expr, Literal};
    use crate::rewrite::{Outcome, Rewriter};

    // outside a prunable context: substitute when bound, pass through
    // unresolved when absent (the backend rejects it)
    let params = Params::new().bind("v", 1);
    let rewriter = Rewriter::new(&params);
    assert_eq!(
        rewriter.rewrite(Expr::Placeholder("v".to_string())).unwrap(),
        Outcome::Kept(Expr::Literal(Literal::Int(1)))
    );
    assert_eq!(
        rewriter.rewrite(Expr::Placeholder("w".to_string())).unwrap(),
        Outcome::Kept(Expr::Placeholder("w".to_string()))
    );
}

#[test]
fn test_byte_parameter_renders_bare_hex() {
    let params = Params::new().bind("blob", vec![0x0Au8, 0xFF]);
    assert_eq!(
        rewrite_sql("SELECT * FROM t WHERE payload = :blob", &params),
        "SELECT * FROM t WHERE payload = 0AFF"
    );
}
