use query_engine_sql::sql::{ast, helpers, string};
use similar_asserts::assert_eq;

fn users() -> ast::Select {
    helpers::star_select(ast::From::Table {
        reference: helpers::make_table_reference("public.users"),
    })
}

#[test]
fn it_converts_simple_select() {
    assert_eq!(
        users().query_sql(),
        string::SQL {
            sql: "SELECT * FROM \"public\".\"users\"".to_string(),
            params: vec![],
            param_index: 0,
        }
    );
}

#[test]
fn it_converts_where_order_and_limit() {
    let like = |column: &str, pattern: &str| ast::Expression::BinaryOperation {
        left: Box::new(helpers::make_column(column)),
        operator: ast::BinaryOperator("ILIKE".to_string()),
        right: Box::new(ast::Expression::Value(ast::Value::String(
            pattern.to_string(),
        ))),
    };

    let mut select = users();
    select.where_ = ast::Where(
        helpers::disjunction(vec![like("name", "%bob%"), like("email", "%bob%")]).unwrap(),
    );
    select.order_by.elements.push(ast::OrderByElement {
        target: helpers::make_column("age"),
        direction: ast::OrderByDirection::Desc,
    });
    select.limit = ast::Limit {
        limit: Some(10),
        offset: Some(20),
    };

    let sql = select.query_sql();
    assert_eq!(
        sql.sql,
        "SELECT * FROM \"public\".\"users\" WHERE ((\"name\" ILIKE $1) OR (\"email\" ILIKE $2)) ORDER BY \"age\" DESC LIMIT 10 OFFSET 20"
    );
    assert_eq!(
        sql.params,
        vec![
            string::Param::String("%bob%".to_string()),
            string::Param::String("%bob%".to_string())
        ]
    );
}

#[test]
fn it_renders_string_casts_around_columns() {
    let mut sql = string::SQL::new();
    ast::Expression::StringCast {
        cast: ast::CastTemplate {
            before: "CAST(".to_string(),
            after: " AS TEXT)".to_string(),
        },
        expression: Box::new(helpers::make_column("age")),
    }
    .to_sql(&mut sql);

    assert_eq!(sql.sql, "CAST(\"age\" AS TEXT)");
}

#[test]
fn it_escapes_quotes_in_identifiers() {
    let mut sql = string::SQL::new();
    sql.append_identifier("we\"ird");
    assert_eq!(sql.sql, "\"we\"\"ird\"");
}

#[test]
fn and_where_drops_the_empty_predicate() {
    let predicate = helpers::make_column("active");
    assert_eq!(
        helpers::and_where(helpers::empty_where(), predicate.clone()),
        predicate
    );
    assert_eq!(helpers::conjunction(vec![]), None);
}

#[test]
fn it_quotes_untyped_literals_inline() {
    let mut sql = string::SQL::new();
    ast::Expression::BinaryOperation {
        left: Box::new(helpers::make_column("code")),
        operator: ast::BinaryOperator("<>".to_string()),
        right: Box::new(ast::Expression::Value(ast::Value::UntypedLiteral(
            "o'0".to_string(),
        ))),
    }
    .to_sql(&mut sql);

    assert_eq!(sql.sql, "(\"code\" <> 'o''0')");
    assert_eq!(sql.params, vec![]);
}
