//! Search predicates: one global term across every column, and per-column terms.

use datagrid_configuration::SearchSettings;
use datagrid_models::GridRequest;
use query_engine_metadata::metadata::ColumnSpec;
use query_engine_sql::sql;

use super::backend::{Backend, InFlightQuery};
use super::resolution::ColumnResolution;

/// One column searched for one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCondition<'a> {
    pub column: &'a ColumnSpec,
    pub term: &'a str,
}

/// The search conditions of a request.
/// Global conditions are joined with `OR`, specified conditions with `AND`, and the two
/// groups with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter<'a> {
    pub global: Vec<SearchCondition<'a>>,
    pub specified: Vec<SearchCondition<'a>>,
}

/// Compute the filter of a request and hand it to the backend.
/// The text form is kept on the in-flight query for the filtered count.
pub fn translate_filter<B: Backend>(
    backend: &B,
    in_flight: &mut InFlightQuery<B::Query>,
    request: &GridRequest,
    resolution: &ColumnResolution<'_>,
    search: &SearchSettings,
) {
    let filter = collect_filter(request, resolution);
    let text = filter.to_text(search);
    backend.apply_filter(&mut in_flight.query, &filter, text.as_deref());
    in_flight.filter = text;
}

/// Collect the global and per-column conditions over the resolved columns.
pub fn collect_filter<'a>(
    request: &'a GridRequest,
    resolution: &ColumnResolution<'a>,
) -> Filter<'a> {
    let global = match request.global_search() {
        None => vec![],
        Some(term) => resolution
            .resolved()
            .iter()
            .map(|resolved| SearchCondition {
                column: resolution.column(*resolved),
                term,
            })
            .collect(),
    };

    let specified = resolution
        .resolved()
        .iter()
        .filter_map(|resolved| {
            let request_column = request.columns.get(resolved.request_index)?;
            let term = request_column.search_term()?;
            request_column.is_searchable().then(|| SearchCondition {
                column: resolution.column(*resolved),
                term,
            })
        })
        .collect();

    Filter { global, specified }
}

impl Filter<'_> {
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.specified.is_empty()
    }

    /// The `WHERE ...` text of the filter, for templates and count statements.
    pub fn to_text(&self, search: &SearchSettings) -> Option<String> {
        let global: Vec<String> = self
            .global
            .iter()
            .map(|condition| condition.to_text(search))
            .collect();
        let specified: Vec<String> = self
            .specified
            .iter()
            .map(|condition| condition.to_text(search))
            .collect();

        match (global.is_empty(), specified.is_empty()) {
            (true, true) => None,
            (false, true) => Some(format!("WHERE ({})", global.join(" OR "))),
            (true, false) => Some(format!("WHERE ({})", specified.join(" AND "))),
            (false, false) => Some(format!(
                "WHERE ({}) AND {}",
                global.join(" OR "),
                specified.join(" AND ")
            )),
        }
    }

    /// The same filter as an expression, with search patterns as bound parameters.
    pub fn to_expression(&self, search: &SearchSettings) -> Option<sql::ast::Expression> {
        let global = sql::helpers::disjunction(
            self.global
                .iter()
                .map(|condition| condition.to_expression(search))
                .collect(),
        );
        let specified = self
            .specified
            .iter()
            .map(|condition| condition.to_expression(search));

        sql::helpers::conjunction(global.into_iter().chain(specified).collect())
    }
}

impl SearchCondition<'_> {
    /// The term is embedded in a string literal. Backslashes and single quotes are both
    /// doubled, so the literal stays closed whether or not the database treats `\` as an
    /// escape character inside strings.
    fn to_text(self, search: &SearchSettings) -> String {
        format!(
            "{} {} '%{}%'",
            search.caster.apply(&self.column.qualified_name()),
            search.like_operator,
            self.term.replace('\\', "\\\\").replace('\'', "''")
        )
    }

    fn to_expression(self, search: &SearchSettings) -> sql::ast::Expression {
        sql::ast::Expression::BinaryOperation {
            left: Box::new(sql::ast::Expression::StringCast {
                cast: search.caster.cast_template(),
                expression: Box::new(sql::helpers::make_column(&self.column.col)),
            }),
            operator: sql::ast::BinaryOperator(search.like_operator.clone()),
            right: Box::new(sql::ast::Expression::Value(sql::ast::Value::String(
                format!("%{}%", self.term),
            ))),
        }
    }
}
