//! The two ways a query is put together.
//!
//! A structured backend composes a `sql::ast::Select` over a table. A template backend
//! fills the slots of a caller-owned statement with text. Both receive the same filter,
//! sort terms and page from the builders, through the `Backend` trait.

use datagrid_configuration::{ComplexBundle, SearchSettings, Slot, Template};
use query_engine_sql::sql;

use super::filtering::Filter;
use super::limiting::Page;
use super::sorting::{self, OrderTerm};

/// Applies the output of each builder to a query under construction.
pub trait Backend {
    type Query;

    /// Apply the search conditions. `text` is the `WHERE ...` form of the same filter.
    fn apply_filter(&self, query: &mut Self::Query, filter: &Filter<'_>, text: Option<&str>);

    /// Apply the sort terms, returning the text written into the query, if any.
    fn apply_order(&self, query: &mut Self::Query, terms: &[OrderTerm<'_>]) -> Option<String>;

    /// Apply the page, returning the text written into the query, if any.
    fn apply_limit(&self, query: &mut Self::Query, page: Option<Page>) -> Option<String>;
}

/// A query under construction, along with the fragments generated for it.
/// It lives for one request only.
#[derive(Debug, Clone, PartialEq)]
pub struct InFlightQuery<Q> {
    pub query: Q,
    /// The `WHERE ...` text of the search, reused for the filtered count.
    pub filter: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
}

impl<Q> InFlightQuery<Q> {
    pub fn new(query: Q) -> Self {
        InFlightQuery {
            query,
            filter: None,
            order: None,
            limit: None,
        }
    }
}

// Structured //

/// What a single-table query selects from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredSource {
    /// A model table, restricted to rows with a non-zero key.
    Model { table: String, key_name: String },
    /// A plain table.
    Table(String),
}

#[derive(Debug, Clone, Copy)]
pub struct StructuredBackend<'a> {
    search: &'a SearchSettings,
}

impl<'a> StructuredBackend<'a> {
    pub fn new(search: &'a SearchSettings) -> Self {
        StructuredBackend { search }
    }

    /// The base query of a source. `primary_key` overrides the key of a model.
    pub fn source_query(
        source: &StructuredSource,
        primary_key: Option<&str>,
    ) -> sql::ast::Select {
        match source {
            StructuredSource::Table(table) => sql::helpers::star_select(sql::ast::From::Table {
                reference: sql::helpers::make_table_reference(table),
            }),
            StructuredSource::Model { table, key_name } => {
                let mut select = sql::helpers::star_select(sql::ast::From::Table {
                    reference: sql::helpers::make_table_reference(table),
                });
                let key = primary_key
                    .filter(|key| !key.is_empty())
                    .unwrap_or(key_name.as_str());
                select.where_ = sql::ast::Where(sql::ast::Expression::BinaryOperation {
                    left: Box::new(sql::helpers::make_column(key)),
                    operator: sql::ast::BinaryOperator("<>".to_string()),
                    right: Box::new(sql::ast::Expression::Value(
                        sql::ast::Value::UntypedLiteral("0".to_string()),
                    )),
                });
                select
            }
        }
    }
}

impl Backend for StructuredBackend<'_> {
    type Query = sql::ast::Select;

    fn apply_filter(&self, query: &mut Self::Query, filter: &Filter<'_>, _text: Option<&str>) {
        if let Some(predicate) = filter.to_expression(self.search) {
            let sql::ast::Where(current) = std::mem::replace(
                &mut query.where_,
                sql::ast::Where(sql::helpers::empty_where()),
            );
            query.where_ = sql::ast::Where(sql::helpers::and_where(current, predicate));
        }
    }

    fn apply_order(&self, query: &mut Self::Query, terms: &[OrderTerm<'_>]) -> Option<String> {
        query
            .order_by
            .elements
            .extend(terms.iter().map(|term| sql::ast::OrderByElement {
                target: sql::helpers::make_column(&term.column.col),
                direction: term.direction,
            }));
        None
    }

    fn apply_limit(&self, query: &mut Self::Query, page: Option<Page>) -> Option<String> {
        if let Some(page) = page {
            query.limit = sql::ast::Limit {
                limit: Some(page.length),
                offset: Some(page.start),
            };
        }
        None
    }
}

// Template //

/// Fills a separate limit slot when every row is requested. PostgreSQL reads `LIMIT ALL`
/// as no limit.
const UNPAGED_LIMIT: &str = "ALL";
const UNPAGED_OFFSET: &str = "0";

/// A statement template and the text chosen for each of its slots.
/// Slots that are never filled render empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateQuery<'a> {
    template: &'a Template,
    condition: String,
    order: String,
    limit: String,
    offset: String,
}

impl<'a> TemplateQuery<'a> {
    pub fn new(template: &'a Template) -> Self {
        TemplateQuery {
            template,
            condition: String::new(),
            order: String::new(),
            limit: String::new(),
            offset: String::new(),
        }
    }

    /// The statement with every slot filled.
    pub fn render(&self) -> String {
        self.template.render(|slot| match slot {
            Slot::Condition => self.condition.as_str(),
            Slot::Order => self.order.as_str(),
            Slot::Limit => self.limit.as_str(),
            Slot::Offset => self.offset.as_str(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateBackend<'a> {
    bundle: &'a ComplexBundle,
}

impl<'a> TemplateBackend<'a> {
    pub fn new(bundle: &'a ComplexBundle) -> Self {
        TemplateBackend { bundle }
    }
}

impl<'a> Backend for TemplateBackend<'a> {
    type Query = TemplateQuery<'a>;

    fn apply_filter(&self, query: &mut Self::Query, _filter: &Filter<'_>, text: Option<&str>) {
        query.condition = text.unwrap_or_default().to_string();
    }

    fn apply_order(&self, query: &mut Self::Query, terms: &[OrderTerm<'_>]) -> Option<String> {
        let text = sorting::order_text(terms, self.bundle.pre_ordered);
        query.order = text.clone().unwrap_or_default();
        text
    }

    /// With separate slots the container spells out `LIMIT` and `OFFSET` itself, so an
    /// unpaged request still fills both: every row from the first one.
    fn apply_limit(&self, query: &mut Self::Query, page: Option<Page>) -> Option<String> {
        if !self.bundle.query.has_slot(Slot::Limit) {
            return None;
        }
        if self.bundle.has_offset_slot() {
            let Some(page) = page else {
                query.limit = UNPAGED_LIMIT.to_string();
                query.offset = UNPAGED_OFFSET.to_string();
                return None;
            };
            query.limit = page.length.to_string();
            query.offset = page.start.to_string();
        } else {
            query.limit = page?.to_text();
        }
        Some(query.limit.clone())
    }
}
