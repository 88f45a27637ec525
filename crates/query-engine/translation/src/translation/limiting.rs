//! Paging.

use datagrid_models::GridRequest;

use super::backend::{Backend, InFlightQuery};

/// One page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub length: u64,
    pub start: u64,
}

pub fn translate_limit<B: Backend>(
    backend: &B,
    in_flight: &mut InFlightQuery<B::Query>,
    request: &GridRequest,
) {
    in_flight.limit = backend.apply_limit(&mut in_flight.query, page(request));
}

/// The requested page. A request without a start, or asking for every row, is not paged.
pub fn page(request: &GridRequest) -> Option<Page> {
    Some(Page {
        start: request.start?,
        length: request.length.rows()?,
    })
}

impl Page {
    /// `LIMIT <length> OFFSET <start>`
    pub fn to_text(self) -> String {
        format!("LIMIT {} OFFSET {}", self.length, self.start)
    }
}
