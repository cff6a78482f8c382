use super::{
    config::PaginationConfig,
    cursor::Cursor,
    order::SortOrder,
    page::Page,
};
use crate::database::traits::QuerySpec;
use crate::TRACING_TARGET_PAGINATOR;
use bson::{doc, Document};

/// Turns a sorted query into a keyset page.
///
/// Applying a page to a query:
/// 1. resolves the page size and cursor from the call arguments
/// 2. takes the primary order from the first sort field (or the explicit order)
/// 3. sorts on the id field last, in the primary order, so pages are totally ordered
/// 4. seeks past the cursor with `$gt` (ascending) or `$lt` (otherwise)
/// 5. limits the query to the page size
///
/// The boundary only constrains the id field, so the primary sort must order
/// documents the way their ids do (creation time with ObjectIds, for example).
///
/// Nothing is validated and nothing is executed: bad field names, cursors or
/// page sizes surface as errors from the driver when the query runs.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn apply<'q, Q>(&self, query: &'q mut Q, page: Page, order: Option<SortOrder>) -> &'q mut Q
    where
        Q: QuerySpec + ?Sized,
    {
        let (per_page, cursor) = page.resolve(self.config.effective_per_page());
        let order = order.unwrap_or_else(|| SortOrder::detect(query.sort()));
        let id_field = self.config.id_field.as_str();

        query.set_sort_field(id_field, order.to_bson());

        let bounded = cursor.is_some();
        if let Some(cursor) = cursor {
            query.and_filter(self.boundary(&cursor, order));
        }

        query.set_limit(per_page);

        tracing::debug!(
            target: TRACING_TARGET_PAGINATOR,
            per_page,
            %order,
            id_field,
            bounded,
            "Applied keyset pagination"
        );

        query
    }

    fn boundary(&self, cursor: &Cursor, order: SortOrder) -> Document {
        let value = cursor.canonical(self.config.cast_object_ids);
        let mut boundary = Document::new();
        boundary.insert(self.config.id_field.as_str(), doc! { order.boundary_operator(): value });
        boundary
    }
}
