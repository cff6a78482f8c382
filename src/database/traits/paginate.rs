use super::query_spec::QuerySpec;
use crate::pagination::{Cursor, Page, Paginator, SortOrder};

/// Adds keyset pagination to every [`QuerySpec`].
///
/// ```ignore
/// let active = || FindQuery::builder()
///     .filter(doc! { "status": "active" })
///     .sort(doc! { "createdAt": -1 })
///     .build();
///
/// let mut first = active();
/// first.paginate(10);
/// let page: Vec<Document> = collection.find_page(first).await?.try_collect().await?;
///
/// let mut second = active();
/// second.paginate((10, Cursor::after_last(&page, "_id")?));
/// ```
pub trait Paginate: QuerySpec {
    /// Paginates with the process-wide defaults.
    ///
    /// Accepts `()`, a page size, a cursor, or a `(page size, cursor)` tuple.
    fn paginate(&mut self, page: impl Into<Page>) -> &mut Self {
        Paginator::default().apply(self, page.into(), None)
    }

    /// Paginates with an explicitly configured paginator.
    fn paginate_with(&mut self, paginator: &Paginator, page: impl Into<Page>) -> &mut Self {
        paginator.apply(self, page.into(), None)
    }

    /// Paginates in a forced order instead of the one detected from the sort.
    /// The id tie-break is still added, in the forced order.
    fn paginate_ordered(
        &mut self,
        per_page: i64,
        order: SortOrder,
        cursor: impl Into<Cursor>,
    ) -> &mut Self {
        let page = Page::SizeAfter(per_page, cursor.into());
        Paginator::default().apply(self, page, Some(order))
    }
}

impl<Q: QuerySpec + ?Sized> Paginate for Q {}
