use crate::database::traits::{and_condition, QuerySpec};
use crate::SortOrder;
use bson::{Bson, Document};
use mongodb::options::FindOptions;

/// A `find` against a collection: the filter plus the driver's find options.
///
/// Sort and limit live on the `FindOptions` so the query can be handed to
/// `Collection::find` unchanged.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    filter: Document,
    options: FindOptions,
}

impl FindQuery {
    pub fn builder() -> FindQueryBuilder {
        FindQueryBuilder::new()
    }

    pub fn new(filter: Document, options: FindOptions) -> Self {
        Self { filter, options }
    }

    pub fn filter(&self) -> &Document {
        &self.filter
    }

    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    pub fn limit(&self) -> Option<i64> {
        self.options.limit
    }

    pub fn into_parts(self) -> (Document, FindOptions) {
        (self.filter, self.options)
    }
}

impl QuerySpec for FindQuery {
    fn sort(&self) -> Option<&Document> {
        self.options.sort.as_ref()
    }

    fn set_sort_field(&mut self, field: &str, direction: Bson) {
        self.options
            .sort
            .get_or_insert_with(Document::new)
            .insert(field, direction);
    }

    fn and_filter(&mut self, condition: Document) {
        and_condition(&mut self.filter, condition);
    }

    fn set_limit(&mut self, limit: i64) {
        self.options.limit = Some(limit);
    }
}

#[derive(Debug, Default)]
pub struct FindQueryBuilder {
    filter: Option<Document>,
    sort: Option<Document>,
    limit: Option<i64>,
    read_options: Option<FindOptions>,
}

impl FindQueryBuilder {
    pub fn new() -> FindQueryBuilder {
        FindQueryBuilder::default()
    }

    pub fn filter(mut self, filter: impl Into<Option<Document>>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn limit(mut self, limit: impl Into<Option<i64>>) -> Self {
        self.limit = limit.into();
        self
    }

    /// String directions (`"asc"`, `"desc"`) are rewritten to `1` / `-1`.
    pub fn sort(mut self, sort: impl Into<Option<Document>>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Base driver options (projection, batch size, collation, ...).
    /// `sort` and `limit` set on the builder take precedence.
    pub fn read_options(mut self, options: impl Into<Option<FindOptions>>) -> Self {
        self.read_options = options.into();
        self
    }

    pub fn build(self) -> FindQuery {
        let mut options = self.read_options.unwrap_or_default();
        if self.sort.is_some() {
            options.sort = self.sort;
        }
        if self.limit.is_some() {
            options.limit = self.limit;
        }
        options.sort = options.sort.map(SortOrder::normalize_sort);

        FindQuery {
            filter: self.filter.unwrap_or_default(),
            options,
        }
    }
}
