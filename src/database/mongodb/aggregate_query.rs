use crate::database::traits::{and_condition, QuerySpec};
use crate::SortOrder;
use bson::{doc, Bson, Document};
use mongodb::options::AggregateOptions;

/// An aggregation pipeline with keyset pagination stages.
///
/// The base pipeline is kept as given. Pagination state is collected on the
/// side and emitted as trailing `$match`, `$sort` and `$limit` stages by
/// [`AggregateQuery::into_pipeline`], so the id boundary is applied to the
/// documents the base pipeline produces.
#[derive(Debug, Clone, Default)]
pub struct AggregateQuery {
    pipeline: Vec<Document>,
    filter: Document,
    sort: Option<Document>,
    limit: Option<i64>,
    options: Option<AggregateOptions>,
}

impl AggregateQuery {
    pub fn builder() -> AggregateQueryBuilder {
        AggregateQueryBuilder::new()
    }

    pub fn filter(&self) -> &Document {
        &self.filter
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// The full pipeline: base stages, then `$match` (only when a filter was
    /// added), `$sort` and `$limit`.
    pub fn pipeline(&self) -> Vec<Document> {
        let mut pipeline = self.pipeline.clone();

        if !self.filter.is_empty() {
            pipeline.push(doc! { "$match": self.filter.clone() });
        }
        if let Some(sort) = self.sort.as_ref().filter(|sort| !sort.is_empty()) {
            pipeline.push(doc! { "$sort": sort.clone() });
        }
        if let Some(limit) = self.limit {
            pipeline.push(doc! { "$limit": limit });
        }

        pipeline
    }

    pub fn into_pipeline(self) -> Vec<Document> {
        self.pipeline()
    }

    pub fn into_parts(self) -> (Vec<Document>, Option<AggregateOptions>) {
        let pipeline = self.pipeline();
        (pipeline, self.options)
    }
}

impl QuerySpec for AggregateQuery {
    fn sort(&self) -> Option<&Document> {
        self.sort.as_ref()
    }

    fn set_sort_field(&mut self, field: &str, direction: Bson) {
        self.sort
            .get_or_insert_with(Document::new)
            .insert(field, direction);
    }

    fn and_filter(&mut self, condition: Document) {
        and_condition(&mut self.filter, condition);
    }

    fn set_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }
}

#[derive(Debug, Default)]
pub struct AggregateQueryBuilder {
    pipeline: Vec<Document>,
    filter: Option<Document>,
    sort: Option<Document>,
    options: Option<AggregateOptions>,
}

impl AggregateQueryBuilder {
    pub fn new() -> AggregateQueryBuilder {
        AggregateQueryBuilder::default()
    }

    pub fn stage(mut self, stage: Document) -> Self {
        self.pipeline.push(stage);
        self
    }

    pub fn pipeline(mut self, stages: impl IntoIterator<Item = Document>) -> Self {
        self.pipeline.extend(stages);
        self
    }

    /// Filter applied after the base pipeline, together with the id boundary.
    pub fn filter(mut self, filter: impl Into<Option<Document>>) -> Self {
        self.filter = filter.into();
        self
    }

    /// String directions (`"asc"`, `"desc"`) are rewritten to `1` / `-1`.
    pub fn sort(mut self, sort: impl Into<Option<Document>>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn options(mut self, options: impl Into<Option<AggregateOptions>>) -> Self {
        self.options = options.into();
        self
    }

    pub fn build(self) -> AggregateQuery {
        AggregateQuery {
            pipeline: self.pipeline,
            filter: self.filter.unwrap_or_default(),
            sort: self.sort.map(SortOrder::normalize_sort),
            limit: None,
            options: self.options,
        }
    }
}
