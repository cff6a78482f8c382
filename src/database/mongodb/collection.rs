use super::{AggregateQuery, FindQuery};
use crate::TRACING_TARGET_QUERY;
use mongodb::action::{Aggregate, Find};
use mongodb::Collection;

/// Hands paginated queries to the driver.
///
/// The returned actions are not awaited here: the caller runs them, and any
/// error about a bad field, cursor or limit comes back from the driver.
pub trait PaginatedCollection<T: Send + Sync> {
    fn find_page(&self, query: FindQuery) -> Find<'_, T>;

    fn aggregate_page(&self, query: AggregateQuery) -> Aggregate<'_>;
}

impl<T: Send + Sync> PaginatedCollection<T> for Collection<T> {
    fn find_page(&self, query: FindQuery) -> Find<'_, T> {
        let (filter, options) = query.into_parts();
        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            collection = self.name(),
            %filter,
            limit = options.limit,
            "Prepared paginated find"
        );
        self.find(filter).with_options(options)
    }

    fn aggregate_page(&self, query: AggregateQuery) -> Aggregate<'_> {
        let (pipeline, options) = query.into_parts();
        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            collection = self.name(),
            stages = pipeline.len(),
            "Prepared paginated aggregate"
        );
        self.aggregate(pipeline).with_options(options)
    }
}
