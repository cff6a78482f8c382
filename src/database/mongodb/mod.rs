pub use aggregate_query::{AggregateQuery, AggregateQueryBuilder};
pub use collection::PaginatedCollection;
pub use find_query::{FindQuery, FindQueryBuilder};

pub mod aggregate_query;
pub mod collection;
pub mod find_query;
