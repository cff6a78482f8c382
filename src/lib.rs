mod database;
mod error;
mod pagination;

pub use database::mongodb::{
    AggregateQuery, AggregateQueryBuilder, FindQuery, FindQueryBuilder, PaginatedCollection,
};
pub use database::traits::{and_condition, Paginate, QuerySpec};
pub use error::{PaginationError, PaginationResult};
pub use pagination::{
    per_page, set_per_page, Cursor, Page, PaginationConfig, PaginationConfigBuilder, Paginator,
    SortOrder, DEFAULT_ID_FIELD, DEFAULT_PER_PAGE,
};

/// Tracing target for pagination decisions.
pub const TRACING_TARGET_PAGINATOR: &str = "efficient_pagination::paginator";

/// Tracing target for queries handed to the driver.
pub const TRACING_TARGET_QUERY: &str = "efficient_pagination::query";
