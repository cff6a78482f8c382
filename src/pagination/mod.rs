pub use config::{
    per_page, set_per_page, PaginationConfig, PaginationConfigBuilder, DEFAULT_ID_FIELD,
    DEFAULT_PER_PAGE,
};
pub use cursor::Cursor;
pub use order::SortOrder;
pub use page::Page;
pub use paginator::Paginator;

mod config;
mod cursor;
mod order;
mod page;
mod paginator;
