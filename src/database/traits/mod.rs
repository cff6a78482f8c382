pub use paginate::Paginate;
pub use query_spec::{and_condition, QuerySpec};

mod paginate;
mod query_spec;
