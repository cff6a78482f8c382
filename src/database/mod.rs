pub(crate) mod mongodb;
pub(crate) mod traits;
