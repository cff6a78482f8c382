use crate::{PaginationError, PaginationResult};
use serde_derive::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Page size used when neither the call nor the config names one.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Field that breaks ties and carries the cursor when none is configured.
pub const DEFAULT_ID_FIELD: &str = "_id";

static PER_PAGE: AtomicI64 = AtomicI64::new(DEFAULT_PER_PAGE);

/// Current process-wide default page size.
pub fn per_page() -> i64 {
    PER_PAGE.load(Ordering::Relaxed)
}

/// Changes the process-wide default page size.
///
/// Meant to be called while the application is being configured. The value is
/// not synchronized with in-flight pagination calls: a call racing with this
/// one uses either the old or the new default, and calls that already
/// returned are unaffected.
pub fn set_per_page(per_page: i64) {
    PER_PAGE.store(per_page, Ordering::Relaxed);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// `None` defers to the process-wide default at call time.
    pub per_page: Option<i64>,
    pub id_field: String,
    /// Cast string cursors that hold a valid ObjectId to `ObjectId`.
    pub cast_object_ids: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: None,
            id_field: DEFAULT_ID_FIELD.to_string(),
            cast_object_ids: true,
        }
    }
}

impl PaginationConfig {
    pub fn builder() -> PaginationConfigBuilder {
        PaginationConfigBuilder::new()
    }

    /// Loads a config such as `{ "perPage": 25, "idField": "_id" }`.
    /// Missing keys take their defaults.
    pub fn from_json(json: &str) -> PaginationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn effective_per_page(&self) -> i64 {
        self.per_page.unwrap_or_else(per_page)
    }

    fn validate(&self) -> PaginationResult<()> {
        if self.id_field.is_empty() {
            return Err(PaginationError::Config("id field cannot be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct PaginationConfigBuilder {
    per_page: Option<i64>,
    id_field: Option<String>,
    cast_object_ids: Option<bool>,
}

impl PaginationConfigBuilder {
    pub fn new() -> PaginationConfigBuilder {
        PaginationConfigBuilder::default()
    }

    pub fn per_page(mut self, per_page: impl Into<Option<i64>>) -> Self {
        self.per_page = per_page.into();
        self
    }

    pub fn id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = Some(id_field.into());
        self
    }

    /// Disable for collections whose identifiers are strings that may look
    /// like ObjectIds.
    pub fn cast_object_ids(mut self, cast: bool) -> Self {
        self.cast_object_ids = Some(cast);
        self
    }

    pub fn build(self) -> PaginationResult<PaginationConfig> {
        let defaults = PaginationConfig::default();
        let config = PaginationConfig {
            per_page: self.per_page,
            id_field: self.id_field.unwrap_or(defaults.id_field),
            cast_object_ids: self.cast_object_ids.unwrap_or(defaults.cast_object_ids),
        };
        config.validate()?;
        Ok(config)
    }
}
