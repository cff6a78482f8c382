use bson::{Bson, Document};
use std::fmt::Display;

/// Direction of the primary sort, which also drives the tie-break direction
/// and the boundary comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    /// The first sort field carried a falsy or unrecognized direction.
    /// Written into the tie-break as `false` and left for the driver to reject.
    Unresolved,
}

impl SortOrder {
    /// Normalizes a sort direction value.
    ///
    /// `1` / `"asc"` are ascending and `-1` / `"desc"` are descending (strings
    /// are matched case-insensitively). Anything else is `Unresolved`.
    pub fn normalize(value: &Bson) -> Self {
        match value {
            Bson::Int32(1) | Bson::Int64(1) => Self::Ascending,
            Bson::Int32(-1) | Bson::Int64(-1) => Self::Descending,
            Bson::Double(d) if *d == 1.0 => Self::Ascending,
            Bson::Double(d) if *d == -1.0 => Self::Descending,
            Bson::String(s) if s.eq_ignore_ascii_case("asc") => Self::Ascending,
            Bson::String(s) if s.eq_ignore_ascii_case("desc") => Self::Descending,
            _ => Self::Unresolved,
        }
    }

    /// Rewrites `"asc"` / `"desc"` directions (any case) to `1` / `-1`, since
    /// the server only takes numeric directions. Other values are kept as is.
    pub fn normalize_sort(sort: Document) -> Document {
        sort.into_iter()
            .map(|(field, direction)| {
                let direction = match Self::normalize(&direction) {
                    Self::Unresolved => direction,
                    order if direction.as_str().is_some() => order.to_bson(),
                    _ => direction,
                };
                (field, direction)
            })
            .collect()
    }

    /// Detects the primary order from a query's sort criteria.
    ///
    /// A query with no sort criteria is ascending. Otherwise the first declared
    /// field wins, so a sort whose first direction is unusable is `Unresolved`
    /// rather than ascending.
    pub fn detect(sort: Option<&Document>) -> Self {
        match sort.and_then(|sort| sort.iter().next()) {
            Some((_, direction)) => Self::normalize(direction),
            None => Self::Ascending,
        }
    }

    /// Value written to the sort document for the tie-break field.
    pub fn to_bson(self) -> Bson {
        match self {
            Self::Ascending => Bson::Int32(1),
            Self::Descending => Bson::Int32(-1),
            Self::Unresolved => Bson::Boolean(false),
        }
    }

    /// Query operator that seeks past the cursor in this order.
    pub fn boundary_operator(self) -> &'static str {
        match self {
            Self::Ascending => "$gt",
            Self::Descending | Self::Unresolved => "$lt",
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
            Self::Unresolved => Self::Unresolved,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}

impl From<SortOrder> for Bson {
    fn from(order: SortOrder) -> Self {
        order.to_bson()
    }
}
