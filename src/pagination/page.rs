use super::cursor::Cursor;
use bson::{oid::ObjectId, Bson};

/// The arguments of a `paginate` call.
///
/// A numeric first argument is a page size and anything else is a cursor. The
/// `From` impls apply that rule at compile time:
///
/// - `()` uses the default page size and no cursor
/// - `10` sets the page size
/// - `"52c1190207d5dbccda00000f"`, an `ObjectId` or a `Cursor` start after that id
/// - `(10, cursor)` sets both
///
/// Values whose type is only known at run time go through `From<Bson>` and
/// [`Page::from_args`], which inspect the value instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Page {
    #[default]
    Default,
    Size(i64),
    After(Cursor),
    SizeAfter(i64, Cursor),
}

impl Page {
    /// Two-argument form for dynamically typed input: the first argument is the
    /// page size only if it is numeric, and the second is always the cursor.
    ///
    /// Doubles truncate toward zero. A `NaN` size still takes the size slot but
    /// falls back to the default page size.
    pub fn from_args(first: Bson, second: Option<Bson>) -> Self {
        if !is_numeric(&first) {
            return Self::After(second.unwrap_or(first).into());
        }
        match (numeric_size(&first), second) {
            (Some(size), Some(cursor)) => Self::SizeAfter(size, cursor.into()),
            (Some(size), None) => Self::Size(size),
            (None, Some(cursor)) => Self::After(cursor.into()),
            (None, None) => Self::Default,
        }
    }

    /// Effective page size and the cursor to seek past, if one is present.
    pub fn resolve(self, default_per_page: i64) -> (i64, Option<Cursor>) {
        let (size, cursor) = match self {
            Self::Default => (default_per_page, None),
            Self::Size(size) => (size, None),
            Self::After(cursor) => (default_per_page, Some(cursor)),
            Self::SizeAfter(size, cursor) => (size, Some(cursor)),
        };
        (size, cursor.filter(Cursor::is_present))
    }
}

fn is_numeric(value: &Bson) -> bool {
    matches!(value, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_))
}

/// `None` for non-numeric values and `NaN`. `NaN` would otherwise cast to a
/// limit of zero, which the server reads as unbounded.
fn numeric_size(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        Bson::Double(n) if n.is_nan() => None,
        Bson::Double(n) => Some(*n as i64),
        _ => None,
    }
}

fn saturating_size<N: TryInto<i64>>(size: N) -> i64 {
    size.try_into().unwrap_or(i64::MAX)
}

impl From<()> for Page {
    fn from(_: ()) -> Self {
        Self::Default
    }
}

impl From<i32> for Page {
    fn from(size: i32) -> Self {
        Self::Size(i64::from(size))
    }
}

impl From<i64> for Page {
    fn from(size: i64) -> Self {
        Self::Size(size)
    }
}

impl From<u32> for Page {
    fn from(size: u32) -> Self {
        Self::Size(i64::from(size))
    }
}

impl From<u64> for Page {
    fn from(size: u64) -> Self {
        Self::Size(saturating_size(size))
    }
}

impl From<usize> for Page {
    fn from(size: usize) -> Self {
        Self::Size(saturating_size(size))
    }
}

impl From<Cursor> for Page {
    fn from(cursor: Cursor) -> Self {
        Self::After(cursor)
    }
}

impl From<&str> for Page {
    fn from(cursor: &str) -> Self {
        Self::After(cursor.into())
    }
}

impl From<String> for Page {
    fn from(cursor: String) -> Self {
        Self::After(cursor.into())
    }
}

impl From<ObjectId> for Page {
    fn from(cursor: ObjectId) -> Self {
        Self::After(cursor.into())
    }
}

impl<T: Into<Cursor>> From<Option<T>> for Page {
    fn from(cursor: Option<T>) -> Self {
        Self::After(cursor.into())
    }
}

impl From<Bson> for Page {
    fn from(value: Bson) -> Self {
        match numeric_size(&value) {
            Some(size) => Self::Size(size),
            None if is_numeric(&value) => Self::Default,
            None => Self::After(value.into()),
        }
    }
}

impl<C: Into<Cursor>> From<(i32, C)> for Page {
    fn from((size, cursor): (i32, C)) -> Self {
        Self::SizeAfter(i64::from(size), cursor.into())
    }
}

impl<C: Into<Cursor>> From<(i64, C)> for Page {
    fn from((size, cursor): (i64, C)) -> Self {
        Self::SizeAfter(size, cursor.into())
    }
}

impl<C: Into<Cursor>> From<(usize, C)> for Page {
    fn from((size, cursor): (usize, C)) -> Self {
        Self::SizeAfter(saturating_size(size), cursor.into())
    }
}
