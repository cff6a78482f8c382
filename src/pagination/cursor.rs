use crate::{PaginationError, PaginationResult};
use bson::{oid::ObjectId, Bson, Document};
use serde::Serialize;
use std::fmt::Display;

/// The identifier of the last document of the previous page.
///
/// Cursors are opaque: nothing is assumed about the value beyond the
/// database being able to order it against the identifier field.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor(Bson);

impl Cursor {
    pub fn new(value: impl Into<Bson>) -> Self {
        Self(value.into())
    }

    /// A cursor that applies no boundary.
    pub fn none() -> Self {
        Self(Bson::Null)
    }

    /// Parses a hex string into an `ObjectId` cursor, rejecting malformed input.
    ///
    /// The paginator itself never validates cursors. This is for callers that
    /// want to fail early on a bad cursor coming from a request.
    pub fn object_id(hex: &str) -> PaginationResult<Self> {
        Ok(Self(Bson::ObjectId(ObjectId::parse_str(hex)?)))
    }

    /// Reads the cursor for the next page out of a returned document.
    pub fn from_document(document: &Document, id_field: &str) -> PaginationResult<Self> {
        document
            .get(id_field)
            .cloned()
            .map(Self)
            .ok_or_else(|| PaginationError::MissingId(id_field.to_string()))
    }

    /// Same as [`Cursor::from_document`] for a typed model.
    pub fn from_record<T: Serialize>(record: &T, id_field: &str) -> PaginationResult<Self> {
        let document = bson::to_document(record)?;
        Self::from_document(&document, id_field)
    }

    /// Cursor for the page after `page`, or `None` when the page is empty.
    pub fn after_last(page: &[Document], id_field: &str) -> PaginationResult<Option<Self>> {
        page.last()
            .map(|document| Self::from_document(document, id_field))
            .transpose()
    }

    /// Whether this cursor should produce a boundary filter.
    ///
    /// Falsy values do not: null, undefined, `false`, numeric zero, `NaN` and
    /// the empty string. An identifier field holding one of these cannot be
    /// paged past.
    pub fn is_present(&self) -> bool {
        match &self.0 {
            Bson::Null | Bson::Undefined | Bson::Boolean(false) => false,
            Bson::Int32(0) | Bson::Int64(0) => false,
            Bson::Double(n) => !(*n == 0.0 || n.is_nan()),
            Bson::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The value compared against the identifier field.
    ///
    /// Strings holding a valid ObjectId are cast to `ObjectId` when
    /// `cast_object_ids` is set, so the database compares them with the
    /// identifier's native ordering instead of across BSON types. Every other
    /// value is used as is.
    pub fn canonical(&self, cast_object_ids: bool) -> Bson {
        match &self.0 {
            Bson::String(s) if cast_object_ids => ObjectId::parse_str(s)
                .map(Bson::ObjectId)
                .unwrap_or_else(|_| self.0.clone()),
            value => value.clone(),
        }
    }

    pub fn as_bson(&self) -> &Bson {
        &self.0
    }

    pub fn into_inner(self) -> Bson {
        self.0
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::none()
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Bson::String(s) => write!(f, "{s}"),
            Bson::ObjectId(oid) => write!(f, "{}", oid.to_hex()),
            value => write!(f, "{value}"),
        }
    }
}

impl From<Bson> for Cursor {
    fn from(value: Bson) -> Self {
        Self(value)
    }
}

impl From<&Bson> for Cursor {
    fn from(value: &Bson) -> Self {
        Self(value.clone())
    }
}

impl From<ObjectId> for Cursor {
    fn from(value: ObjectId) -> Self {
        Self(Bson::ObjectId(value))
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(Bson::String(value.to_string()))
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(Bson::String(value))
    }
}

impl From<&String> for Cursor {
    fn from(value: &String) -> Self {
        Self(Bson::String(value.clone()))
    }
}

impl From<i32> for Cursor {
    fn from(value: i32) -> Self {
        Self(Bson::Int32(value))
    }
}

impl From<i64> for Cursor {
    fn from(value: i64) -> Self {
        Self(Bson::Int64(value))
    }
}

impl<T: Into<Cursor>> From<Option<T>> for Cursor {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::none, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    const HEX: &str = "52c1190207d5dbccda00000f";

    #[test]
    fn test_absent_cursors() {
        assert!(!Cursor::none().is_present(), "Null cursor should be absent");
        assert!(!Cursor::from("").is_present(), "Empty string cursor should be absent");
        assert!(!Cursor::from(None::<&str>).is_present(), "None should map to an absent cursor");
        assert!(!Cursor::new(Bson::Undefined).is_present());
    }

    #[test]
    fn test_falsy_cursors_are_absent() {
        for value in [
            Bson::Boolean(false),
            Bson::Int32(0),
            Bson::Int64(0),
            Bson::Double(0.0),
            Bson::Double(-0.0),
            Bson::Double(f64::NAN),
        ] {
            assert!(!Cursor::new(value.clone()).is_present(), "{value} should not bound the page");
        }
    }

    #[test]
    fn test_truthy_scalars_are_present() {
        assert!(Cursor::new(true).is_present());
        assert!(Cursor::new(-1_i32).is_present());
        assert!(Cursor::new(0.5_f64).is_present());
    }

    #[test]
    fn test_present_cursors() {
        assert!(Cursor::from(HEX).is_present());
        assert!(Cursor::from(ObjectId::new()).is_present());
        assert!(Cursor::from(Some(42_i64)).is_present());
    }

    #[test]
    fn test_canonical_casts_object_id_strings() {
        let expected = ObjectId::parse_str(HEX).expect("Fixture should be a valid ObjectId");
        assert_eq!(Cursor::from(HEX).canonical(true), Bson::ObjectId(expected));
        assert_eq!(Cursor::from(HEX).canonical(false), Bson::String(HEX.to_string()));
    }

    #[test]
    fn test_canonical_keeps_other_values() {
        assert_eq!(Cursor::from("customer-42").canonical(true), Bson::String("customer-42".into()));
        assert_eq!(Cursor::from(7_i32).canonical(true), Bson::Int32(7));
    }

    #[test]
    fn test_strict_object_id_parsing() {
        assert!(Cursor::object_id(HEX).is_ok(), "Valid hex should parse");
        let err = Cursor::object_id("not-an-id").expect_err("Malformed hex should be rejected");
        assert!(matches!(err, PaginationError::InvalidCursor(_)));
    }

    #[test]
    fn test_cursor_from_last_document() {
        let page = vec![doc! { "_id": 1, "name": "a" }, doc! { "_id": 2, "name": "b" }];
        let cursor = Cursor::after_last(&page, "_id")
            .expect("Documents carry an _id")
            .expect("Page is not empty");
        assert_eq!(cursor.as_bson(), &Bson::Int32(2));
        assert_eq!(cursor.into_inner(), Bson::Int32(2));

        assert_eq!(Cursor::after_last(&[], "_id").expect("Empty page is fine"), None);
    }

    #[test]
    fn test_cursor_from_document_without_id() {
        let err = Cursor::from_document(&doc! { "name": "a" }, "_id").expect_err("No _id present");
        assert!(matches!(err, PaginationError::MissingId(field) if field == "_id"));
    }

    #[test]
    fn test_cursor_from_record() {
        #[derive(serde_derive::Serialize)]
        struct Customer {
            #[serde(rename = "_id")]
            id: ObjectId,
            first_name: String,
        }

        let id = ObjectId::new();
        let customer = Customer { id, first_name: "test-1".into() };
        let cursor = Cursor::from_record(&customer, "_id").expect("Record should serialize");
        assert_eq!(cursor, Cursor::from(id));
        assert_eq!(cursor.to_string(), id.to_hex());
    }
}
