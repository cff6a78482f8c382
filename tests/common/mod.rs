//! In-memory stand-in for the driver: evaluates a `FindQuery` against a
//! `Vec<Document>` the way MongoDB would for the operators pagination emits.

#![allow(dead_code)]

use bson::{oid::ObjectId, Bson, Document};
use chrono::{Duration, TimeZone, Utc};
use efficient_pagination::{FindQuery, QuerySpec};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use std::cmp::Ordering;

/// Builds `count` customers whose `createdAt` grows with their insertion order.
/// `per_day` customers share each `createdAt` value.
pub fn customers(count: usize, per_day: usize) -> Vec<Document> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("Fixture date should be valid");

    (0..count)
        .map(|i| {
            let created_at = start + Duration::days((i / per_day.max(1)) as i64);
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let mut customer = Document::new();
            customer.insert("_id", object_id(i));
            customer.insert("firstName", first_name);
            customer.insert("lastName", last_name);
            customer.insert("createdAt", bson::DateTime::from_chrono(created_at));
            customer
        })
        .collect()
}

/// ObjectIds that sort in insertion order, like ids generated while inserting.
pub fn object_id(i: usize) -> ObjectId {
    let mut bytes = [0_u8; 12];
    bytes[..4].copy_from_slice(&1_704_067_200_u32.to_be_bytes());
    bytes[8..].copy_from_slice(&(i as u32).to_be_bytes());
    ObjectId::from_bytes(bytes)
}

/// Runs the query: filter, then sort, then limit.
pub fn execute(collection: &[Document], query: &FindQuery) -> Result<Vec<Document>, String> {
    let mut results: Vec<Document> = collection
        .iter()
        .filter(|document| matches(document, query.filter()))
        .cloned()
        .collect();

    if let Some(sort) = query.sort() {
        let mut keys = Vec::new();
        for (field, direction) in sort {
            let direction = match direction {
                Bson::Int32(1) | Bson::Int64(1) => Ordering::Less,
                Bson::Int32(-1) | Bson::Int64(-1) => Ordering::Greater,
                other => return Err(format!("Invalid sort direction for `{field}`: {other}")),
            };
            keys.push((field.clone(), direction));
        }

        results.sort_by(|a, b| {
            for (field, direction) in &keys {
                let ordering = compare_for_sort(a.get(field), b.get(field));
                if ordering != Ordering::Equal {
                    return if *direction == Ordering::Less { ordering } else { ordering.reverse() };
                }
            }
            Ordering::Equal
        });
    }

    if let Some(limit) = query.limit() {
        let limit = limit.unsigned_abs() as usize;
        if limit > 0 {
            results.truncate(limit);
        }
    }

    Ok(results)
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, condition)| {
        if key == "$and" {
            return match condition {
                Bson::Array(clauses) => clauses.iter().all(|clause| match clause {
                    Bson::Document(clause) => matches(document, clause),
                    _ => false,
                }),
                _ => false,
            };
        }

        let value = document.get(key);
        match condition {
            Bson::Document(operators) if operators.keys().all(|op| op.starts_with('$')) => operators
                .iter()
                .all(|(op, operand)| apply_operator(value, op, operand)),
            expected => value == Some(expected),
        }
    })
}

fn apply_operator(value: Option<&Bson>, op: &str, operand: &Bson) -> bool {
    let ordering = value.and_then(|value| compare(value, operand));
    match op {
        "$eq" => value == Some(operand),
        "$ne" => value != Some(operand),
        "$gt" => ordering == Some(Ordering::Greater),
        "$gte" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        "$lt" => ordering == Some(Ordering::Less),
        "$lte" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        other => panic!("Operator {other} is not supported by the test executor"),
    }
}

/// Comparison within one BSON type bracket. Values of different types never
/// satisfy a range operator.
fn compare(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (a, b) {
        (
            Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_),
            Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_),
        ) => as_f64(a).partial_cmp(&as_f64(b)),
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::ObjectId(a), Bson::ObjectId(b)) => Some(a.bytes().cmp(&b.bytes())),
        (Bson::DateTime(a), Bson::DateTime(b)) => {
            Some(a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_for_sort(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare(a, b).unwrap_or(Ordering::Equal),
    }
}

fn as_f64(value: &Bson) -> f64 {
    match value {
        Bson::Int32(n) => f64::from(*n),
        Bson::Int64(n) => *n as f64,
        Bson::Double(n) => *n,
        _ => f64::NAN,
    }
}

pub fn ids(page: &[Document]) -> Vec<Bson> {
    page.iter()
        .map(|document| document.get("_id").cloned().expect("Every document has an _id"))
        .collect()
}

pub fn created_at(document: &Document) -> i64 {
    document
        .get_datetime("createdAt")
        .expect("Every customer has a createdAt")
        .timestamp_millis()
}
