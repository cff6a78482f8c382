use bson::{Bson, Document};

/// What the paginator needs from a query builder.
///
/// Implementors own the sort criteria, the filter and the result limit of a
/// query that some other layer executes.
pub trait QuerySpec {
    /// Current sort criteria, in declaration order.
    fn sort(&self) -> Option<&Document>;

    /// Sets the direction of a sort field. A new field goes last; an existing
    /// one keeps its position.
    fn set_sort_field(&mut self, field: &str, direction: Bson);

    /// Adds a condition that must hold alongside every existing filter.
    fn and_filter(&mut self, condition: Document);

    fn set_limit(&mut self, limit: i64);
}

/// Merges `condition` into `filter` as a conjunction.
///
/// Keys the filter does not mention yet are inserted directly. A key that is
/// already constrained is moved into a `$and` clause together with the new
/// condition, so neither constraint replaces the other.
pub fn and_condition(filter: &mut Document, condition: Document) {
    for (key, value) in condition {
        if !filter.contains_key(&key) {
            filter.insert(key, value);
            continue;
        }

        let mut clause = Document::new();
        clause.insert(key, value);

        match filter.get_mut("$and") {
            Some(Bson::Array(clauses)) => clauses.push(Bson::Document(clause)),
            Some(existing) => {
                let previous = std::mem::replace(existing, Bson::Null);
                *existing = Bson::Array(vec![previous, Bson::Document(clause)]);
            }
            None => {
                filter.insert("$and", vec![Bson::Document(clause)]);
            }
        }
    }
}
