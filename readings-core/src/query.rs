//! Query and sort specifications.
//!
//! The client runs exactly two query shapes, both driven by an equality filter:
//!
//! ```ignore
//! use readings_core::query::{Query, QuerySpec, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(QuerySpec::new().eq("user_id", "u1"))
//!     .sort("when", SortDirection::Desc)
//!     .build();
//! ```

use bson::{Bson, Document};

use crate::document::NATIVE_ID_FIELD;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// An ordered list of sort keys. Earlier keys take precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec {
    keys: Vec<Sort>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Appends a sort key.
    pub fn then(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.keys.push(Sort { field: field.into(), direction });
        self
    }

    pub fn asc(self, field: impl Into<String>) -> Self {
        self.then(field, SortDirection::Asc)
    }

    pub fn desc(self, field: impl Into<String>) -> Self {
        self.then(field, SortDirection::Desc)
    }

    pub fn keys(&self) -> &[Sort] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, SortDirection)> for SortSpec {
    fn from_iter<I: IntoIterator<Item = (S, SortDirection)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SortSpec::new(), |spec, (field, direction)| spec.then(field, direction))
    }
}

/// An equality filter: every listed field must equal the given value.
///
/// The empty specification matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec(Document);

impl QuerySpec {
    pub fn new() -> Self {
        QuerySpec(Document::new())
    }

    /// Matches the document whose native identifier equals `value`.
    pub fn by_native_id(value: impl Into<Bson>) -> Self {
        QuerySpec::new().eq(NATIVE_ID_FIELD, value)
    }

    /// Adds an equality condition, replacing any earlier condition on the same field.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Iterates over the `(field, expected value)` pairs in insertion order.
    pub fn conditions(&self) -> impl Iterator<Item = (&String, &Bson)> {
        self.0.iter()
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

impl From<Document> for QuerySpec {
    fn from(document: Document) -> Self {
        QuerySpec(document)
    }
}

/// A multi-document query: an equality filter plus an optional sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Filter every returned document must satisfy.
    pub filter: QuerySpec,
    /// Sort specification for results.
    pub sort: Option<SortSpec>,
}

impl Query {
    pub fn new(filter: QuerySpec, sort: Option<SortSpec>) -> Self {
        Query { filter, sort }
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the equality filter for this query.
    pub fn filter(mut self, filter: impl Into<QuerySpec>) -> Self {
        self.query.filter = filter.into();
        self
    }

    /// Appends a sort key to the query.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.sort = Some(
            self.query
                .sort
                .take()
                .unwrap_or_default()
                .then(field, direction),
        );
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn builder_accumulates_sort_keys_in_order() {
        let query = Query::builder()
            .filter(QuerySpec::new().eq("user_id", "u1"))
            .sort("when", SortDirection::Desc)
            .sort("title", SortDirection::Asc)
            .build();

        assert_eq!(query.filter.as_document(), &doc! { "user_id": "u1" });
        let keys = query.sort.unwrap();
        let fields = keys
            .keys()
            .iter()
            .map(|key| (key.field.as_str(), key.direction))
            .collect::<Vec<_>>();
        assert_eq!(fields, vec![("when", SortDirection::Desc), ("title", SortDirection::Asc)]);
    }

    #[test]
    fn sort_spec_collects_from_pairs() {
        let spec: SortSpec = [("when", SortDirection::Desc)].into_iter().collect();

        assert_eq!(spec, SortSpec::new().desc("when"));
    }

    #[test]
    fn by_native_id_targets_underscore_id() {
        let spec = QuerySpec::by_native_id(5);

        assert_eq!(spec.into_document(), doc! { "_id": 5 });
    }
}
