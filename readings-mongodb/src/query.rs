//! Translation of readings query types into MongoDB query syntax.

use bson::{Document, doc};

use readings_core::query::{QuerySpec, SortDirection, SortSpec};


/// Translates equality filters and sort keys into MongoDB BSON documents.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// An equality filter is already a valid MongoDB filter document.
    pub(crate) fn filter(spec: &QuerySpec) -> Document {
        spec.as_document().clone()
    }

    /// Builds the ordered `{ field: 1 | -1, ... }` sort document.
    pub(crate) fn sort(spec: &SortSpec) -> Document {
        spec.keys()
            .iter()
            .fold(doc! {}, |mut sort, key| {
                sort.insert(
                    key.field.clone(),
                    match key.direction {
                        SortDirection::Asc => 1,
                        SortDirection::Desc => -1,
                    },
                );
                sort
            })
    }
}
