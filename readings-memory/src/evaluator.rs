//! Filter evaluation and ordering for in-memory documents.

use std::{cmp::Ordering, collections::HashMap};
use bson::{Bson, Document, datetime::DateTime, oid::ObjectId};

use readings_core::query::{QuerySpec, SortDirection, SortSpec};


/// Type-erased, comparable representation of BSON values.
///
/// Integers of either width compare exactly; a `Double` compares as `f64`, so `Int32(3)`,
/// `Int64(3)` and `Double(3.0)` are equal. Values of different types order the way MongoDB
/// orders BSON types, with null lowest.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null value, also used for a missing field
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (`Int32` and `Int64`)
    Int(i64),
    /// Floating point value
    Double(f64),
    /// DateTime value
    DateTime(DateTime),
    /// ObjectId value
    ObjectId(ObjectId),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
    /// Any other BSON type; never equal to anything
    Opaque,
}

impl Comparable<'_> {
    /// Position of this value's type in MongoDB's cross-type sort order.
    fn type_rank(&self) -> Option<u8> {
        match self {
            Comparable::Null => Some(1),
            Comparable::Int(_) | Comparable::Double(_) => Some(2),
            Comparable::String(_) => Some(3),
            Comparable::Map(_) => Some(4),
            Comparable::Array(_) => Some(5),
            Comparable::ObjectId(_) => Some(7),
            Comparable::Bool(_) => Some(8),
            Comparable::DateTime(_) => Some(9),
            Comparable::Opaque => None,
        }
    }
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Int(i64::from(*value)),
            Bson::Int64(value) => Comparable::Int(*value),
            Bson::Double(value) => Comparable::Double(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            _ => Comparable::Opaque,
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Int(a), Comparable::Int(b)) => a == b,
            (Comparable::Double(a), Comparable::Double(b)) => a == b,
            (Comparable::Int(a), Comparable::Double(b)) => (*a as f64) == *b,
            (Comparable::Double(a), Comparable::Int(b)) => *a == (*b as f64),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => Some(Ordering::Equal),
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Int(a), Comparable::Int(b)) => a.partial_cmp(b),
            (Comparable::Double(a), Comparable::Double(b)) => a.partial_cmp(b),
            (Comparable::Int(a), Comparable::Double(b)) => (*a as f64).partial_cmp(b),
            (Comparable::Double(a), Comparable::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            (Comparable::Array(_), Comparable::Array(_)) | (Comparable::Map(_), Comparable::Map(_)) => {
                (self == other).then_some(Ordering::Equal)
            }
            _ => match (self.type_rank(), other.type_rank()) {
                (Some(a), Some(b)) if a != b => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
}


pub(crate) struct DocumentEvaluator;

impl DocumentEvaluator {
    /// Returns `true` if every condition in `filter` holds for `document`.
    ///
    /// A condition on a missing field never holds.
    pub fn matches(document: &Document, filter: &QuerySpec) -> bool {
        filter.conditions().all(|(field, expected)| {
            document
                .get(field)
                .is_some_and(|actual| Comparable::from(actual) == Comparable::from(expected))
        })
    }

    /// Orders two documents by the keys of `sort`, earlier keys first.
    ///
    /// A missing field sorts as null, below every other value. Mutually incomparable
    /// values compare as equal so a stable sort keeps their original order.
    pub fn compare(left: &Document, right: &Document, sort: &SortSpec) -> Ordering {
        for key in sort.keys() {
            let a = left
                .get(&key.field)
                .map(Comparable::from)
                .unwrap_or(Comparable::Null);
            let b = right
                .get(&key.field)
                .map(Comparable::from)
                .unwrap_or(Comparable::Null);

            let ordering = match key.direction {
                SortDirection::Asc => a.partial_cmp(&b),
                SortDirection::Desc => b.partial_cmp(&a),
            }
            .unwrap_or(Ordering::Equal);

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn numbers_compare_across_widths() {
        let filter = QuerySpec::new().eq("n", 3i64);

        assert!(DocumentEvaluator::matches(&doc! { "n": 3i32 }, &filter));
        assert!(DocumentEvaluator::matches(&doc! { "n": 3.0 }, &filter));
        assert!(!DocumentEvaluator::matches(&doc! { "n": 4 }, &filter));
    }

    #[test]
    fn missing_fields_never_match() {
        let filter = QuerySpec::new().eq("email", Bson::Null);

        assert!(!DocumentEvaluator::matches(&doc! { "name": "x" }, &filter));
        assert!(DocumentEvaluator::matches(&doc! { "email": Bson::Null }, &filter));
    }

    #[test]
    fn object_ids_are_distinguished() {
        let a = ObjectId::new();
        let b = ObjectId::new();

        assert!(DocumentEvaluator::matches(&doc! { "_id": a }, &QuerySpec::by_native_id(a)));
        assert!(!DocumentEvaluator::matches(&doc! { "_id": a }, &QuerySpec::by_native_id(b)));
    }

    #[test]
    fn later_keys_break_ties() {
        let sort = SortSpec::new().asc("group").desc("rank");
        let first = doc! { "group": 1, "rank": 9 };
        let second = doc! { "group": 1, "rank": 2 };
        let third = doc! { "group": 2, "rank": 10 };

        assert_eq!(DocumentEvaluator::compare(&first, &second, &sort), Ordering::Less);
        assert_eq!(DocumentEvaluator::compare(&second, &third, &sort), Ordering::Less);
        assert_eq!(DocumentEvaluator::compare(&first, &first, &sort), Ordering::Equal);
    }

    #[test]
    fn large_integers_compare_exactly() {
        let big = 1i64 << 53;
        let filter = QuerySpec::new().eq("n", big);

        assert!(DocumentEvaluator::matches(&doc! { "n": big }, &filter));
        assert!(!DocumentEvaluator::matches(&doc! { "n": big + 1 }, &filter));
        assert_eq!(
            DocumentEvaluator::compare(&doc! { "n": big }, &doc! { "n": big + 1 }, &SortSpec::new().asc("n")),
            Ordering::Less
        );
    }

    #[test]
    fn missing_sort_fields_order_as_lowest() {
        let mut docs = vec![
            doc! { "title": "none-1" },
            doc! { "title": "mid", "when": DateTime::from_millis(2_000) },
            doc! { "title": "none-2", "when": Bson::Null },
            doc! { "title": "new", "when": DateTime::from_millis(3_000) },
            doc! { "title": "old", "when": DateTime::from_millis(1_000) },
        ];

        let desc = SortSpec::new().desc("when");
        docs.sort_by(|a, b| DocumentEvaluator::compare(a, b, &desc));
        let titles = docs.iter().map(|doc| doc.get_str("title").unwrap()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["new", "mid", "old", "none-1", "none-2"]);

        let asc = SortSpec::new().asc("when");
        docs.sort_by(|a, b| DocumentEvaluator::compare(a, b, &asc));
        let titles = docs.iter().map(|doc| doc.get_str("title").unwrap()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["none-1", "none-2", "old", "mid", "new"]);
    }

    #[test]
    fn mixed_types_follow_bson_type_order() {
        let sort = SortSpec::new().asc("v");

        assert_eq!(DocumentEvaluator::compare(&doc! { "v": 10 }, &doc! { "v": "a" }, &sort), Ordering::Less);
        assert_eq!(
            DocumentEvaluator::compare(&doc! { "v": "z" }, &doc! { "v": ObjectId::new() }, &sort),
            Ordering::Less
        );
        assert_eq!(DocumentEvaluator::compare(&doc! { "v": 2 }, &doc! { "v": 2.0 }, &sort), Ordering::Equal);
    }
}
