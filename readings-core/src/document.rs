//! Document normalization and typed decoding.
//!
//! Documents travel through the client as plain [`bson::Document`] values. Single-document
//! lookups are normalized with [`normalize`], which derives a string `id` field from the
//! store-native `_id`. Multi-document lookups are returned raw.

use bson::{Bson, Document, de::deserialize_from_document};
use serde::de::DeserializeOwned;

use crate::error::DocumentStoreResult;

/// Name of the field holding the store-assigned identifier.
pub const NATIVE_ID_FIELD: &str = "_id";

/// Name of the string identifier field derived by [`normalize`].
pub const ID_FIELD: &str = "id";

/// Renders a native identifier as a string.
///
/// ObjectIds become their 24 character hex form and strings are used verbatim.
/// Anything else falls back to its BSON display form.
pub fn stringify_id(value: &Bson) -> String {
    match value {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Normalizes a document returned by a single-document lookup.
///
/// All fields are kept. If the document has a `_id` and no `id`, an `id` holding the
/// stringified `_id` is appended. An existing `id` is never overwritten.
pub fn normalize(mut document: Document) -> Document {
    if document.contains_key(ID_FIELD) {
        return document;
    }

    if let Some(native) = document.get(NATIVE_ID_FIELD) {
        let id = stringify_id(native);
        document.insert(ID_FIELD, id);
    }

    document
}

/// Decodes a document into a typed record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> DocumentStoreResult<T> {
    Ok(deserialize_from_document(document)?)
}
