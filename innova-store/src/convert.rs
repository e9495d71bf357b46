use innova_core::models::Document as JsonDocument;
use innova_core::{CoreError, CoreResult, DocumentId};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::de::DeserializeOwned;
use serde::Serialize;

const DUPLICATE_KEY: i32 = 11000;

pub(crate) fn object_id(id: &DocumentId) -> CoreResult<ObjectId> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| CoreError::ValidationError(format!("Invalid document id {}: {}", id, e)))
}

pub(crate) fn document_id(value: &Bson) -> CoreResult<DocumentId> {
    match value {
        Bson::ObjectId(oid) => DocumentId::parse(&oid.to_hex()),
        other => Err(CoreError::InternalError(format!("Unexpected _id type: {}", other))),
    }
}

/// Caller bodies never choose their own `_id`.
pub(crate) fn to_bson_document(mut body: JsonDocument) -> CoreResult<Document> {
    body.remove("_id");
    bson::to_document(&body)
        .map_err(|e| CoreError::ValidationError(format!("Body is not storable: {}", e)))
}

pub(crate) fn to_bson<T: Serialize>(value: &T) -> CoreResult<Bson> {
    bson::to_bson(value).map_err(|e| CoreError::InternalError(e.to_string()))
}

/// Renders `_id` as hex, the rest as relaxed extended JSON, then decodes `T`.
pub(crate) fn from_bson<T: DeserializeOwned>(mut doc: Document) -> CoreResult<T> {
    if let Ok(oid) = doc.get_object_id("_id") {
        doc.insert("_id", oid.to_hex());
    }
    let value = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(value)
        .map_err(|e| CoreError::InternalError(format!("Stored document has unexpected shape: {}", e)))
}

pub(crate) fn storage_error(err: mongodb::error::Error) -> CoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            CoreError::Conflict(write.message.clone())
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => {
            tracing::error!("Database unreachable: {}", err);
            CoreError::StorageUnavailable(err.to_string())
        }
        _ => {
            tracing::error!("Database operation failed: {}", err);
            CoreError::InternalError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innova_core::models::Room;
    use serde_json::json;

    #[test]
    fn test_from_bson_renders_hex_id() {
        let oid = ObjectId::new();
        let doc = bson::doc! {
            "_id": oid,
            "price_per_night": 150_i32,
            "availability": "available",
            "reviews": [],
        };

        let room: Room = from_bson(doc).unwrap();
        assert_eq!(room.id.as_str(), oid.to_hex());
        assert_eq!(room.price(), Some(150.0));
        assert_eq!(room.availability, Some(json!("available")));
    }

    #[test]
    fn test_to_bson_document_drops_caller_id() {
        let body = json!({ "_id": "mine", "email": "a@example.com" })
            .as_object()
            .cloned()
            .unwrap();

        let doc = to_bson_document(body).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("email").unwrap(), "a@example.com");
    }

    #[test]
    fn test_object_id_round_trip() {
        let oid = ObjectId::new();
        let id = document_id(&Bson::ObjectId(oid)).unwrap();
        assert_eq!(object_id(&id).unwrap(), oid);
    }
}
