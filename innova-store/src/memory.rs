//! In-memory document store for local runs and tests.
//!
//! Mirrors the observable behavior of the MongoDB repositories: generated
//! ObjectId-style identifiers, insertion-ordered scans, `matchedCount` /
//! `modifiedCount` semantics on updates, and newest-first review listing.

use async_trait::async_trait;
use innova_core::models::{
    compare_values, Availability, Booking, Document, PriceRange, Review, Room,
};
use innova_core::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use innova_core::repository::{BookingRepository, ReviewRepository, RoomRepository};
use innova_core::{CoreError, CoreResult, DocumentId};
use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collection {
    docs: RwLock<Vec<Document>>,
}

impl Collection {
    async fn insert(&self, mut doc: Document) -> CoreResult<DocumentId> {
        let id = DocumentId::parse(&ObjectId::new().to_hex())?;
        doc.insert("_id".to_string(), Value::String(id.to_string()));
        self.docs.write().await.push(doc);
        Ok(id)
    }

    async fn find<T, F>(&self, matches: F) -> CoreResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(&Document) -> bool,
    {
        let docs = self.docs.read().await;
        docs.iter().filter(|d| matches(*d)).map(decode).collect()
    }

    async fn find_by_id<T: DeserializeOwned>(&self, id: &DocumentId) -> CoreResult<Option<T>> {
        let docs = self.docs.read().await;
        docs.iter().find(|d| has_id(d, id)).map(decode).transpose()
    }

    /// Applies `update` to the matching document; it reports whether anything changed.
    async fn update_one<F>(&self, id: &DocumentId, update: F) -> CoreResult<UpdateOutcome>
    where
        F: FnOnce(&mut Document) -> CoreResult<bool>,
    {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|d| has_id(d, id)) {
            Some(doc) => {
                let modified = update(doc)?;
                Ok(UpdateOutcome::new(1, modified as u64))
            }
            None => Ok(UpdateOutcome::new(0, 0)),
        }
    }

    async fn set_field(&self, id: &DocumentId, field: &str, value: Value) -> CoreResult<UpdateOutcome> {
        self.update_one(id, |doc| {
            let previous = doc.insert(field.to_string(), value.clone());
            Ok(previous.as_ref() != Some(&value))
        })
        .await
    }

    async fn delete_one(&self, id: &DocumentId) -> DeleteOutcome {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        if let Some(pos) = docs.iter().position(|d| has_id(d, id)) {
            docs.remove(pos);
        }
        DeleteOutcome::new((before - docs.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    rooms: Collection,
    bookings: Collection,
    reviews: Collection,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rooms are managed outside this service; this seeds one directly.
    pub async fn seed_room(&self, room: Document) -> CoreResult<DocumentId> {
        self.rooms.insert(without_id(room)).await
    }
}

fn without_id(mut doc: Document) -> Document {
    doc.remove("_id");
    doc
}

fn has_id(doc: &Document, id: &DocumentId) -> bool {
    doc.get("_id").and_then(Value::as_str) == Some(id.as_str())
}

fn decode<T: DeserializeOwned>(doc: &Document) -> CoreResult<T> {
    serde_json::from_value(Value::Object(doc.clone()))
        .map_err(|e| CoreError::InternalError(format!("Stored document has unexpected shape: {}", e)))
}

fn to_value<T: serde::Serialize>(value: &T) -> CoreResult<Value> {
    serde_json::to_value(value).map_err(|e| CoreError::InternalError(e.to_string()))
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn list_rooms(&self) -> CoreResult<Vec<Room>> {
        self.rooms.find(|_| true).await
    }

    async fn rooms_in_price_range(&self, range: PriceRange) -> CoreResult<Vec<Room>> {
        self.rooms
            .find(|doc| {
                doc.get("price_per_night")
                    .and_then(Value::as_f64)
                    .is_some_and(|price| range.contains(price))
            })
            .await
    }

    async fn get_room(&self, id: &DocumentId) -> CoreResult<Option<Room>> {
        self.rooms.find_by_id(id).await
    }

    async fn set_availability(
        &self,
        id: &DocumentId,
        availability: Availability,
    ) -> CoreResult<UpdateOutcome> {
        self.rooms.set_field(id, "availability", to_value(&availability)?).await
    }

    async fn push_review(&self, id: &DocumentId, review: Document) -> CoreResult<UpdateOutcome> {
        let review = Value::Object(without_id(review));
        self.rooms
            .update_one(id, move |doc| {
                let reviews = doc
                    .entry("reviews")
                    .or_insert_with(|| Value::Array(Vec::new()));
                match reviews {
                    Value::Array(list) => {
                        list.push(review);
                        Ok(true)
                    }
                    _ => Err(CoreError::ValidationError(
                        "The field 'reviews' must be an array".to_string(),
                    )),
                }
            })
            .await
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_booking(&self, booking: Document) -> CoreResult<InsertOutcome> {
        let id = self.bookings.insert(without_id(booking)).await?;
        Ok(InsertOutcome::new(id))
    }

    async fn bookings_for_email(&self, email: &str) -> CoreResult<Vec<Booking>> {
        self.bookings
            .find(|doc| doc.get("email").and_then(Value::as_str) == Some(email))
            .await
    }

    async fn set_date(&self, id: &DocumentId, date: Value) -> CoreResult<UpdateOutcome> {
        self.bookings.set_field(id, "date", date).await
    }

    async fn set_review_given(&self, id: &DocumentId, review_given: bool) -> CoreResult<UpdateOutcome> {
        self.bookings.set_field(id, "reviewGiven", Value::Bool(review_given)).await
    }

    async fn delete_booking(&self, id: &DocumentId) -> CoreResult<DeleteOutcome> {
        Ok(self.bookings.delete_one(id).await)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn create_review(&self, review: Document) -> CoreResult<InsertOutcome> {
        let id = self.reviews.insert(without_id(review)).await?;
        Ok(InsertOutcome::new(id))
    }

    async fn list_reviews(&self) -> CoreResult<Vec<Review>> {
        let mut docs: Vec<Document> = self.reviews.docs.read().await.clone();
        // Descending in store type order, so absent timestamps come last
        docs.sort_by(|a, b| compare_values(b.get("timestamp"), a.get("timestamp")));
        docs.iter().map(decode).collect()
    }
}
