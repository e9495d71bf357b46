use async_trait::async_trait;
use futures_util::TryStreamExt;
use innova_core::models::{Booking, Document as JsonDocument};
use innova_core::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use innova_core::repository::BookingRepository;
use innova_core::{CoreResult, DocumentId};
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;
use serde_json::Value;
use tracing::info;

use crate::convert::{document_id, from_bson, object_id, storage_error, to_bson, to_bson_document};
use crate::database::{DbClient, BOOKINGS};

pub struct MongoBookingRepository {
    collection: Collection<Document>,
}

impl MongoBookingRepository {
    pub fn new(db: &DbClient) -> Self {
        Self { collection: db.collection(BOOKINGS) }
    }

    async fn set_field(&self, id: &DocumentId, field: &str, value: Bson) -> CoreResult<UpdateOutcome> {
        let mut set = Document::new();
        set.insert(field, value);

        let result = self
            .collection
            .update_one(doc! { "_id": object_id(id)? }, doc! { "$set": set })
            .await
            .map_err(storage_error)?;

        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn create_booking(&self, booking: JsonDocument) -> CoreResult<InsertOutcome> {
        let result = self
            .collection
            .insert_one(to_bson_document(booking)?)
            .await
            .map_err(storage_error)?;

        let id = document_id(&result.inserted_id)?;
        info!("Booking created: {}", id);
        Ok(InsertOutcome::new(id))
    }

    async fn bookings_for_email(&self, email: &str) -> CoreResult<Vec<Booking>> {
        let docs: Vec<Document> = self
            .collection
            .find(doc! { "email": email })
            .await
            .map_err(storage_error)?
            .try_collect()
            .await
            .map_err(storage_error)?;

        docs.into_iter().map(from_bson).collect()
    }

    async fn set_date(&self, id: &DocumentId, date: Value) -> CoreResult<UpdateOutcome> {
        self.set_field(id, "date", to_bson(&date)?).await
    }

    async fn set_review_given(&self, id: &DocumentId, review_given: bool) -> CoreResult<UpdateOutcome> {
        self.set_field(id, "reviewGiven", Bson::Boolean(review_given)).await
    }

    async fn delete_booking(&self, id: &DocumentId) -> CoreResult<DeleteOutcome> {
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(storage_error)?;

        if result.deleted_count > 0 {
            info!("Booking deleted: {}", id);
        }
        Ok(DeleteOutcome::new(result.deleted_count))
    }
}
