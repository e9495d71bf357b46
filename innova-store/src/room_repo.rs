use async_trait::async_trait;
use futures_util::TryStreamExt;
use innova_core::models::{Availability, Document as JsonDocument, PriceRange, Room};
use innova_core::outcome::UpdateOutcome;
use innova_core::repository::RoomRepository;
use innova_core::{CoreResult, DocumentId};
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use crate::convert::{from_bson, object_id, storage_error, to_bson, to_bson_document};
use crate::database::{DbClient, ROOMS};

pub struct MongoRoomRepository {
    collection: Collection<Document>,
}

impl MongoRoomRepository {
    pub fn new(db: &DbClient) -> Self {
        Self { collection: db.collection(ROOMS) }
    }

    async fn find_many(&self, filter: Document) -> CoreResult<Vec<Room>> {
        let docs: Vec<Document> = self
            .collection
            .find(filter)
            .await
            .map_err(storage_error)?
            .try_collect()
            .await
            .map_err(storage_error)?;

        docs.into_iter().map(from_bson).collect()
    }
}

#[async_trait]
impl RoomRepository for MongoRoomRepository {
    async fn list_rooms(&self) -> CoreResult<Vec<Room>> {
        self.find_many(doc! {}).await
    }

    async fn rooms_in_price_range(&self, range: PriceRange) -> CoreResult<Vec<Room>> {
        self.find_many(doc! {
            "price_per_night": { "$gte": range.gte, "$lte": range.lte }
        })
        .await
    }

    async fn get_room(&self, id: &DocumentId) -> CoreResult<Option<Room>> {
        let found = self
            .collection
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(storage_error)?;

        found.map(from_bson).transpose()
    }

    async fn set_availability(
        &self,
        id: &DocumentId,
        availability: Availability,
    ) -> CoreResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": object_id(id)? },
                doc! { "$set": { "availability": to_bson(&availability)? } },
            )
            .await
            .map_err(storage_error)?;

        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }

    async fn push_review(&self, id: &DocumentId, review: JsonDocument) -> CoreResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": object_id(id)? },
                doc! { "$push": { "reviews": to_bson_document(review)? } },
            )
            .await
            .map_err(storage_error)?;

        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }
}
