use async_trait::async_trait;
use futures_util::TryStreamExt;
use innova_core::models::{Document as JsonDocument, Review};
use innova_core::outcome::InsertOutcome;
use innova_core::repository::ReviewRepository;
use innova_core::CoreResult;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use crate::convert::{document_id, from_bson, storage_error, to_bson_document};
use crate::database::{DbClient, REVIEWS};

pub struct MongoReviewRepository {
    collection: Collection<Document>,
}

impl MongoReviewRepository {
    pub fn new(db: &DbClient) -> Self {
        Self { collection: db.collection(REVIEWS) }
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn create_review(&self, review: JsonDocument) -> CoreResult<InsertOutcome> {
        let result = self
            .collection
            .insert_one(to_bson_document(review)?)
            .await
            .map_err(storage_error)?;

        Ok(InsertOutcome::new(document_id(&result.inserted_id)?))
    }

    async fn list_reviews(&self) -> CoreResult<Vec<Review>> {
        let docs: Vec<Document> = self
            .collection
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .await
            .map_err(storage_error)?
            .try_collect()
            .await
            .map_err(storage_error)?;

        docs.into_iter().map(from_bson).collect()
    }
}
