use async_trait::async_trait;
use serde_json::Value;

use crate::models::{Availability, Booking, Document, PriceRange, Review, Room};
use crate::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::{CoreResult, DocumentId};

/// Repository trait for the `rooms` collection
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list_rooms(&self) -> CoreResult<Vec<Room>>;

    async fn rooms_in_price_range(&self, range: PriceRange) -> CoreResult<Vec<Room>>;

    /// `Ok(None)` when no room carries the id.
    async fn get_room(&self, id: &DocumentId) -> CoreResult<Option<Room>>;

    async fn set_availability(
        &self,
        id: &DocumentId,
        availability: Availability,
    ) -> CoreResult<UpdateOutcome>;

    /// Appends to the room's embedded `reviews` array.
    async fn push_review(&self, id: &DocumentId, review: Document) -> CoreResult<UpdateOutcome>;
}

/// Repository trait for the `bookings` collection
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: Document) -> CoreResult<InsertOutcome>;

    async fn bookings_for_email(&self, email: &str) -> CoreResult<Vec<Booking>>;

    async fn set_date(&self, id: &DocumentId, date: Value) -> CoreResult<UpdateOutcome>;

    async fn set_review_given(&self, id: &DocumentId, review_given: bool) -> CoreResult<UpdateOutcome>;

    async fn delete_booking(&self, id: &DocumentId) -> CoreResult<DeleteOutcome>;
}

/// Repository trait for the standalone `reviews` collection
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create_review(&self, review: Document) -> CoreResult<InsertOutcome>;

    /// Every review, newest `timestamp` first.
    async fn list_reviews(&self) -> CoreResult<Vec<Review>>;
}
