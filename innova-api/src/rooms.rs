use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use innova_core::models::{Availability, Document, PriceRange, Room};
use innova_core::outcome::UpdateOutcome;
use innova_core::DocumentId;
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request Types
// ============================================================================

/// Bounds arrive as raw query text so a missing or non-numeric value can be
/// reported as a validation error instead of a generic rejection.
#[derive(Debug, Deserialize)]
pub struct PriceFilter {
    pub gte: Option<String>,
    pub lte: Option<String>,
}

impl PriceFilter {
    pub fn into_range(self) -> Result<PriceRange, AppError> {
        Ok(PriceRange {
            gte: parse_bound("gte", self.gte)?,
            lte: parse_bound("lte", self.lte)?,
        })
    }
}

fn parse_bound(name: &str, raw: Option<String>) -> Result<f64, AppError> {
    let raw = raw.ok_or_else(|| AppError::ValidationError(format!("Missing query parameter '{}'", name)))?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::ValidationError(format!("Query parameter '{}' must be a number", name)))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityUpdate {
    pub availability: Availability,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/filter", get(filter_rooms))
        .route("/room-details/{id}", get(get_room))
        .route("/rooms/{id}", patch(update_availability))
        .route("/add-review/{id}", patch(add_room_review))
}

/// GET /rooms
async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.rooms.list_rooms().await?))
}

/// GET /filter?gte=&lte=
async fn filter_rooms(
    State(state): State<AppState>,
    Query(filter): Query<PriceFilter>,
) -> Result<Json<Vec<Room>>, AppError> {
    let range = filter.into_range()?;
    Ok(Json(state.rooms.rooms_in_price_range(range).await?))
}

/// GET /room-details/:id
/// An unknown id yields `null`, not 404.
async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Room>>, AppError> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.rooms.get_room(&id).await?))
}

/// PATCH /rooms/:id
async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AvailabilityUpdate>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let id = DocumentId::parse(&id)?;
    let outcome = state.rooms.set_availability(&id, req.availability).await?;
    tracing::info!("Room {} availability updated (matched {})", id, outcome.matched_count);
    Ok(Json(outcome))
}

/// PATCH /add-review/:id
/// The whole request body becomes the embedded review.
async fn add_room_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(review): Json<Document>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.rooms.push_review(&id, review).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_filter_parsing() {
        let range = PriceFilter { gte: Some("100".into()), lte: Some(" 250.5 ".into()) }
            .into_range()
            .unwrap();
        assert_eq!(range, PriceRange { gte: 100.0, lte: 250.5 });

        assert!(PriceFilter { gte: None, lte: Some("1".into()) }.into_range().is_err());
        assert!(PriceFilter { gte: Some("abc".into()), lte: Some("1".into()) }.into_range().is_err());
        assert!(PriceFilter { gte: Some("NaN".into()), lte: Some("1".into()) }.into_range().is_err());
    }
}
