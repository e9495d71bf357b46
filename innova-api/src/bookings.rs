use axum::{
    extract::{Extension, Path, Query, State},
    middleware::from_fn_with_state,
    routing::{get, patch},
    Json, Router,
};
use innova_core::models::{Booking, Document};
use innova_core::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use innova_core::DocumentId;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::middleware::{session_auth_middleware, SessionClaims};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateUpdate {
    pub date: Value,
}

#[derive(Debug, Deserialize)]
pub struct ReviewGivenUpdate {
    #[serde(rename = "reviewGiven")]
    pub review_given: bool,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(list_bookings)
                .route_layer(from_fn_with_state(state, session_auth_middleware))
                .post(create_booking),
        )
        .route("/bookings/{id}", patch(update_date).delete(delete_booking))
        .route("/booking/{id}", patch(update_review_given))
}

/// The listing is scoped to the identity in the verified token. A query
/// `email` is accepted only when it names that same identity.
pub fn owner_email<'a>(claims: &'a SessionClaims, requested: Option<&str>) -> Result<&'a str, AppError> {
    let owner = claims
        .email()
        .ok_or_else(|| AppError::AuthorizationError("Session carries no email".to_string()))?;

    match requested {
        Some(email) if email != owner => Err(AppError::AuthorizationError(
            "Forbidden: bookings belong to another user".to_string(),
        )),
        _ => Ok(owner),
    }
}

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    Json(booking): Json<Document>,
) -> Result<Json<InsertOutcome>, AppError> {
    Ok(Json(state.bookings.create_booking(booking).await?))
}

/// GET /bookings?email=
async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let email = owner_email(&claims, query.email.as_deref())?;
    Ok(Json(state.bookings.bookings_for_email(email).await?))
}

/// PATCH /bookings/:id
async fn update_date(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DateUpdate>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let id = DocumentId::parse(&id)?;
    let outcome = state.bookings.set_date(&id, req.date).await?;
    info!("Booking {} date updated (matched {})", id, outcome.matched_count);
    Ok(Json(outcome))
}

/// DELETE /bookings/:id
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, AppError> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.bookings.delete_booking(&id).await?))
}

/// PATCH /booking/:id
async fn update_review_given(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewGivenUpdate>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.bookings.set_review_given(&id, req.review_given).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(identity: serde_json::Value) -> SessionClaims {
        SessionClaims {
            identity: identity.as_object().cloned().unwrap(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_owner_email_comes_from_token() {
        let claims = claims(json!({ "email": "owner@example.com" }));

        assert_eq!(owner_email(&claims, None).unwrap(), "owner@example.com");
        assert_eq!(owner_email(&claims, Some("owner@example.com")).unwrap(), "owner@example.com");
        assert!(matches!(
            owner_email(&claims, Some("someone@example.com")),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_owner_email_requires_identity() {
        let claims = claims(json!({ "name": "anonymous" }));
        assert!(matches!(owner_email(&claims, None), Err(AppError::AuthorizationError(_))));
    }
}
