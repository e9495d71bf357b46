use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use innova_core::models::Document;
use innova_store::app_config::Deployment;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use crate::{state::{AppState, AuthConfig}, error::AppError, middleware::auth::SessionClaims};

#[derive(Debug, Serialize)]
struct SessionResponse {
    success: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_session))
        .route("/logout", post(logout))
}

pub fn issue_token(mut identity: Document, auth: &AuthConfig) -> Result<String, AppError> {
    // Time claims are ours to set
    identity.remove("iat");
    identity.remove("exp");

    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        identity,
        iat: now,
        exp: now + auth.expiration as i64,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

/// Cross-site frontends need `SameSite=None; Secure` in production; local
/// development runs over plain http on one site.
fn session_cookie(auth: &AuthConfig, value: String) -> Cookie<'static> {
    let production = auth.deployment == Deployment::Production;

    Cookie::build((auth.cookie_name.clone(), value))
        .http_only(true)
        .path("/")
        .secure(production)
        .same_site(if production { SameSite::None } else { SameSite::Strict })
        .build()
}

async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Document>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    tracing::debug!("Issuing session for {:?}", identity.get("email"));
    let token = issue_token(identity, &state.auth)?;

    let mut cookie = session_cookie(&state.auth, token);
    cookie.set_max_age(time::Duration::seconds(state.auth.expiration as i64));

    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<SessionResponse>) {
    let mut cookie = session_cookie(&state.auth, String::new());
    cookie.make_removal();

    (jar.add(cookie), Json(SessionResponse { success: true }))
}
