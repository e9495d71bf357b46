use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use innova_core::models::Document;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::AppError, state::{AppState, AuthConfig}};

// ============================================================================
// JWT Claims
// ============================================================================

/// Whatever identity object the client posted to `/jwt`, plus the standard
/// issued-at and expiry claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: Document,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}

pub fn verify_token(token: &str, auth: &AuthConfig) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

// ============================================================================
// Cookie Session Middleware
// ============================================================================

pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from the session cookie
    let jar = CookieJar::from_headers(req.headers());
    let token = jar
        .get(&state.auth.cookie_name)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(|| AppError::AuthenticationError("Unauthorized".to_string()))?;

    // 2. Verify signature and expiry
    let claims = verify_token(&token, &state.auth).map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        AppError::AuthenticationError("Unauthorized".to_string())
    })?;

    // 3. Inject claims into request extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
