use auth::TokenVerification;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::credential::models::CredentialId;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated credential in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub credential_id: CredentialId,
    pub email: String,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate<S: CredentialServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = match state.authenticator.inspect_token(token) {
        TokenVerification::Valid(claims) => claims,
        TokenVerification::Expired => {
            tracing::debug!("Rejected expired token");
            return Err(unauthorized("Token has expired"));
        }
        outcome => {
            tracing::warn!(outcome = ?outcome, "Token validation failed");
            return Err(unauthorized("Invalid token"));
        }
    };

    let credential_id = CredentialId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse credential ID from token: {}", e);
        unauthorized("Invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        credential_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}
