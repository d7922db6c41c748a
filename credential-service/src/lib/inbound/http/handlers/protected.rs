use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn protected(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<ProtectedResponseData> {
    tracing::debug!(credential_id = %user.credential_id, "Protected route accessed");

    ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: "This is a protected route.".to_string(),
            email: user.email,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub email: String,
}
