use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsForm;
use crate::credential::models::AuthenticationOutcome;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate<S: CredentialServicePort>(
    State(state): State<AppState<S>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    state
        .credential_service
        .authenticate(CredentialsForm::submitted(form))
        .await
        .map_err(ApiError::from)
        .map(|outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub email: String,
    pub auth_token: String,
}

impl From<AuthenticationOutcome> for AuthenticateResponseData {
    fn from(outcome: AuthenticationOutcome) -> Self {
        Self {
            email: outcome.email,
            auth_token: outcome.token.into_string(),
        }
    }
}
