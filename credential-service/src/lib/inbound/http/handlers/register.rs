use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsForm;
use crate::credential::models::RegistrationOutcome;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub const ACCOUNT_CREATED_MESSAGE: &str =
    "Account has been created! Check your email to validate your account.";

pub async fn register<S: CredentialServicePort>(
    State(state): State<AppState<S>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .credential_service
        .register(CredentialsForm::submitted(form))
        .await
        .map_err(ApiError::from)
        .map(|outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub success: String,
    pub auth_token: String,
}

impl From<RegistrationOutcome> for RegisterResponseData {
    fn from(outcome: RegistrationOutcome) -> Self {
        Self {
            success: ACCOUNT_CREATED_MESSAGE.to_string(),
            auth_token: outcome.token.into_string(),
        }
    }
}
