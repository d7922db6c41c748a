use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::credential::errors::CredentialError;
use crate::credential::models::SubmittedCredentials;

pub mod authenticate;
pub mod protected;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError,
    UnprocessableEntity(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Validation(_)
            | CredentialError::DuplicateEmail
            | CredentialError::AuthFailure => ApiError::UnprocessableEntity(err.to_string()),
            // Reported to the caller exactly like a wrong password.
            CredentialError::InternalAnomaly(_) => {
                ApiError::UnprocessableEntity(CredentialError::AuthFailure.to_string())
            }
            CredentialError::Store(_) | CredentialError::Password(_) | CredentialError::Token(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Form body shared by registration and login.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsForm {
    email: Option<String>,
    password: Option<String>,
}

impl CredentialsForm {
    /// Turn an extracted form into submitted credentials.
    ///
    /// A body that cannot be parsed as a form counts as both fields missing.
    pub fn submitted(form: Result<Form<CredentialsForm>, FormRejection>) -> SubmittedCredentials {
        match form {
            Ok(Form(body)) => SubmittedCredentials {
                email: body.email,
                password: body.password,
            },
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Unreadable credentials form");
                SubmittedCredentials::default()
            }
        }
    }
}
