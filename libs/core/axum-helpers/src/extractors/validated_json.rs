//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Why a [`ValidatedJson`] body was rejected.
///
/// Handlers that need their own error body take
/// `Result<ValidatedJson<T>, ValidationRejection>` and map the rejection
/// into their domain error; otherwise it renders as an [`AppError`].
#[derive(Debug, Error)]
pub enum ValidationRejection {
    /// The body was not valid JSON or did not match the target type
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// The body deserialized but failed field validation
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => AppError::JsonExtractorRejection(rejection).into_response(),
            Self::Invalid(errors) => AppError::ValidationError(errors).into_response(),
        }
    }
}

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate` trait.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(max = 128))]
///     username: String,
///     #[validate(length(max = 128))]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     format!("Creating user: {}", payload.username)
/// }
///
/// let app = Router::new().route("/users", post(create_user));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
