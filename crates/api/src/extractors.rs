//! Request extractors.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::error_response;

/// JSON body that is deserialized strictly and then validated.
///
/// Malformed bodies, unknown fields, and failed validation rules are
/// rejected with `400` before a handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_payload",
                    rejection.body_text(),
                )
            })?;

        value.validate().map_err(|errors| {
            error_response(
                StatusCode::BAD_REQUEST,
                "validation_error",
                errors.to_string(),
            )
        })?;

        Ok(Self(value))
    }
}

/// Path parameters with a JSON error body on rejection.
///
/// A malformed id in the URL yields `400 invalid_path` instead of axum's
/// plain-text rejection.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_path",
                    rejection.body_text(),
                )
            })?;

        Ok(Self(value))
    }
}
