//! Extractors whose rejections use the API error body.

use std::str::FromStr;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// [`Json`] that reports unreadable bodies as a validation failure.
pub(crate) struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid("body", rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// [`Query`] that reports malformed query strings as a validation failure.
pub(crate) struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid("query", rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Raw path segments, parsed into typed ids by the handlers.
pub(crate) struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid("path", rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Parse an id taken from the path or a payload.
pub(crate) fn parse_id<T: FromStr>(attribute: &'static str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid(attribute, format!("Invalid id '{raw}'")))
}

/// Parse an optional query parameter; an empty value counts as absent.
pub(crate) fn parse_param<T: FromStr>(
    attribute: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ApiError> {
    raw.filter(|raw| !raw.is_empty()).map(|raw| {
        raw.parse()
            .map_err(|_| ApiError::invalid(attribute, format!("Invalid value '{raw}'")))
    })
    .transpose()
}
