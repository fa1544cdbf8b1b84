//! Request extractors.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;
use vidplan_common::AppError;
use vidplan_core::RequestContext;
use vidplan_db::entities::user;

/// Caller identity, anonymous when the auth middleware attached no user.
///
/// Never rejects; services decide whether an identity is required.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestContext);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<user::Model>()
            .map_or_else(RequestContext::anonymous, |user| {
                RequestContext::for_user(user.id.clone())
            });

        Ok(Self(ctx))
    }
}

/// JSON body that has been deserialized and validated.
///
/// Malformed bodies (missing fields, unknown enum values, wrong types) are
/// reported as `Validation` errors.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}
