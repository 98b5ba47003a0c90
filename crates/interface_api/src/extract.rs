//! Request body extractors
//!
//! Bodies are read as raw bytes and decoded with `serde_json` regardless of
//! the `Content-Type` header, then checked with `validator`. Any failure is
//! an input error (400) and reaches no handler.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// A required, validated JSON body
#[derive(Debug)]
pub struct Payload<T>(pub T);

/// A JSON body where an empty body stands for `T::default()`
///
/// Used by list routes, whose filters are all optional.
#[derive(Debug)]
pub struct OptionalPayload<T>(pub T);

fn decode<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?;
    value
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(value)
}

async fn body_bytes<S: Send + Sync>(req: Request, state: &S) -> Result<Bytes, ApiError> {
    Bytes::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = body_bytes(req, state).await?;
        decode(&bytes).map(Payload)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for OptionalPayload<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = body_bytes(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalPayload(T::default()));
        }
        decode(&bytes).map(OptionalPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_decode_accepts_valid_body() {
        let named: Named = decode(br#"{"name": "bike"}"#).unwrap();
        assert_eq!(named.name, "bike");
    }

    #[test]
    fn test_decode_rejects_malformed_and_invalid() {
        assert!(matches!(decode::<Named>(b"{"), Err(ApiError::BadRequest(_))));
        assert!(matches!(decode::<Named>(br#"{"name": ""}"#), Err(ApiError::BadRequest(_))));
    }
}
