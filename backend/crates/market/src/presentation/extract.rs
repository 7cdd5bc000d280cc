//! Request Body Extractor

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::MarketError;

/// JSON body that never rejects malformed input
///
/// A body that is missing, not JSON, or of the wrong shape is treated as an
/// empty object, so the use case reports the missing fields itself.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = MarketError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| MarketError::validation(e.body_text()))?;

        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Self(value)),
            Err(e) => {
                tracing::debug!(error = %e, "Treating unreadable request body as empty");
                Ok(Self(T::default()))
            }
        }
    }
}
