use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON request body inside the handler, so that token checks run
/// before body errors are reported.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_json(e.to_string()))
}
