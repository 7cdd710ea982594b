// handlers/mod.rs - two security tiers
//
// Public (no auth): sign-in, sign-up and the read endpoints.
// Protected (bearer token): create/update/delete of users and houses.

pub mod protected;
pub mod public;

use uuid::Uuid;

use crate::database::DatabaseError;
use crate::error::ApiError;

/// Map a store miss to a 404 with `message`; every other store error keeps its usual mapping.
pub(crate) fn not_found_as(message: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| match err {
        DatabaseError::NotFound(_) => ApiError::not_found(message),
        other => other.into(),
    }
}

/// Path identifiers arrive as strings so a malformed id is a 400 in our envelope.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid id: {}", raw)))
}
