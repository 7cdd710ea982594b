// handlers/protected/mod.rs - mutation endpoints
//
// Route prefix: /api/v1
// Middleware: jwt_auth_middleware (signature only; handlers check expiry)
//
// Every handler here follows the same order: fresh claims, body, lookup,
// ownership, validation, write.

pub mod houses;
pub mod users;

pub(crate) const NO_UPDATE_PERMISSION: &str = "You don't have permission for update";
pub(crate) const NO_DELETE_PERMISSION: &str = "You don't have permission for delete";
