// handlers/public/mod.rs - endpoints served without a token
//
// Route prefix: /api/v1
// Middleware: none

pub mod auth;
pub mod houses;
pub mod users;
