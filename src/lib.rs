pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod testing;
pub mod validation;

pub use app::app;
pub use config::AppConfig;
pub use state::AppState;
