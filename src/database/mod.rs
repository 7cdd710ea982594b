pub mod manager;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use postgres::PgStore;
pub use store::{HouseStore, Store, UserStore};
