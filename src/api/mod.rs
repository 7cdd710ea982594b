pub mod body;
pub mod response;

pub use body::parse_json;
pub use response::{ApiResponse, ApiResult};
