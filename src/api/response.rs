use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Success envelope: `{"error": false, "msg": null, <key>: data}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub key: &'static str,
    pub data: T,
    pub count: Option<usize>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a 200 OK response carrying `data` under `key`
    pub fn success(key: &'static str, data: T) -> Self {
        Self {
            key,
            data,
            count: None,
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Collection response; adds a `count` field
    pub fn list(key: &'static str, data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            key,
            data,
            count: Some(count),
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "msg": "Failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        let mut envelope = Map::new();
        envelope.insert("error".to_string(), Value::Bool(false));
        envelope.insert("msg".to_string(), Value::Null);
        if let Some(count) = self.count {
            envelope.insert("count".to_string(), json!(count));
        }
        envelope.insert(self.key.to_string(), data_value);

        (self.status_code, Json(Value::Object(envelope))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
