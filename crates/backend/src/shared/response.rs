use axum::Json;
use contracts::shared::api::{ApiData, ApiMessage};
use serde::Serialize;

/// `{"data": ...}`
pub fn data<T: Serialize>(value: T) -> Json<ApiData<T>> {
    Json(ApiData::new(value))
}

/// `{"data": {"message": ...}}`
pub fn message(text: impl Into<String>) -> Json<ApiData<ApiMessage>> {
    Json(ApiData::new(ApiMessage::new(text)))
}
