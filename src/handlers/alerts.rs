use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::handlers::AppState;
use crate::models::{AlertDescriptor, CreateAlertRequest};

pub async fn create(
    State(state): State<AppState>,
    Json(create_req): Json<CreateAlertRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let threshold = create_req
        .threshold
        .ok_or_else(|| AppError::bad_request("Invalid payload. 'threshold' is required."))?;

    state.registry.create(threshold).await?;
    Ok(Json(serde_json::json!({"message": "Alert created successfully!"})))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<AlertDescriptor>>, AppError> {
    Ok(Json(state.registry.list().await))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(alarm_name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.registry.delete(&alarm_name).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Alert '{alarm_name}' deleted successfully!")
    })))
}
