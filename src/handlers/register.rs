use axum::{Json, extract::State};
use serde::Serialize;

use crate::MindwellError;
use crate::router::AppState;
use crate::service::registration::{RegisterRequest, RegisteredUser};

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: RegisteredUser,
}

/// POST /register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, MindwellError> {
    let user = state.registration.register(req).await?;
    Ok(Json(RegisterResponse { user }))
}
