use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::UserProfile,
    routes::AppState,
};

/// Handler returning a user's stored history
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let name = name.trim();
    let store = state.engine.store();

    if !store.exists(name).await? {
        return Err(AppError::NotFound(format!("No profile for '{}'", name)));
    }

    Ok(Json(store.load(name).await?))
}
