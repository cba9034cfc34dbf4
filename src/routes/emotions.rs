use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Emotion,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub emotion: Emotion,
    pub polarity: f64,
}

/// Handler exposing the sentiment classifier without running a cycle
pub async fn classify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClassifyQuery>,
) -> AppResult<Json<ClassifyResponse>> {
    let text = params.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Text cannot be empty".to_string()));
    }

    let classifier = state.engine.classifier();
    Ok(Json(ClassifyResponse {
        emotion: classifier.classify(text),
        polarity: classifier.polarity(text),
    }))
}
