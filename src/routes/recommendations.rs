use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Emotion, RecommendationOutcome},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_name: String,
    #[serde(default)]
    pub gratitude_text: String,
    pub emotion_text: String,
}

#[derive(Debug, Deserialize)]
pub struct EmotionRecommendationRequest {
    pub user_name: String,
    #[serde(default)]
    pub gratitude_text: String,
    /// Emotion label, matched case-insensitively
    pub emotion: String,
}

/// Handler for free-text recommendations
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationOutcome>> {
    tracing::info!(
        request_id = %request_id,
        user = %request.user_name,
        "Processing recommendation request"
    );

    let outcome = state
        .engine
        .recommend(
            &request.user_name,
            &request.gratitude_text,
            &request.emotion_text,
        )
        .await?;

    Ok(Json(outcome))
}

/// Handler for recommendations with a directly supplied emotion label
pub async fn recommend_for_emotion(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<EmotionRecommendationRequest>,
) -> AppResult<Json<RecommendationOutcome>> {
    let emotion: Emotion = request.emotion.parse()?;

    tracing::info!(
        request_id = %request_id,
        user = %request.user_name,
        emotion = %emotion,
        "Processing emotion recommendation request"
    );

    let outcome = state
        .engine
        .recommend_for_emotion(&request.user_name, &request.gratitude_text, emotion)
        .await?;

    Ok(Json(outcome))
}
