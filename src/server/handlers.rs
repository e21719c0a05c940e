use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use super::{
    models::{HealthResponse, RecommendRequest},
    AppState,
};
use crate::{error::GuideError, types::RecommendationResult};

impl IntoResponse for GuideError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_error_payload())).into_response()
    }
}

/// POST `/recommend`
pub(super) async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendationResult>, GuideError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(target: "uganda_guide::server", error = %rejection, "unreadable request body");
            RecommendRequest::default()
        }
    };

    let query = request.query.unwrap_or_default();
    debug!(target: "uganda_guide::server", query = %query, "recommend request");

    let result = state.service.recommend(&query).await?;
    Ok(Json(result))
}

/// GET `/health`
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
