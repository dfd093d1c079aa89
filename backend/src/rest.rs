use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{functions, CallableRequest, CallableResponse, ExpenseQuery, LogRequest};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::fixtures::FixtureStore;

/// Shared handler state; fixtures never change after startup
#[derive(Clone)]
pub struct AppState {
    pub fixtures: Arc<FixtureStore>,
}

impl AppState {
    pub fn new(fixtures: FixtureStore) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
        }
    }
}

/// Optional payload of `getSurvey`
#[derive(Debug, Default, Deserialize)]
struct SurveyQuery {
    #[serde(rename = "tourId", default)]
    tour_id: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/functions/:name", post(call_function))
        .route("/api/logs", post(receive_log))
        .with_state(state)
}

/// Axum handler for POST /api/functions/:name
pub async fn call_function(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: std::result::Result<Json<CallableRequest>, JsonRejection>,
) -> Result<Json<CallableResponse>> {
    let Json(request) = body.map_err(|rejection| ApiError::InvalidArgument(rejection.body_text()))?;
    info!("POST /api/functions/{}", name);

    let data = dispatch(&state.fixtures, &name, request.data, Utc::now())?;
    info!("{} answered with {} entries", name, data.len());

    Ok(Json(CallableResponse {
        result: json!({ "success": true, "data": data }),
    }))
}

/// Run one callable function against the fixtures
pub fn dispatch(fixtures: &FixtureStore, name: &str, data: Value, now: DateTime<Utc>) -> Result<Vec<Value>> {
    match name {
        functions::GET_TOUR => Ok(fixtures.tours.clone()),
        functions::GET_EXPENSES => {
            let query: ExpenseQuery =
                serde_json::from_value(data).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
            Ok(fixtures.expenses_for(&query, now))
        }
        functions::GET_SURVEY => {
            let query = if data.is_null() {
                SurveyQuery::default()
            } else {
                serde_json::from_value::<SurveyQuery>(data).map_err(|e| ApiError::InvalidArgument(e.to_string()))?
            };
            Ok(fixtures.surveys_for(query.tour_id.as_deref()))
        }
        functions::GET_DISTRICT => Ok(fixtures.districts.clone()),
        functions::GET_CITY => Ok(fixtures.cities.clone()),
        functions::GET_STATE => Ok(fixtures.states.clone()),
        functions::GET_DESIGNATION => Ok(fixtures.designations.clone()),
        other => Err(ApiError::NotFound(other.to_string())),
    }
}

/// Axum handler for POST /api/logs; browser log lines are re-emitted through tracing
pub async fn receive_log(Json(request): Json<LogRequest>) -> impl IntoResponse {
    let component = request.component.as_deref().unwrap_or("frontend");
    match request.level.as_str() {
        "debug" => tracing::debug!(component, "{}", request.message),
        "warn" => tracing::warn!(component, "{}", request.message),
        "error" => tracing::error!(component, "{}", request.message),
        _ => tracing::info!(component, "{}", request.message),
    }
    Json(json!({ "success": true }))
}
