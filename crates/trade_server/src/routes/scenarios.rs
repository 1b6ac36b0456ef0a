//! Scenario pricing endpoint

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use trade_core::scenario::{ScenarioInput, ScenarioResult};

use super::AppState;
use crate::error::ApiError;

/// Scenario request; deltas default to the configured ones
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    /// Price in USD before tariff
    pub base_price: f64,
    /// Tariff in percent
    pub base_tariff_rate: f64,
    /// Local currency units per USD
    pub base_exchange_rate: f64,
    /// Tariff perturbation, in percentage points
    #[serde(default)]
    pub tariff_delta: Option<f64>,
    /// Exchange perturbation, in local units per USD
    #[serde(default)]
    pub exchange_delta: Option<f64>,
}

/// Priced menu, base row first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    /// One row per menu entry
    pub scenarios: Vec<ScenarioResult>,
}

/// Build the scenario routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/scenarios", post(scenarios_handler))
}

/// POST /api/v1/scenarios
async fn scenarios_handler(
    State(state): State<AppState>,
    Json(request): Json<ScenarioRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let input = ScenarioInput::new(
        request.base_price,
        request.base_tariff_rate,
        request.base_exchange_rate,
        request
            .tariff_delta
            .unwrap_or(state.config.scenario.tariff_delta),
        request
            .exchange_delta
            .unwrap_or(state.config.scenario.exchange_delta),
    );
    if [
        input.base_price,
        input.base_tariff_rate,
        input.base_exchange_rate,
        input.tariff_delta,
        input.exchange_delta,
    ]
    .iter()
    .any(|v| !v.is_finite())
    {
        return Err(ApiError::BadRequest(
            "Scenario inputs must be finite numbers".to_string(),
        ));
    }

    tracing::debug!(?input, "Pricing scenarios");
    Ok(Json(ScenarioResponse {
        scenarios: input.compute(),
    }))
}
