//! Risk alert and heatmap endpoints

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use trade_market::RouteRiskAlert;
use trade_routes::RiskHeatmap;

use super::AppState;
use crate::error::ApiError;

/// Build the risk routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/risk/routes/{index}", get(route_alert_handler))
        .route("/api/v1/risk/heatmap", get(heatmap_handler))
}

/// GET /api/v1/risk/routes/{index}
///
/// A provider failure does not fail the request; the alert reports the
/// exchange side as stable.
async fn route_alert_handler(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<RouteRiskAlert>, ApiError> {
    let route = state.table.get(index)?;
    let risk = &state.config.risk;
    let alert = RouteRiskAlert::assess(
        route,
        state.provider.as_ref(),
        state.today(),
        &risk.tariff_policy(),
        &risk.volatility_policy()?,
        risk.window_days,
    )
    .await;
    Ok(Json(alert))
}

/// GET /api/v1/risk/heatmap
async fn heatmap_handler(State(state): State<AppState>) -> Json<RiskHeatmap> {
    let risk = &state.config.risk;
    Json(RiskHeatmap::build(
        &state.table,
        &risk.tariff_policy(),
        &risk.baseline_policy(),
    ))
}
