//! Route listing, currency conversion and rate forecast endpoints

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use trade_core::Currency;
use trade_market::{ConversionTable, Converter, ForecastPoint};
use trade_routes::TradeRoute;

use super::AppState;
use crate::error::ApiError;

/// Every loaded route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResponse {
    /// Number of routes
    pub count: usize,
    /// Routes in table order
    pub routes: Vec<TradeRoute>,
}

/// `?currency=EUR`
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertQuery {
    /// Target currency code
    pub currency: String,
}

/// `?currency=KRW&tail=30`
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastQuery {
    /// Target currency code
    pub currency: String,
    /// Only return the last `tail` points
    pub tail: Option<usize>,
}

/// Forecast for one currency
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    /// Quote currency; rates are units per USD
    pub currency: Currency,
    /// Observations the model was fitted on
    pub history_len: usize,
    /// Days forecast past the last observation
    pub horizon_days: usize,
    /// Fitted and forecast points, oldest first
    pub points: Vec<ForecastPoint>,
}

/// Build the exchange routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/routes", get(routes_handler))
        .route("/api/v1/exchange/convert", get(convert_handler))
        .route("/api/v1/exchange/forecast", get(forecast_handler))
}

/// GET /api/v1/routes
async fn routes_handler(State(state): State<AppState>) -> Json<RoutesResponse> {
    Json(RoutesResponse {
        count: state.table.len(),
        routes: state.table.routes().to_vec(),
    })
}

/// GET /api/v1/exchange/convert?currency=
async fn convert_handler(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConversionTable>, ApiError> {
    let currency: Currency = query.currency.parse()?;
    let table = Converter::run(state.provider.as_ref(), &state.table, currency).await?;
    Ok(Json(table))
}

/// GET /api/v1/exchange/forecast?currency=
async fn forecast_handler(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let currency: Currency = query.currency.parse()?;
    let forecast = state
        .config
        .forecast
        .forecaster()
        .run(state.provider.as_ref(), currency, state.today())
        .await?;

    let points = match query.tail {
        Some(n) => forecast.tail(n).to_vec(),
        None => forecast.points.clone(),
    };
    Ok(Json(ForecastResponse {
        currency,
        history_len: forecast.history_len,
        horizon_days: forecast.horizon().len(),
        points,
    }))
}
