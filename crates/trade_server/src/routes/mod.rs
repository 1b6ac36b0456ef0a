//! Route modules for the toolkit server
//!
//! This module contains endpoint group-specific routers:
//! - health: Health check and readiness endpoints
//! - scenarios: Scenario pricing
//! - exchange: Route listing, currency conversion and rate forecasts
//! - assistant: Free-text trade questions
//! - risk: Per-route alerts and the risk heatmap

pub mod assistant;
pub mod exchange;
pub mod health;
pub mod risk;
pub mod scenarios;

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use trade_config::ToolkitConfig;
use trade_market::RateProvider;
use trade_routes::RouteTable;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Toolkit configuration
    pub config: Arc<ToolkitConfig>,
    /// Loaded route table
    pub table: Arc<RouteTable>,
    /// Exchange-rate source
    pub provider: Arc<dyn RateProvider>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
    /// Pinned "today" for rate windows; the UTC date when unset
    pub as_of: Option<NaiveDate>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        config: Arc<ToolkitConfig>,
        table: Arc<RouteTable>,
        provider: Arc<dyn RateProvider>,
    ) -> Self {
        Self {
            config,
            table,
            provider,
            start_time: std::time::Instant::now(),
            as_of: None,
        }
    }

    /// Pin the date rate windows end on.
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// End date for rate windows.
    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(scenarios::routes())
        .merge(exchange::routes())
        .merge(assistant::routes())
        .merge(risk::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Days;
    use trade_core::Currency;
    use trade_market::FixedRateProvider;

    pub const SAMPLE: &str = "\
export_country,import_country,product,base_price_usd,tariff_rate,final_price_usd,import_currency,exchange_rate_usd_to_local
Korea,Germany,Passenger cars,30000,10,33000,EUR,0.92
Brazil,Japan,Meat,5000,12,5600,JPY,
United States,Korea,Semiconductors,1000,8,1080,KRW,1400
Vietnam,Turkey,Textiles,200,20,240,TRY,
";

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// KRW drifts from 1300 to 1330 over the last 31 days; EUR is flat.
    pub fn provider() -> FixedRateProvider {
        let day = |n: u64| today().checked_sub_days(Days::new(30 - n)).unwrap();
        FixedRateProvider::new()
            .with_rate(Currency::USD, Currency::EUR, 0.92)
            .with_rate(Currency::USD, Currency::KRW, 1_330.0)
            .with_series(
                Currency::USD,
                Currency::KRW,
                (0..=30).map(|i| (day(i), 1_300.0 + i as f64)).collect(),
            )
            .with_series(
                Currency::USD,
                Currency::EUR,
                (0..=30).map(|i| (day(i), 0.92)).collect(),
            )
    }

    pub fn state() -> AppState {
        AppState::new(
            Arc::new(ToolkitConfig::default()),
            Arc::new(RouteTable::from_reader(SAMPLE.as_bytes()).unwrap()),
            Arc::new(provider()),
        )
        .with_as_of(today())
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{get, post_json, state};
    use super::*;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_merges_all_route_groups() {
        let router = build_router(state());

        for uri in [
            "/health",
            "/ready",
            "/api/v1/routes",
            "/api/v1/exchange/convert?currency=EUR",
            "/api/v1/risk/routes/0",
            "/api/v1/risk/heatmap",
        ] {
            let response = router.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/v1/scenarios",
                r#"{"basePrice":100,"baseTariffRate":10,"baseExchangeRate":1}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(post_json("/api/v1/assistant", r#"{"question":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = build_router(state());
        let response = router.oneshot(get("/unknown/path")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_app_state_pinned_date() {
        let state = state();
        assert_eq!(state.today(), super::testing::today());
        assert_eq!(state.config.port, 8080);
        assert_eq!(state.table.len(), 4);
    }
}
