//! Question answering over the route table.
//!
//! The assistant extracts route entities from a question, looks the route
//! up and reports its tariff and estimated local price. When the question
//! asks for a what-if comparison, the scenario menu is priced with the
//! configured deltas.

use serde::{Deserialize, Serialize};
use trade_core::scenario::{compute_scenarios, ScenarioResult};
use trade_core::types::round_to_cents;

use crate::query::{ExtractorKind, QueryExtractor, TradeQuery, Vocabulary, DEFAULT_FUZZY_THRESHOLD};
use crate::table::RouteTable;

/// Reply when entities are missing.
pub const UNRECOGNIZED_MESSAGE: &str = "I couldn't recognize the countries or product. Please try again.";

/// Reply when no route matches.
pub const NO_ROUTE_MESSAGE: &str = "No matching trade route found.";

/// Knobs the assistant reads from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// Tariff delta for attached scenarios
    pub tariff_delta: f64,
    /// Exchange delta for attached scenarios
    pub exchange_delta: f64,
    /// Rate used when a route stores none
    pub fallback_exchange_rate: f64,
    /// Extraction strategy
    pub extractor: ExtractorKind,
    /// Similarity threshold for the fuzzy strategy
    pub fuzzy_threshold: f64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            tariff_delta: 5.0,
            exchange_delta: 100.0,
            fallback_exchange_rate: 1_300.0,
            extractor: ExtractorKind::Keyword,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// A matched route with its local-price estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAnswer {
    /// Exporting country
    pub export_country: String,
    /// Importing country
    pub import_country: String,
    /// Product as asked
    pub product: String,
    /// Tariff in percent
    pub tariff_rate: f64,
    /// Base price in USD
    pub base_price_usd: f64,
    /// Exchange rate used for the estimate
    pub exchange_rate: f64,
    /// `final_price_usd * exchange_rate`, rounded to 2 decimal places
    pub estimated_local_price: f64,
    /// Import currency code
    pub import_currency: String,
    /// Scenario menu, when the question asked for one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<Vec<ScenarioResult>>,
}

impl RouteAnswer {
    /// Multi-line text summary.
    pub fn summary(&self) -> String {
        format!(
            "{} → {}\nProduct: {}\nTariff Rate: {}%\nBase Price: ${} USD\nEstimated Local Price: ≈ {:.2} {}",
            self.export_country,
            self.import_country,
            self.product,
            self.tariff_rate,
            self.base_price_usd,
            self.estimated_local_price,
            self.import_currency
        )
    }
}

/// Outcome of one question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AssistantReply {
    /// Exporter, importer or product missing
    Unrecognized(TradeQuery),
    /// Entities recognised but no route matches
    NoRoute(TradeQuery),
    /// Route found
    Answer(RouteAnswer),
}

impl AssistantReply {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Unrecognized(_) => UNRECOGNIZED_MESSAGE.to_string(),
            Self::NoRoute(_) => NO_ROUTE_MESSAGE.to_string(),
            Self::Answer(answer) => answer.summary(),
        }
    }
}

/// Answers free-text questions about a route table.
pub struct TradeAssistant<'a> {
    table: &'a RouteTable,
    vocabulary: Vocabulary,
    extractor: Box<dyn QueryExtractor>,
    settings: AssistantSettings,
}

impl<'a> TradeAssistant<'a> {
    /// Create an assistant with default settings.
    pub fn new(table: &'a RouteTable) -> Self {
        Self::with_settings(table, AssistantSettings::default())
    }

    /// Create an assistant with explicit settings.
    pub fn with_settings(table: &'a RouteTable, settings: AssistantSettings) -> Self {
        Self {
            table,
            vocabulary: Vocabulary::from_table(table),
            extractor: settings.extractor.build(settings.fuzzy_threshold),
            settings,
        }
    }

    /// Replace the extraction strategy.
    pub fn with_extractor(mut self, extractor: Box<dyn QueryExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Answer one question.
    pub fn answer(&self, question: &str) -> AssistantReply {
        let query = self.extractor.extract(question, &self.vocabulary);
        tracing::debug!(extractor = self.extractor.name(), ?query, "Extracted trade query");

        let (Some(export), Some(import), Some(product)) = (
            query.export_country.as_deref(),
            query.import_country.as_deref(),
            query.product.as_deref(),
        ) else {
            return AssistantReply::Unrecognized(query);
        };

        let Some(route) = self.table.find(export, import, product) else {
            return AssistantReply::NoRoute(query);
        };

        let exchange_rate = route.exchange_rate_or(self.settings.fallback_exchange_rate);
        let scenarios = query.scenario_flag.then(|| {
            compute_scenarios(
                route.base_price_usd,
                route.tariff_rate,
                exchange_rate,
                self.settings.tariff_delta,
                self.settings.exchange_delta,
            )
        });

        AssistantReply::Answer(RouteAnswer {
            export_country: route.export_country.clone(),
            import_country: route.import_country.clone(),
            product: product.to_string(),
            tariff_rate: route.tariff_rate,
            base_price_usd: route.base_price_usd,
            exchange_rate,
            estimated_local_price: round_to_cents(route.final_price_usd * exchange_rate),
            import_currency: route.import_currency.clone(),
            scenarios,
        })
    }
}
