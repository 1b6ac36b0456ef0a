//! # trade_routes: Trade-Route Lookups for the Trade Toolkit
//!
//! ## Layer 2 Role
//!
//! trade_routes sits on top of `trade_core` and owns everything that reads
//! the static trade-route table:
//! - Loading and querying the table (`table`)
//! - Turning a free-text question into route entities (`query`)
//! - Answering questions with an optional scenario menu (`assistant`)
//! - The country-by-country risk heatmap (`heatmap`)
//!
//! Nothing here performs network I/O. Exchange rates that are not stored
//! in the table come from a configured fallback.
//!
//! ## Usage Examples
//!
//! ```rust
//! use trade_routes::{RouteTable, TradeAssistant, AssistantReply};
//!
//! let csv = "export_country,import_country,product,base_price_usd,tariff_rate,final_price_usd,import_currency,exchange_rate_usd_to_local\n\
//!            Korea,Germany,Passenger cars,30000,10,33000,EUR,0.92\n";
//! let table = RouteTable::from_reader(csv.as_bytes()).unwrap();
//! let assistant = TradeAssistant::new(&table);
//!
//! match assistant.answer("Korea to Germany for passenger cars") {
//!     AssistantReply::Answer(answer) => assert_eq!(answer.estimated_local_price, 30_360.0),
//!     other => panic!("unexpected reply: {:?}", other),
//! }
//! ```

#![deny(missing_docs)]

pub mod assistant;
pub mod error;
pub mod heatmap;
pub mod query;
pub mod table;

pub use assistant::{AssistantReply, AssistantSettings, RouteAnswer, TradeAssistant};
pub use error::RouteError;
pub use heatmap::{RiskHeatmap, HEATMAP_TOP_N};
pub use query::{ExtractorKind, FuzzyExtractor, KeywordExtractor, QueryExtractor, TradeQuery, Vocabulary};
pub use table::{RouteTable, TradeRoute};
