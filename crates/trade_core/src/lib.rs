//! # trade_core: Foundation for the Trade Toolkit
//!
//! ## Layer 1 (Foundation) Role
//!
//! trade_core is the bottom layer of the workspace, providing:
//! - The scenario pricing engine (`scenario`)
//! - Currency codes: `Currency` (`types::currency`)
//! - Risk threshold policies for tariffs and exchange rates (`risk`)
//! - Error types: `CurrencyError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other trade_* crates and performs no I/O.
//! Exchange rates, route tables and fallback constants are supplied by the
//! collaborating crates; the engine only ever sees numbers.
//!
//! ## Usage Examples
//!
//! ```rust
//! use trade_core::scenario::{compute_scenarios, ScenarioKind};
//!
//! let rows = compute_scenarios(30_000.0, 8.0, 1_300.0, 5.0, 100.0);
//! assert_eq!(rows.len(), 7);
//! assert_eq!(rows[0].name, ScenarioKind::Base.name());
//! assert!((rows[0].final_price - 42_120_000.0).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod risk;
pub mod scenario;
pub mod types;

pub use scenario::{compute_scenarios, final_price, ScenarioInput, ScenarioKind, ScenarioResult};
pub use types::{Currency, CurrencyError};
