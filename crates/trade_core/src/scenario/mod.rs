//! Scenario pricing.
//!
//! Given a base price, a tariff rate and an exchange rate, the engine computes
//! a final localised price and repeats the calculation under a fixed menu of
//! what-if perturbations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Scenario Engine                  │
//! ├──────────────────────────────────────────────┤
//! │  ScenarioKind   - Fixed, ordered menu        │
//! │  ScenarioInput  - Base triple + two deltas   │
//! │  ScenarioResult - One priced menu entry      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The menu order is observable: tables and charts render in it.

mod engine;
mod kind;

pub use engine::{compute_scenarios, final_price, ScenarioInput, ScenarioResult};
pub use kind::ScenarioKind;
