use serde::{Deserialize, Serialize};

/// Pricing constants. Built once at startup and never mutated afterwards.
///
/// Invariant: `0 < min_multiplier < 1 < max_multiplier`.
#[derive(Debug, Clone)]
pub struct PriceConfig {
    /// Reference tariff rate in currency unit per kWh.
    pub base_price: f64,
    /// Floor applied when supply far exceeds demand.
    pub min_multiplier: f64,
    /// Ceiling applied when demand far exceeds supply.
    pub max_multiplier: f64,
    /// Tariff the base price is taken from.
    pub base_price_source: &'static str,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_price: 1444.70,
            min_multiplier: 0.8,
            max_multiplier: 1.3,
            base_price_source: "PLN R-1/TR 1.300 VA",
        }
    }
}

/// Categorical market state derived from the supply/demand ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    HighSupply,
    Balanced,
    HighDemand,
}

/// Result of a single price calculation. Freshly built per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub base_price: f64,
    pub multiplier: f64,
    pub final_price: f64,
    pub supply_kwh: f64,
    pub demand_kwh: f64,
    /// `supply / demand`, present only when demand is positive. Serializes to
    /// JSON null otherwise; consumers branch on presence.
    pub supply_demand_ratio: Option<f64>,
    pub market_condition: MarketCondition,
}
