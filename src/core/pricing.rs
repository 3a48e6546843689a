//! Supply/demand pricing engine.
//!
//! Maps `(supply_kwh, demand_kwh)` to a bounded price multiplier via a
//! logistic curve over the log of the supply/demand ratio. Pure and
//! stateless: every call reads the immutable `PriceConfig` and allocates a
//! fresh result, so the engine is safe to share across request handlers
//! without coordination.

use crate::domain::model::{MarketCondition, PriceConfig, PriceResult};
use crate::utils::error::{PricingError, Result};

/// Steepness of the logistic transition around a balanced market.
const STEEPNESS: f64 = 0.5;

/// Ratio above which the market is classified as high supply.
const HIGH_SUPPLY_RATIO: f64 = 1.5;

/// Ratio below which the market is classified as high demand.
/// Intentionally 0.67, not 1/1.5; the classification thresholds are
/// asymmetric and must stay that way.
const HIGH_DEMAND_RATIO: f64 = 0.67;

/// Rounds half away from zero, matching `f64::round`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::NonFiniteInput { field, value })
    }
}

pub struct PricingEngine {
    config: PriceConfig,
}

impl PricingEngine {
    pub fn new(config: PriceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PriceConfig {
        &self.config
    }

    /// Derives the price multiplier and market condition.
    ///
    /// Zero and negative inputs are meaningful edge cases, checked in this
    /// order: both non-positive is a balanced market at multiplier 1.0, no
    /// supply pins the ceiling, no demand pins the floor. With both inputs
    /// positive the multiplier follows the logistic curve
    /// `min + (max - min) / (1 + exp(k * ln(supply / demand)))`, rounded to
    /// 4 decimal places; the condition is classified from the raw ratio
    /// alone. Only non-finite inputs are errors.
    pub fn compute_multiplier(&self, supply: f64, demand: f64) -> Result<(f64, MarketCondition)> {
        ensure_finite("supply_kwh", supply)?;
        ensure_finite("demand_kwh", demand)?;

        if supply <= 0.0 && demand <= 0.0 {
            return Ok((1.0, MarketCondition::Balanced));
        }

        if supply <= 0.0 {
            return Ok((self.config.max_multiplier, MarketCondition::HighDemand));
        }

        if demand <= 0.0 {
            return Ok((self.config.min_multiplier, MarketCondition::HighSupply));
        }

        let ratio = supply / demand;

        // ln(ratio) is 0 at balance, positive on oversupply. Oversupply must
        // lower the price, so the logistic takes the positive log down
        // towards 0 and the multiplier towards its floor.
        let sigmoid = 1.0 / (1.0 + (STEEPNESS * ratio.ln()).exp());
        let multiplier =
            self.config.min_multiplier + (self.config.max_multiplier - self.config.min_multiplier) * sigmoid;

        let condition = if ratio > HIGH_SUPPLY_RATIO {
            MarketCondition::HighSupply
        } else if ratio < HIGH_DEMAND_RATIO {
            MarketCondition::HighDemand
        } else {
            MarketCondition::Balanced
        };

        Ok((round_to(multiplier, 4), condition))
    }

    /// Computes the full priced result for the given supply and demand.
    ///
    /// `final_price` is `base_price * multiplier` rounded to 2 decimal
    /// places. `supply_demand_ratio` is only present when demand is
    /// positive; the transport layer serializes the `None` case as null.
    pub fn compute_price(&self, supply_kwh: f64, demand_kwh: f64) -> Result<PriceResult> {
        let (multiplier, market_condition) = self.compute_multiplier(supply_kwh, demand_kwh)?;

        let final_price = round_to(self.config.base_price * multiplier, 2);

        let supply_demand_ratio = if demand_kwh > 0.0 {
            Some(round_to(supply_kwh / demand_kwh, 4))
        } else {
            None
        };

        Ok(PriceResult {
            base_price: self.config.base_price,
            multiplier,
            final_price,
            supply_kwh,
            demand_kwh,
            supply_demand_ratio,
            market_condition,
        })
    }
}
