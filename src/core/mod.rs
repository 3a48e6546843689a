pub mod pricing;

pub use crate::domain::model::{MarketCondition, PriceConfig, PriceResult};
pub use crate::utils::error::Result;
pub use self::pricing::PricingEngine;
