//! # Engine Configuration
//!
//! Runtime configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BISTRO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

use bistro_core::pricing::PricingConfig;

/// Engine configuration.
///
/// Pricing policy plus the timing knobs of the two simulated processes:
/// order placement and delivery tracking. Tests shrink the durations to
/// milliseconds; production uses the defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tax rate, delivery fee and free-delivery threshold.
    pub pricing: PricingConfig,

    /// Simulated kitchen-confirmation delay before an order is recorded.
    /// Default: 2 seconds
    pub placement_delay: Duration,

    /// Interval between tracking simulation ticks.
    /// Default: 30 seconds
    pub tracking_tick: Duration,

    /// Probability that a tracking tick advances the order status.
    /// Default: 0.3
    pub advance_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            pricing: PricingConfig::default(),
            placement_delay: Duration::from_secs(2),
            tracking_tick: Duration::from_secs(30),
            advance_probability: 0.3,
        }
    }
}

impl EngineConfig {
    /// Creates an EngineConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BISTRO_PLACEMENT_DELAY_MS`: Override placement delay
    /// - `BISTRO_TRACKING_TICK_MS`: Override tracking tick interval
    /// - `BISTRO_ADVANCE_PROBABILITY`: Override advance probability (0.0-1.0)
    pub fn from_env() -> Self {
        let mut config = EngineConfig::default();

        if let Ok(ms) = std::env::var("BISTRO_PLACEMENT_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.placement_delay = Duration::from_millis(ms);
            }
        }

        if let Ok(ms) = std::env::var("BISTRO_TRACKING_TICK_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.tracking_tick = Duration::from_millis(ms);
            }
        }

        if let Ok(p) = std::env::var("BISTRO_ADVANCE_PROBABILITY") {
            if let Ok(p) = p.parse::<f64>() {
                config.advance_probability = p.clamp(0.0, 1.0);
            }
        }

        config
    }

    /// Fast timings for tests: millisecond delays, guaranteed advancement.
    pub fn for_tests() -> Self {
        EngineConfig {
            pricing: PricingConfig::default(),
            placement_delay: Duration::from_millis(5),
            tracking_tick: Duration::from_millis(5),
            advance_probability: 1.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.placement_delay, Duration::from_secs(2));
        assert_eq!(config.tracking_tick, Duration::from_secs(30));
        assert!((config.advance_probability - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.pricing.delivery_fee.cents(), 299);
    }
}
