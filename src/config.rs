#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use defmt::Format;

use crate::DecoError;
use crate::pressure::PressureConvention;

/// Fixed knobs of the planner. The defaults are the values the model is
/// calibrated for; changing them changes every derived time.
#[derive(Debug, Format, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelConfig {
    pub descent_rate: f64,          // m/min
    pub ascent_rate: f64,           // m/min
    pub step_minutes: f64,          // tissue refresh interval while travelling
    pub safety_stop_minutes: u32,   // at 3 m, always added
    pub output_limit: u32,          // two digit display
    pub no_deco_search_limit: u32,  // extra bottom minutes tried
    pub max_stop_minutes: u32,      // scheduler iteration cap
    pub convention: PressureConvention,
}

impl ModelConfig {
    pub fn with_convention(convention: PressureConvention) -> Self {
        ModelConfig {
            convention,
            ..ModelConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), DecoError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.descent_rate) || !positive(self.ascent_rate) || !positive(self.step_minutes) {
            return Err(DecoError::InvalidConfig);
        }
        if self.max_stop_minutes == 0 {
            return Err(DecoError::InvalidConfig);
        }
        Ok(())
    }

    /// Clamps a signed minute count into `[0, output_limit]`.
    pub fn clamp_output(&self, minutes: i64) -> u32 {
        minutes.clamp(0, self.output_limit as i64) as u32
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            descent_rate: 10.0,
            ascent_rate: 10.0,
            step_minutes: 0.1,
            safety_stop_minutes: 3,
            output_limit: 99,
            no_deco_search_limit: 99,
            // 166 hours of stops is beyond anything this model is meant for
            max_stop_minutes: 10_000,
            convention: PressureConvention::Absolute,
        }
    }
}

#[test]
fn test_default_config_is_valid() {
    assert_eq!(ModelConfig::default().validate(), Ok(()));
}

#[test]
fn test_rejects_zero_step() {
    let config = ModelConfig {
        step_minutes: 0.0,
        ..ModelConfig::default()
    };
    assert_eq!(config.validate(), Err(DecoError::InvalidConfig));
}

#[test]
fn test_clamp_output() {
    let config = ModelConfig::default();
    assert_eq!(config.clamp_output(-4), 0);
    assert_eq!(config.clamp_output(42), 42);
    assert_eq!(config.clamp_output(150), 99);
}
