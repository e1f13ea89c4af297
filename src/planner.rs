//! One complete planning run: descent, bottom time, decompression, and the
//! three figures shown to the diver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use tracing::{debug, info};

use defmt::Format;

use crate::config::ModelConfig;
use crate::deco::{calculate_deco_stops, DecoSchedule};
use crate::ndl::ndl;
use crate::no_fly::no_fly;
use crate::pressure::GasLoading;
use crate::simulate::simulate;
use crate::{DecoError, DiveParameters};

/// Figures derived from one planning run, each clamped to the display range.
#[derive(Debug, Format, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanningResult {
    /// Stop minutes owed beyond the safety stop.
    pub deco_minutes: u32,
    /// Extra bottom minutes available before a stop becomes mandatory.
    pub no_deco_minutes: u32,
    /// Surface interval before flying.
    pub no_fly_minutes: u32,
    /// Full schedule, safety stop included.
    pub schedule: DecoSchedule,
    pub f_n2: f64,
    /// Compartment driving the no-fly time, `None` when flying is allowed at once.
    pub no_fly_compartment: Option<usize>,
}

#[derive(Debug, Format, Copy, Clone, Default, PartialEq)]
pub struct Planner {
    config: ModelConfig,
}

impl Planner {
    pub fn new(config: ModelConfig) -> Self {
        Planner { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn plan(&self, params: &DiveParameters) -> Result<PlanningResult, DecoError> {
        params.validate()?;
        self.config.validate()?;
        let config = &self.config;

        if params.p_factor != 0 {
            #[cfg(feature = "std")]
            debug!(p_factor = params.p_factor, "conservatism factor is accepted but not applied");
        }

        let gas = GasLoading::new(params.f_n2(), config.convention);

        let after_bottom = simulate(&gas, config, params.depth_m, params.bottom_time);
        // taken before any what-if run touches the live state
        let no_fly_tissues = after_bottom.snapshot();

        let (stops, _) = calculate_deco_stops(after_bottom, &gas, config, params.depth_m)?;
        let schedule = stops.with_safety_stop(config.safety_stop_minutes);
        let total = schedule.total_minutes();

        let no_fly = no_fly(&no_fly_tissues);

        let no_deco = if total == config.safety_stop_minutes {
            ndl(&gas, config, params.depth_m, params.bottom_time)?
        } else {
            0
        };

        let result = PlanningResult {
            deco_minutes: config.clamp_output(total as i64 - config.safety_stop_minutes as i64),
            no_deco_minutes: config.clamp_output(no_deco as i64),
            no_fly_minutes: config.clamp_output(no_fly.minutes as i64),
            schedule,
            f_n2: gas.f_n2,
            no_fly_compartment: no_fly.limiting_compartment,
        };

        #[cfg(feature = "std")]
        info!(
            depth = params.depth_m,
            bottom_time = params.bottom_time,
            deco = result.deco_minutes,
            no_deco = result.no_deco_minutes,
            no_fly = result.no_fly_minutes,
            "dive planned"
        );

        Ok(result)
    }
}

/// Plans a dive with the default model configuration.
pub fn plan(params: &DiveParameters) -> Result<PlanningResult, DecoError> {
    Planner::default().plan(params)
}

#[test]
fn test_shallow_dive_has_no_deco() {
    let result = plan(&DiveParameters::new(18.0, 10, 0.21)).unwrap();
    assert_eq!(result.deco_minutes, 0);
    assert!(result.no_deco_minutes > 0);
    assert_eq!(result.schedule.stops, [3, 0, 0, 0]);
}

#[test]
fn test_deep_dive_requires_deco() {
    let result = plan(&DiveParameters::new(40.0, 30, 0.21)).unwrap();
    assert!(result.deco_minutes > 0);
    assert_eq!(result.no_deco_minutes, 0);
    assert!(result.schedule.deepest_stop().unwrap() <= 12);
}

#[test]
fn test_invalid_parameters_rejected() {
    assert_eq!(plan(&DiveParameters::new(0.0, 10, 0.21)), Err(DecoError::InvalidDepth));
    assert_eq!(plan(&DiveParameters::new(18.0, 10, 0.0)), Err(DecoError::InvalidOxygenFraction));
    assert_eq!(plan(&DiveParameters::new(18.0, 10, 1.2)), Err(DecoError::InvalidOxygenFraction));
}

#[test]
fn test_p_factor_has_no_effect() {
    let base = DiveParameters::new(30.0, 25, 0.21);
    let conservative = DiveParameters { p_factor: 2, ..base };
    assert_eq!(plan(&base), plan(&conservative));
}
