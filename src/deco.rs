#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use tracing::{debug, warn};

use defmt::Format;

use crate::ceiling::{ceiling_depth, max_ceiling, SURFACE_CEILING};
use crate::config::ModelConfig;
use crate::pressure::GasLoading;
use crate::simulate::{ascend, hold};
use crate::tissue::TissueState;
use crate::DecoError;

/// Candidate stop depths in meters, shallowest first.
pub const STOP_LADDER: [u32; 4] = [3, 6, 9, 12];

/// Minutes owed at 3, 6, 9 and 12 m.
#[derive(Debug, Format, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoSchedule {
    pub stops: [u32; 4],
}

impl DecoSchedule {
    pub fn minutes_at(&self, depth: u32) -> u32 {
        match STOP_LADDER.iter().position(|&d| d == depth) {
            Some(i) => self.stops[i],
            None => 0,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.stops.iter().sum()
    }

    /// Deepest stop with time owed, if any.
    pub fn deepest_stop(&self) -> Option<u32> {
        STOP_LADDER
            .iter()
            .zip(self.stops.iter())
            .rev()
            .find(|(_, minutes)| **minutes > 0)
            .map(|(depth, _)| *depth)
    }

    pub fn with_safety_stop(mut self, minutes: u32) -> Self {
        self.stops[0] += minutes;
        self
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, u32)> + '_ {
        STOP_LADDER.iter().copied().zip(self.stops.iter().copied())
    }
}

/// Shallowest ladder depth at or deeper than `required` meters, 12 m when nothing fits.
pub fn nearest_stop(required: f64) -> u32 {
    STOP_LADDER
        .iter()
        .copied()
        .find(|&d| d as f64 >= required)
        .unwrap_or(STOP_LADDER[STOP_LADDER.len() - 1])
}

/// Greedy stop search starting from `tissues` at `depth` meters.
///
/// Each iteration ascends to the stop demanded by the highest ceiling and
/// spends one minute there, until every compartment allows surfacing. The safety
/// stop is not part of the returned schedule. Returns the schedule together with
/// the tissue state on leaving the last stop.
pub fn calculate_deco_stops(
    tissues: TissueState,
    gas: &GasLoading,
    config: &ModelConfig,
    depth: f64,
) -> Result<(DecoSchedule, TissueState), DecoError> {
    let mut schedule = DecoSchedule::default();
    let mut state = tissues;
    let mut last_stop = depth;
    let mut stop_minutes = 0;

    loop {
        let (ceiling, tissue_index) = max_ceiling(&state);
        if ceiling <= SURFACE_CEILING {
            break;
        }

        let required = ceiling_depth(ceiling);
        let stop = nearest_stop(required);
        #[cfg(feature = "std")]
        if required > stop as f64 {
            warn!(required, stop, "ceiling deeper than the stop ladder, clamping");
        }

        stop_minutes += 1;
        if stop_minutes > config.max_stop_minutes {
            return Err(DecoError::NonConvergence);
        }

        state = ascend(state, gas, config, last_stop, stop as f64);
        state = hold(state, gas, gas.stop(stop), 1.0);

        // stop depths are all on the ladder
        if let Some(i) = STOP_LADDER.iter().position(|&d| d == stop) {
            schedule.stops[i] += 1;
        }
        last_stop = stop as f64;

        #[cfg(feature = "std")]
        debug!(stop, tissue_index, ceiling, "deco minute");
        #[cfg(not(feature = "std"))]
        let _ = tissue_index;
    }

    Ok((schedule, state))
}

#[cfg(test)]
use crate::pressure::PressureConvention;

#[test]
fn test_nearest_stop() {
    assert_eq!(nearest_stop(0.2), 3);
    assert_eq!(nearest_stop(3.0), 3);
    assert_eq!(nearest_stop(3.01), 6);
    assert_eq!(nearest_stop(11.9), 12);
    assert_eq!(nearest_stop(25.0), 12);
}

#[test]
fn test_clear_tissues_need_no_stops() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let surface = TissueState::equilibrium(0.79);
    let (schedule, after) = calculate_deco_stops(surface, &gas, &ModelConfig::default(), 18.0).unwrap();
    assert_eq!(schedule, DecoSchedule::default());
    assert_eq!(after, surface);
}

#[test]
fn test_loaded_tissues_clear_after_stops() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let loaded = TissueState::from_loads([3.0; 16]);
    let (schedule, after) = calculate_deco_stops(loaded, &gas, &ModelConfig::default(), 40.0).unwrap();
    assert!(schedule.total_minutes() > 0);
    assert!(crate::ceiling::is_clear(&after));
    assert!(schedule.deepest_stop().unwrap() <= 12);
}

#[test]
fn test_iteration_cap() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let loaded = TissueState::from_loads([3.0; 16]);
    let config = ModelConfig {
        max_stop_minutes: 1,
        ..ModelConfig::default()
    };
    let result = calculate_deco_stops(loaded, &gas, &config, 40.0);
    assert_eq!(result, Err(DecoError::NonConvergence));
}

#[test]
fn test_schedule_helpers() {
    let schedule = DecoSchedule { stops: [2, 0, 4, 0] }.with_safety_stop(3);
    assert_eq!(schedule.minutes_at(3), 5);
    assert_eq!(schedule.minutes_at(9), 4);
    assert_eq!(schedule.minutes_at(15), 0);
    assert_eq!(schedule.total_minutes(), 9);
    assert_eq!(schedule.deepest_stop(), Some(9));
    assert_eq!(DecoSchedule::default().deepest_stop(), None);
}
