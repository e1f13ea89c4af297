#[cfg(feature = "std")]
use tracing::trace;

use libm::fabs;

use crate::config::ModelConfig;
use crate::pressure::{whole_steps, GasLoading};
use crate::tissue::TissueState;

/// Advances `tissues` through `floor(total_minutes / step_minutes)` steps.
///
/// Each step exposes every compartment for `step_minutes` to the inspired
/// pressure returned by `ambient(elapsed)`, `elapsed` being the time at the end
/// of that step. A remainder shorter than one step is dropped.
pub fn step_profile(
    tissues: TissueState,
    gas: &GasLoading,
    ambient: impl Fn(f64) -> f64,
    total_minutes: f64,
    step_minutes: f64,
) -> TissueState {
    let steps = whole_steps(total_minutes, step_minutes);
    let mut state = tissues;
    for i in 1..=steps {
        let elapsed = i as f64 * step_minutes;
        state = state.expose(ambient(elapsed), step_minutes, |p| gas.begin(p));
    }
    state
}

/// Linear travel from `from` to `to` meters at the configured rate.
/// Travel in the wrong direction for `rate` is a no-op.
fn travel(tissues: TissueState, gas: &GasLoading, config: &ModelConfig, from: f64, to: f64, rate: f64) -> TissueState {
    let distance = to - from;
    let direction = if distance < 0.0 { -1.0 } else { 1.0 };
    let minutes = fabs(distance) / rate;
    step_profile(
        tissues,
        gas,
        |elapsed| gas.travel(from + direction * rate * elapsed),
        minutes,
        config.step_minutes,
    )
}

pub fn descend(tissues: TissueState, gas: &GasLoading, config: &ModelConfig, target_depth: f64) -> TissueState {
    travel(tissues, gas, config, 0.0, target_depth, config.descent_rate)
}

/// Ascent from `from` to `to`; no steps are taken when `to` is not shallower.
pub fn ascend(tissues: TissueState, gas: &GasLoading, config: &ModelConfig, from: f64, to: f64) -> TissueState {
    if to >= from {
        return tissues;
    }
    travel(tissues, gas, config, from, to, config.ascent_rate)
}

/// A single exposure of `minutes` at a constant inspired pressure.
pub fn hold(tissues: TissueState, gas: &GasLoading, p_gas: f64, minutes: f64) -> TissueState {
    tissues.expose(p_gas, minutes, |p| gas.begin(p))
}

/// Surface equilibrium, descent to `depth`, then `bottom_time` minutes there.
pub fn simulate(gas: &GasLoading, config: &ModelConfig, depth: f64, bottom_time: u32) -> TissueState {
    let surface = TissueState::equilibrium(gas.f_n2);
    let on_bottom = descend(surface, gas, config, depth);
    let result = hold(on_bottom, gas, gas.bottom(depth), bottom_time as f64);
    #[cfg(feature = "std")]
    trace!(depth, bottom_time, loads = ?result.load_n2, "bottom phase complete");
    result
}

#[cfg(test)]
use crate::pressure::PressureConvention;

#[test]
fn test_step_profile_drops_partial_step() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let start = TissueState::equilibrium(0.79);
    let whole = step_profile(start, &gas, |_| 3.0, 1.0, 0.1);
    let partial = step_profile(start, &gas, |_| 3.0, 1.05, 0.1);
    assert_eq!(whole, partial);
}

#[test]
fn test_step_profile_zero_minutes_is_identity() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let start = TissueState::equilibrium(0.79);
    assert_eq!(step_profile(start, &gas, |_| 5.0, 0.0, 0.1), start);
}

#[test]
fn test_descent_loads_tissues() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    let start = TissueState::equilibrium(0.79);
    let deep = descend(start, &gas, &config, 30.0);
    for (i, load) in deep.iter() {
        assert!(load > start.load_n2[i]);
    }
    // fast compartments load quicker
    assert!(deep.load_n2[0] > deep.load_n2[15]);
}

#[test]
fn test_ascend_deeper_target_is_noop() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    let start = TissueState::equilibrium(1.5);
    assert_eq!(ascend(start, &gas, &config, 6.0, 9.0), start);
}

#[test]
fn test_descent_matches_manual_steps() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    let start = TissueState::equilibrium(0.79);
    let mut manual = start;
    for meter in 1..=5 {
        manual = manual.expose(gas.travel(meter as f64), 0.1, |p| p);
    }
    let simulated = descend(start, &gas, &config, 5.0);
    for i in 0..16 {
        assert!(libm::fabs(manual.load_n2[i] - simulated.load_n2[i]) < 1e-12);
    }
}
