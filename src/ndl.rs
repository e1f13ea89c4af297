#[cfg(feature = "std")]
use tracing::debug;

use crate::config::ModelConfig;
use crate::deco::calculate_deco_stops;
use crate::pressure::GasLoading;
use crate::simulate::simulate;
use crate::DecoError;

/// Whether a fresh dive to `depth` for `bottom_time` minutes owes any stop
/// beyond the safety stop.
pub fn requires_deco(gas: &GasLoading, config: &ModelConfig, depth: f64, bottom_time: u32) -> Result<bool, DecoError> {
    let tissues = simulate(gas, config, depth, bottom_time);
    let (schedule, _) = calculate_deco_stops(tissues, gas, config, depth)?;
    Ok(schedule.total_minutes() > 0)
}

/// Extra bottom minutes tolerated beyond `bottom_time` before a stop becomes
/// mandatory.
///
/// Every candidate re-runs the whole dive from surface equilibrium, one minute
/// longer each time, up to `config.no_deco_search_limit` extra minutes. Stop
/// snapping and per-minute scheduling make the limit awkward to invert
/// analytically, so this stays a bounded search.
pub fn ndl(gas: &GasLoading, config: &ModelConfig, depth: f64, bottom_time: u32) -> Result<u32, DecoError> {
    let mut tolerated = 0;
    for extra in 1..=config.no_deco_search_limit {
        let Some(candidate) = bottom_time.checked_add(extra) else {
            break;
        };
        if requires_deco(gas, config, depth, candidate)? {
            break;
        }
        tolerated = extra;
    }
    #[cfg(feature = "std")]
    debug!(depth, bottom_time, tolerated, "no-deco search finished");
    Ok(tolerated)
}

#[cfg(test)]
use crate::pressure::PressureConvention;

#[test]
fn test_ndl_stops_at_longest_representable_bottom_time() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    assert_eq!(ndl(&gas, &config, 1.0, u32::MAX).unwrap(), 0);
    assert_eq!(ndl(&gas, &config, 1.0, u32::MAX - 5).unwrap(), 5);
}

#[test]
fn test_ndl_shrinks_with_depth() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    let shallow = ndl(&gas, &config, 18.0, 0).unwrap();
    let deep = ndl(&gas, &config, 30.0, 0).unwrap();
    assert!(shallow > deep);
}

#[test]
fn test_ndl_bounded_by_search_limit() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    assert_eq!(ndl(&gas, &config, 5.0, 0).unwrap(), config.no_deco_search_limit);
}

#[test]
fn test_ndl_is_zero_on_the_limit() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    let config = ModelConfig::default();
    let limit = ndl(&gas, &config, 30.0, 0).unwrap();
    assert!(limit > 0);
    assert!(!requires_deco(&gas, &config, 30.0, limit).unwrap());
    assert!(requires_deco(&gas, &config, 30.0, limit + 1).unwrap());
    assert_eq!(ndl(&gas, &config, 30.0, limit).unwrap(), 0);
}
