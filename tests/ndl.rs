use dive_planner_deco::ndl::{ndl, requires_deco};
use dive_planner_deco::pressure::{GasLoading, PressureConvention};
use dive_planner_deco::ModelConfig;

fn air() -> GasLoading {
    GasLoading::new(0.79, PressureConvention::Absolute)
}

#[test]
fn test_ndl_shallow_depth() {
    let result = ndl(&air(), &ModelConfig::default(), 15.0, 0).unwrap();
    assert!(result > 50, "NDL for 15m should be > 50 minutes, got: {}", result);
}

#[test]
fn test_ndl_deep_depth() {
    let result = ndl(&air(), &ModelConfig::default(), 50.0, 0).unwrap();
    assert!(result < 10, "NDL for 50m should be < 10 minutes, got: {}", result);
}

#[test]
fn test_ndl_decreases_with_depth() {
    let config = ModelConfig::default();
    let mut previous = u32::MAX;
    for depth in [12.0, 15.0, 18.0, 21.0, 24.0, 27.0, 30.0, 35.0, 40.0] {
        let result = ndl(&air(), &config, depth, 0).unwrap();
        assert!(result <= previous, "NDL at {}m ({}) exceeds shallower NDL ({})", depth, result, previous);
        previous = result;
    }
}

#[test]
fn test_ndl_consumes_bottom_time() {
    let config = ModelConfig::default();
    let fresh = ndl(&air(), &config, 18.0, 0).unwrap();
    let after_ten = ndl(&air(), &config, 18.0, 10).unwrap();
    assert_eq!(after_ten, fresh - 10);
}

#[test]
fn test_nitrox_extends_ndl() {
    let config = ModelConfig::default();
    let ean32 = GasLoading::new(0.68, PressureConvention::Absolute);
    let on_air = ndl(&air(), &config, 30.0, 0).unwrap();
    let on_nitrox = ndl(&ean32, &config, 30.0, 0).unwrap();
    assert!(on_nitrox > on_air);
}

#[test]
fn test_requires_deco_boundary() {
    let config = ModelConfig::default();
    assert!(!requires_deco(&air(), &config, 18.0, 10).unwrap());
    assert!(requires_deco(&air(), &config, 40.0, 30).unwrap());
}

#[test]
fn test_search_limit_respected() {
    let config = ModelConfig {
        no_deco_search_limit: 20,
        ..ModelConfig::default()
    };
    assert_eq!(ndl(&air(), &config, 10.0, 0).unwrap(), 20);
}
