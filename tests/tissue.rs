use dive_planner_deco::tissue::{loading, TissueState};
use dive_planner_deco::zhl16::ZhL16;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn test_loading_no_change_at_equilibrium() {
    let mut rng = StdRng::seed_from_u64(16);
    for _ in 0..500 {
        let p = rng.random_range(0.1..6.0);
        let t = rng.random_range(0.0..600.0);
        let h = ZhL16::N2_HALF_LIFE[rng.random_range(0..16)];
        assert_eq!(loading(p, p, t, h), p);
    }
}

#[test]
fn test_loading_zero_exposure() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..500 {
        let p_begin = rng.random_range(0.1..6.0);
        let p_gas = rng.random_range(0.1..6.0);
        let h = ZhL16::N2_HALF_LIFE[rng.random_range(0..16)];
        assert_eq!(loading(p_begin, p_gas, 0.0, h), p_begin);
    }
}

#[test]
fn test_loading_moves_toward_ambient() {
    let ongassing = loading(0.79, 3.16, 1.0, 5.0);
    assert!(ongassing > 0.79 && ongassing < 3.16);

    let offgassing = loading(3.0, 0.79, 1.0, 5.0);
    assert!(offgassing < 3.0 && offgassing > 0.79);
}

#[test]
fn test_loading_saturates() {
    let result = loading(0.79, 3.16, 10_000.0, 5.0);
    assert!(3.16 - result < 1e-9);
}

#[test]
fn test_equilibrium_for_nitrox() {
    let state = TissueState::equilibrium(0.68);
    assert!(state.load_n2.iter().all(|&p| p == 0.68));
}

#[test]
fn test_expose_replaces_whole_state() {
    let start = TissueState::equilibrium(0.79);
    let after = start.expose(3.16, 5.0, |p| p);
    // first compartment has a 5 minute half time
    assert!((after.load_n2[0] - (0.79 + (3.16 - 0.79) * 0.5)).abs() < 1e-12);
    for i in 1..16 {
        assert!(after.load_n2[i] < after.load_n2[i - 1]);
    }
    assert_eq!(start, TissueState::equilibrium(0.79));
}
