use crate::tissue::TissueState;
use crate::zhl16::{ZhL16, COMPARTMENTS};

/// Pressure at or below which a compartment lets the diver surface.
pub const SURFACE_CEILING: f64 = 1.0;

/// Lowest ambient pressure (bar) a compartment tolerates, floored at 1 bar.
pub fn ceiling(p_comp: f64, a: f64, b: f64) -> f64 {
    let ceiling = (p_comp - a) * b;
    if ceiling < SURFACE_CEILING {
        return SURFACE_CEILING;
    }
    ceiling
}

pub fn ceilings(tissues: &TissueState) -> [f64; COMPARTMENTS] {
    let mut result = [SURFACE_CEILING; COMPARTMENTS];
    for (i, load) in tissues.iter() {
        result[i] = ceiling(load, ZhL16::N2_A[i], ZhL16::N2_B[i]);
    }
    result
}

/// Highest ceiling across all compartments and the compartment it belongs to.
pub fn max_ceiling(tissues: &TissueState) -> (f64, usize) {
    let mut max_ceiling = SURFACE_CEILING;
    let mut tissue_index = 0;
    for (i, c) in ceilings(tissues).into_iter().enumerate() {
        if c > max_ceiling {
            max_ceiling = c;
            tissue_index = i;
        }
    }
    (max_ceiling, tissue_index)
}

pub fn is_clear(tissues: &TissueState) -> bool {
    max_ceiling(tissues).0 <= SURFACE_CEILING
}

/// Depth in meters matching a ceiling pressure.
pub fn ceiling_depth(ceiling: f64) -> f64 {
    (ceiling - 1.0) * 10.0
}

#[test]
fn test_ceiling_floor() {
    assert_eq!(ceiling(0.0, 1.1696, 0.5578), 1.0);
    assert_eq!(ceiling(1.2, 1.1696, 0.5578), 1.0);
}

#[test]
fn test_ceiling_above_floor() {
    let result = ceiling(4.0, 1.0, 0.6514);
    assert!(libm::fabs(result - 1.9542) < 1e-9);
}

#[test]
fn test_max_ceiling_picks_loaded_compartment() {
    let mut loads = [0.79; COMPARTMENTS];
    loads[3] = 3.5;
    let (max, index) = max_ceiling(&TissueState::from_loads(loads));
    assert_eq!(index, 3);
    assert!(max > 1.0);
}

#[test]
fn test_surface_tissues_are_clear() {
    assert!(is_clear(&TissueState::equilibrium(0.79)));
}

#[test]
fn test_ceiling_depth() {
    assert!(libm::fabs(ceiling_depth(1.45) - 4.5) < 1e-9);
}
