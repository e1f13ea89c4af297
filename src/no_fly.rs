#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use defmt::Format;
use libm::log;

use crate::tissue::TissueState;
use crate::zhl16::ZhL16;

/// Compartment pressure (bar) below which flying is considered safe.
pub const NO_FLY_THRESHOLD: f64 = 0.75;

#[derive(Debug, Format, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoFly {
    /// Waiting time, truncated toward zero.
    pub minutes: u32,
    pub limiting_compartment: Option<usize>,
}

/// Minutes for a compartment at `p0` to off-gas down to the threshold at the surface.
pub fn time_to_fly(p0: f64, half_time: f64) -> f64 {
    if p0 <= NO_FLY_THRESHOLD {
        return 0.0;
    }
    -half_time * log(NO_FLY_THRESHOLD / p0)
}

/// Longest off-gassing time over the compartments, compartment 0 excluded.
pub fn no_fly(tissues: &TissueState) -> NoFly {
    let mut max_time = 0.0;
    let mut limiting_compartment = None;
    for (i, p0) in tissues.iter().skip(1) {
        let time = time_to_fly(p0, ZhL16::N2_HALF_LIFE[i]);
        if time > max_time {
            max_time = time;
            limiting_compartment = Some(i);
        }
    }
    NoFly {
        minutes: max_time as u32,
        limiting_compartment,
    }
}

#[test]
fn test_below_threshold_is_zero() {
    let result = no_fly(&TissueState::equilibrium(0.7));
    assert_eq!(result, NoFly { minutes: 0, limiting_compartment: None });
}

#[test]
fn test_fastest_compartment_ignored() {
    let mut loads = [0.5; 16];
    loads[0] = 3.0;
    assert_eq!(no_fly(&TissueState::from_loads(loads)).minutes, 0);
}

#[test]
fn test_truncates_toward_zero() {
    let mut loads = [0.5; 16];
    // 8 * ln 2 = 5.545 minutes
    loads[1] = 1.5;
    let result = no_fly(&TissueState::from_loads(loads));
    assert_eq!(result.minutes, 5);
    assert_eq!(result.limiting_compartment, Some(1));

    // 6.06 minutes
    loads[1] = 1.6;
    let result = no_fly(&TissueState::from_loads(loads));
    assert_eq!(result.minutes, 6);
}

#[test]
fn test_slow_compartment_dominates() {
    let result = no_fly(&TissueState::equilibrium(0.9));
    assert_eq!(result.limiting_compartment, Some(15));
    assert!(result.minutes > 100);
}
