#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use defmt::{Format, Formatter};
use libm::pow;

use crate::zhl16::{ZhL16, COMPARTMENTS};

// p(t) = p_begin + (p_gas - p_begin) * (1 - 2^(-t / half_time))
// p_begin   -> inert gas pressure in the compartment before the exposure
// p_gas     -> inspired inert gas pressure the compartment is approaching
// t         -> exposure time in minutes
// half_time -> compartment half time in minutes
pub fn loading(p_begin: f64, p_gas: f64, exposure_minutes: f64, half_time: f64) -> f64 {
    p_begin + (p_gas - p_begin) * (1.0 - pow(2.0, -exposure_minutes / half_time))
}

/// Inert gas pressure (bar) in each of the 16 compartments, fastest first.
///
/// The state is a plain value: every simulation step produces a new one, and a
/// copy taken with [`TissueState::snapshot`] is never affected by later steps.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TissueState {
    pub load_n2: [f64; COMPARTMENTS],
}

impl Format for TissueState {
    fn format(&self, f: Formatter) {
        defmt::write!(f, "TissueState {{ load_n2: {:?} }}", self.load_n2);
    }
}

impl TissueState {
    /// Compartments saturated at the surface for a breathing gas with `f_n2`.
    ///
    /// Equivalent to a long exposure `loading(f_n2, f_n2, 100.0, half_time)`,
    /// which leaves every compartment at `f_n2`.
    pub fn equilibrium(f_n2: f64) -> Self {
        TissueState {
            load_n2: [f_n2; COMPARTMENTS],
        }
    }

    pub fn from_loads(load_n2: [f64; COMPARTMENTS]) -> Self {
        TissueState { load_n2 }
    }

    pub fn snapshot(&self) -> TissueState {
        *self
    }

    pub fn restore(&mut self, snapshot: &TissueState) {
        *self = *snapshot;
    }

    /// Exposes every compartment to `p_gas` for `minutes`, starting each one
    /// from `begin(p)`.
    pub fn expose(&self, p_gas: f64, minutes: f64, begin: impl Fn(f64) -> f64) -> TissueState {
        let mut load_n2 = [0.0; COMPARTMENTS];
        for i in 0..COMPARTMENTS {
            load_n2[i] = loading(begin(self.load_n2[i]), p_gas, minutes, ZhL16::N2_HALF_LIFE[i]);
        }
        TissueState { load_n2 }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.load_n2.iter().copied().enumerate()
    }
}

#[test]
fn test_loading_zero_exposure() {
    assert_eq!(loading(2.0, 4.0, 0.0, 5.0), 2.0);
}

#[test]
fn test_loading_one_half_time() {
    let result = loading(1.0, 3.0, 5.0, 5.0);
    assert!(libm::fabs(result - 2.0) < 1e-12);
}

#[test]
fn test_equilibrium_matches_long_exposure() {
    let f_n2 = 0.79;
    let state = TissueState::equilibrium(f_n2);
    for (i, load) in state.iter() {
        let long = loading(f_n2, f_n2, 100.0, ZhL16::N2_HALF_LIFE[i]);
        assert_eq!(load, long);
    }
}

#[test]
fn test_snapshot_is_independent() {
    let mut live = TissueState::equilibrium(0.79);
    let saved = live.snapshot();
    live = live.expose(3.0, 10.0, |p| p);
    assert_eq!(saved, TissueState::equilibrium(0.79));
    assert!(live.load_n2[0] > saved.load_n2[0]);
    live.restore(&saved);
    assert_eq!(live, saved);
}
