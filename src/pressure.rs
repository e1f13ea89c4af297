#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use defmt::Format;
use libm::floor;

/// How a depth in meters is turned into an inspired inert-gas pressure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Format)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PressureConvention {
    /// Absolute pressure, 1 bar at the surface plus 1 bar per 10 m.
    #[default]
    Absolute,
    /// The historical bar-gauge arithmetic of the handheld planner:
    /// `((d * 10) - 1)` while travelling, `(d - 1) / 10` on the bottom,
    /// `1 + d / 10` with integer division at a stop, and every exposure
    /// starting from the compartment pressure scaled by the nitrogen fraction.
    Reference,
}

/// Breathing gas plus the convention used to load it.
#[derive(Clone, Copy, Debug, PartialEq, Format)]
pub struct GasLoading {
    pub f_n2: f64,
    pub convention: PressureConvention,
}

impl GasLoading {
    pub fn new(f_n2: f64, convention: PressureConvention) -> Self {
        GasLoading { f_n2, convention }
    }

    /// Inspired nitrogen pressure at `depth` meters while descending or ascending.
    pub fn travel(&self, depth: f64) -> f64 {
        match self.convention {
            PressureConvention::Absolute => absolute(depth) * self.f_n2,
            PressureConvention::Reference => ((depth * 10.0) - 1.0) * self.f_n2,
        }
    }

    /// Inspired nitrogen pressure during the bottom time at `depth` meters.
    pub fn bottom(&self, depth: f64) -> f64 {
        match self.convention {
            PressureConvention::Absolute => absolute(depth) * self.f_n2,
            PressureConvention::Reference => ((depth - 1.0) / 10.0) * self.f_n2,
        }
    }

    /// Inspired nitrogen pressure while holding a stop at `stop_depth` meters.
    pub fn stop(&self, stop_depth: u32) -> f64 {
        match self.convention {
            PressureConvention::Absolute => absolute(stop_depth as f64) * self.f_n2,
            PressureConvention::Reference => (1 + stop_depth / 10) as f64 * self.f_n2,
        }
    }

    /// Compartment pressure an exposure starts from.
    pub fn begin(&self, p: f64) -> f64 {
        match self.convention {
            PressureConvention::Absolute => p,
            PressureConvention::Reference => p * self.f_n2,
        }
    }
}

fn absolute(depth: f64) -> f64 {
    1.0 + depth / 10.0
}

/// Whole steps of `step` that fit in `total`, ignoring float noise such as 3.0 / 0.1.
pub fn whole_steps(total: f64, step: f64) -> u32 {
    if total <= 0.0 || step <= 0.0 {
        return 0;
    }
    floor(total / step + 1e-9) as u32
}

#[test]
fn test_absolute_pressures() {
    let gas = GasLoading::new(0.79, PressureConvention::Absolute);
    assert!(libm::fabs(gas.travel(30.0) - 3.16) < 1e-12);
    assert_eq!(gas.travel(30.0), gas.bottom(30.0));
    assert!(libm::fabs(gas.stop(3) - 1.027) < 1e-12);
    assert_eq!(gas.begin(2.0), 2.0);
}

#[test]
fn test_reference_pressures() {
    let gas = GasLoading::new(0.79, PressureConvention::Reference);
    assert!(libm::fabs(gas.travel(2.0) - 19.0 * 0.79) < 1e-12);
    assert!(libm::fabs(gas.bottom(31.0) - 3.0 * 0.79) < 1e-12);
    assert_eq!(gas.stop(3), 0.79);
    assert_eq!(gas.stop(9), 0.79);
    assert_eq!(gas.stop(12), 2.0 * 0.79);
    assert_eq!(gas.begin(2.0), 2.0 * 0.79);
}

#[test]
fn test_whole_steps() {
    assert_eq!(whole_steps(3.0, 0.1), 30);
    assert_eq!(whole_steps(1.85, 0.1), 18);
    assert_eq!(whole_steps(0.05, 0.1), 0);
    assert_eq!(whole_steps(-1.0, 0.1), 0);
}
