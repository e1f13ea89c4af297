#![no_std]

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use defmt::Format;

pub mod ceiling;
pub mod config;
pub mod deco;
pub mod ndl;
pub mod no_fly;
pub mod planner;
pub mod pressure;
pub mod session;
pub mod simulate;
pub mod tissue;
pub mod zhl16;

pub use config::ModelConfig;
pub use deco::DecoSchedule;
pub use planner::{plan, Planner, PlanningResult};
pub use pressure::PressureConvention;
pub use tissue::TissueState;

/// Deepest target depth accepted by [`DiveParameters::validate`], in meters.
pub const MAX_DEPTH_M: f64 = 150.0;

/// Inputs of one planning run.
#[derive(Debug, Format, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveParameters {
    pub depth_m: f64,       // m, 0 < x <= MAX_DEPTH_M
    pub bottom_time: u32,   // minutes
    pub fo2: f64,           // 0 < x <= 1
    // Conservatism factor. Accepted from the front end but not applied to any
    // calculation until the intended scaling is settled.
    pub p_factor: i32,
}

impl DiveParameters {
    pub fn new(depth_m: f64, bottom_time: u32, fo2: f64) -> Self {
        DiveParameters {
            depth_m,
            bottom_time,
            fo2,
            p_factor: 0,
        }
    }

    pub fn f_n2(&self) -> f64 {
        1.0 - self.fo2
    }

    pub fn validate(&self) -> Result<(), DecoError> {
        if !(self.depth_m > 0.0 && self.depth_m <= MAX_DEPTH_M) {
            return Err(DecoError::InvalidDepth);
        }
        if !(self.fo2 > 0.0 && self.fo2 <= 1.0) {
            return Err(DecoError::InvalidOxygenFraction);
        }
        Ok(())
    }
}

impl Default for DiveParameters {
    fn default() -> Self {
        DiveParameters::new(18.0, 40, 0.21)
    }
}

#[derive(Debug, Format, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecoError {
    InvalidDepth,
    InvalidOxygenFraction,
    InvalidConfig,
    NonConvergence,
}

impl fmt::Display for DecoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDepth => write!(f, "depth must be between 0 and {} meters", MAX_DEPTH_M),
            Self::InvalidOxygenFraction => write!(f, "oxygen fraction must be in (0, 1]"),
            Self::InvalidConfig => write!(f, "rates and step size must be positive"),
            Self::NonConvergence => write!(f, "decompression schedule did not converge"),
        }
    }
}

impl core::error::Error for DecoError {}

#[test]
fn test_validate_parameters() {
    assert_eq!(DiveParameters::new(18.0, 0, 0.21).validate(), Ok(()));
    assert_eq!(DiveParameters::new(18.0, 0, 1.0).validate(), Ok(()));
    assert_eq!(DiveParameters::new(-3.0, 0, 0.21).validate(), Err(DecoError::InvalidDepth));
    assert_eq!(DiveParameters::new(f64::NAN, 0, 0.21).validate(), Err(DecoError::InvalidDepth));
    assert_eq!(DiveParameters::new(MAX_DEPTH_M, 0, 0.21).validate(), Ok(()));
    assert_eq!(DiveParameters::new(1e12, 0, 0.21).validate(), Err(DecoError::InvalidDepth));
    assert_eq!(DiveParameters::new(f64::INFINITY, 0, 0.21).validate(), Err(DecoError::InvalidDepth));
    assert_eq!(DiveParameters::new(18.0, 0, f64::NAN).validate(), Err(DecoError::InvalidOxygenFraction));
}

#[test]
fn test_f_n2() {
    assert!(libm::fabs(DiveParameters::new(18.0, 0, 0.32).f_n2() - 0.68) < 1e-12);
}
