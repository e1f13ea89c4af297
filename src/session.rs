//! Cancel-and-restart recomputation for interactive front ends.
//!
//! Every input change takes a new [`Ticket`]. Only the newest ticket may
//! publish a result; a run that finishes after being superseded is dropped.

use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "std")]
use tracing::trace;

use defmt::Format;

use crate::planner::{Planner, PlanningResult};
use crate::{DecoError, DiveParameters};

#[derive(Debug, Format, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(pub u32);

#[derive(Debug, Default)]
pub struct Recalculator {
    planner: Planner,
    latest: AtomicU32,
}

impl Recalculator {
    pub fn new(planner: Planner) -> Self {
        Recalculator {
            planner,
            latest: AtomicU32::new(0),
        }
    }

    /// Supersedes every outstanding ticket.
    pub fn request(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Plans `params` under `ticket`. `None` means a newer request arrived
    /// while this one was running and the result was discarded.
    pub fn run(&self, ticket: Ticket, params: &DiveParameters) -> Option<Result<PlanningResult, DecoError>> {
        if !self.is_current(ticket) {
            return None;
        }
        let result = self.planner.plan(params);
        if !self.is_current(ticket) {
            #[cfg(feature = "std")]
            trace!(ticket = ticket.0, "discarding superseded plan");
            return None;
        }
        Some(result)
    }

    /// Takes a ticket and plans immediately.
    pub fn recalculate(&self, params: &DiveParameters) -> Option<Result<PlanningResult, DecoError>> {
        let ticket = self.request();
        self.run(ticket, params)
    }
}

#[test]
fn test_newer_request_supersedes() {
    let recalculator = Recalculator::default();
    let first = recalculator.request();
    let second = recalculator.request();
    assert!(!recalculator.is_current(first));
    assert!(recalculator.is_current(second));
    let params = DiveParameters::new(18.0, 10, 0.21);
    assert!(recalculator.run(first, &params).is_none());
    assert!(recalculator.run(second, &params).is_some());
}

#[test]
fn test_recalculate_is_repeatable() {
    let recalculator = Recalculator::default();
    let params = DiveParameters::new(30.0, 20, 0.21);
    let first = recalculator.recalculate(&params);
    let other = recalculator.recalculate(&DiveParameters::new(40.0, 30, 0.32));
    let again = recalculator.recalculate(&params);
    assert!(other.is_some());
    assert_eq!(first, again);
}
