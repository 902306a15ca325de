//! Wall-clock budget checks for the symmetry search

use std::time::{Duration, Instant};

use crate::io::error::{FriezeError, Result};

/// Optional wall-clock budget checked between primitive comparisons
///
/// A comparison that has started always finishes; the budget is only consulted
/// before the next one begins.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// Start the clock now
    pub fn start(budget: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// A deadline that never expires
    pub fn unlimited() -> Self {
        Self::start(None)
    }

    /// Time since the clock started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Fail once the budget is spent
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` naming `stage` when the elapsed time exceeds the budget.
    pub fn check(&self, stage: &'static str) -> Result<()> {
        match self.budget {
            Some(budget) if self.elapsed() > budget => Err(FriezeError::Interrupted {
                stage,
                elapsed: self.elapsed(),
            }),
            _ => Ok(()),
        }
    }
}
