//! Progress reporting seam for comparison and sync runs
//!
//! Observers are told when a phase starts, how much work each step finished and
//! when the phase ends. They are a side channel for user feedback only and never
//! change what a run does.

use std::cell::Cell;

/// Phase of a ferrosync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Walking both trees and classifying entries
    Comparing,
    /// Applying a sync policy to the filesystem
    Syncing,
}

impl Phase {
    /// Short human readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Comparing => "Checking differences...",
            Self::Syncing => "Syncing contents...",
        }
    }
}

/// Receives progress notifications. Every method defaults to doing nothing.
pub trait ProgressObserver {
    /// Whether the engine should count entries up front to report a total.
    ///
    /// Counting walks both trees once more, so it is skipped unless asked for.
    fn wants_totals(&self) -> bool {
        false
    }

    /// A phase begins; `total` is the expected number of units when known
    fn phase_started(&self, _phase: Phase, _total: Option<u64>) {}

    /// `units` more units of work completed
    fn advance(&self, _phase: Phase, _units: u64) {}

    /// The phase ended, successfully or not
    fn phase_finished(&self, _phase: Phase) {}
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &T {
    fn wants_totals(&self) -> bool {
        (**self).wants_totals()
    }

    fn phase_started(&self, phase: Phase, total: Option<u64>) {
        (**self).phase_started(phase, total);
    }

    fn advance(&self, phase: Phase, units: u64) {
        (**self).advance(phase, units);
    }

    fn phase_finished(&self, phase: Phase) {
        (**self).phase_finished(phase);
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Observer that keeps running totals per phase
#[derive(Debug, Default)]
pub struct ProgressTally {
    wants_totals: bool,
    compare_total: Cell<Option<u64>>,
    compare_units: Cell<u64>,
    sync_total: Cell<Option<u64>>,
    sync_units: Cell<u64>,
    finished: Cell<u32>,
}

impl ProgressTally {
    /// Tally that does not request up-front totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally that asks the engine to count entries before comparing
    pub fn with_totals() -> Self {
        Self {
            wants_totals: true,
            ..Self::default()
        }
    }

    /// Units completed in a phase
    pub fn units(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Comparing => self.compare_units.get(),
            Phase::Syncing => self.sync_units.get(),
        }
    }

    /// Total announced for a phase
    pub fn total(&self, phase: Phase) -> Option<u64> {
        match phase {
            Phase::Comparing => self.compare_total.get(),
            Phase::Syncing => self.sync_total.get(),
        }
    }

    /// Number of phases that reported completion
    pub fn phases_finished(&self) -> u32 {
        self.finished.get()
    }
}

impl ProgressObserver for ProgressTally {
    fn wants_totals(&self) -> bool {
        self.wants_totals
    }

    fn phase_started(&self, phase: Phase, total: Option<u64>) {
        match phase {
            Phase::Comparing => self.compare_total.set(total),
            Phase::Syncing => self.sync_total.set(total),
        }
    }

    fn advance(&self, phase: Phase, units: u64) {
        let counter = match phase {
            Phase::Comparing => &self.compare_units,
            Phase::Syncing => &self.sync_units,
        };
        counter.set(counter.get() + units);
    }

    fn phase_finished(&self, _phase: Phase) {
        self.finished.set(self.finished.get() + 1);
    }
}
