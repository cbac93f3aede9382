//! Terminal progress bars for comparison and sync phases

use ferrosync_core::{Phase, ProgressObserver};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} {msg} [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} {pos}";

/// Draws one indicatif bar per phase on stderr
pub struct BarObserver {
    bar: RefCell<Option<ProgressBar>>,
    tick: Duration,
}

impl BarObserver {
    /// Create an observer whose spinner refreshes every `tick`
    pub fn new(tick: Duration) -> Self {
        Self {
            bar: RefCell::new(None),
            tick,
        }
    }

    fn make_bar(total: Option<u64>) -> ProgressBar {
        match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::with_template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▉▊▋▌▍▎▏  "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        }
    }
}

impl ProgressObserver for BarObserver {
    fn wants_totals(&self) -> bool {
        true
    }

    fn phase_started(&self, phase: Phase, total: Option<u64>) {
        let pb = Self::make_bar(total);
        pb.set_message(phase.label());
        pb.enable_steady_tick(self.tick);
        if let Some(previous) = self.bar.replace(Some(pb)) {
            previous.finish_and_clear();
        }
    }

    fn advance(&self, _phase: Phase, units: u64) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.inc(units);
        }
    }

    fn phase_finished(&self, _phase: Phase) {
        if let Some(pb) = self.bar.take() {
            pb.finish();
        }
    }
}
