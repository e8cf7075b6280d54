//! Cosmetic progress animation shown while `/predict` is in flight.
//!
//! The bar does not track the request; it creeps towards a ceiling using
//! increments chosen by a [`ProgressEstimator`].

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::config::ProgressConfig;
use crate::page::{Page, Panel};

pub trait ProgressEstimator: Send {
    /// Percentage points to add on the next tick.
    fn next_increment(&mut self) -> f64;
}

/// Uniform increments in `[0, max_increment)`.
pub struct RandomProgress {
    rng: SmallRng,
    max_increment: f64,
}

impl RandomProgress {
    pub fn new(max_increment: f64) -> Self {
        Self::with_rng(SmallRng::from_entropy(), max_increment)
    }

    pub fn seeded(seed: u64, max_increment: f64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed), max_increment)
    }

    fn with_rng(rng: SmallRng, max_increment: f64) -> Self {
        Self {
            rng,
            max_increment: max_increment.max(0.0),
        }
    }
}

impl ProgressEstimator for RandomProgress {
    fn next_increment(&mut self) -> f64 {
        if self.max_increment <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..self.max_increment)
    }
}

/// Same increment on every tick.
pub struct SteadyProgress(pub f64);

impl ProgressEstimator for SteadyProgress {
    fn next_increment(&mut self) -> f64 {
        self.0
    }
}

/// Running animation. It halts on its own at the ceiling, and when the
/// ticker is dropped.
pub(crate) struct ProgressTicker {
    cancel_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub(crate) fn start(
        page: Arc<dyn Page>,
        mut estimator: Box<dyn ProgressEstimator>,
        config: &ProgressConfig,
    ) -> Self {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let tick = config.tick();
        let ceiling = config.ceiling;
        page.set_progress(0.0);
        page.set_panel_visible(Panel::ProgressBar, true);
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + tick, tick);
            let mut width = 0.0f64;
            loop {
                tokio::select! {
                    changed = cancel_rx.changed() => {
                        if changed.is_err() || *cancel_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticks.tick() => {
                        let step = estimator.next_increment().max(0.0);
                        width = (width + step).min(ceiling);
                        page.set_progress(width);
                        debug!(width, "progress tick");
                        if width >= ceiling {
                            break;
                        }
                    }
                }
            }
        });
        Self { cancel_tx, handle }
    }

    /// Cancels the animation and waits until no further tick can land.
    pub(crate) async fn stop(self) {
        let _ = self.cancel_tx.send(true);
        let _ = self.handle.await;
    }
}
