//! Cancellable background tick loop

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::simulation::engine::{SimulationEngine, TickReport};

pub type SharedEngine = Arc<Mutex<SimulationEngine>>;

/// Handle to a spawned tick loop.
///
/// The loop is aborted when the handle is cancelled or dropped, so replacing
/// a handle can never leave two loops ticking the same engine.
pub struct ScheduledTask {
    handle: JoinHandle<()>,
    period: Duration,
}

impl ScheduledTask {
    /// Spawn a loop that ticks `engine` every `period`, first tick one full
    /// period from now. Must be called from within a tokio runtime.
    pub fn spawn(
        engine: SharedEngine,
        period: Duration,
        reports: watch::Sender<Option<TickReport>>,
    ) -> Self {
        let handle = tokio::spawn(tick_loop(engine, period, reports));
        tracing::debug!(period_ms = period.as_millis() as u64, "Tick loop scheduled");
        Self { handle, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        self.handle.abort();
        tracing::debug!("Tick loop cancelled");
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn tick_loop(engine: SharedEngine, period: Duration, reports: watch::Sender<Option<TickReport>>) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        // The report goes out while the lock is held, so nothing from an
        // aborted loop can land after a restart.
        let mut engine = engine.lock().await;
        if !engine.is_running() {
            break;
        }
        let report = engine.tick();
        for decision in &report.decisions {
            tracing::info!(
                tick = report.tick,
                impact = %decision.impact,
                "{}: {}",
                decision.action,
                decision.reason
            );
        }
        reports.send_replace(Some(report));
    }

    tracing::debug!("Tick loop exited, engine no longer running");
}
