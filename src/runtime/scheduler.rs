//! TickScheduler - drives a SimulationEngine on a wall-clock cadence
//!
//! Only one tick loop exists at a time. Every operation that changes the
//! cadence cancels the current loop before installing its replacement.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, MutexGuard};

use crate::core::error::Result;
use crate::fleet::state::ResizeOutcome;
use crate::runtime::task::{ScheduledTask, SharedEngine};
use crate::simulation::engine::{SimulationEngine, TickReport};
use crate::simulation::output::FleetSnapshot;

pub struct TickScheduler {
    engine: SharedEngine,
    task: Option<ScheduledTask>,
    reports: watch::Sender<Option<TickReport>>,
}

impl TickScheduler {
    pub fn new(engine: SimulationEngine) -> Self {
        let (reports, _) = watch::channel(None);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            task: None,
            reports,
        }
    }

    /// Shared handle for readers such as a presentation adapter
    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    pub async fn lock(&self) -> MutexGuard<'_, SimulationEngine> {
        self.engine.lock().await
    }

    /// Latest tick report, updated after every scheduled tick
    pub fn subscribe(&self) -> watch::Receiver<Option<TickReport>> {
        self.reports.subscribe()
    }

    /// Period of the installed loop, if one is scheduled
    pub fn current_period(&self) -> Option<Duration> {
        self.task
            .as_ref()
            .filter(|t| !t.is_finished())
            .map(|t| t.period())
    }

    pub fn is_scheduled(&self) -> bool {
        self.current_period().is_some()
    }

    /// Begin ticking. Returns false if already running with a loop installed.
    pub async fn start(&mut self) -> bool {
        let period = {
            let mut engine = self.engine.lock().await;
            let started = engine.start();
            if !started && self.is_scheduled() {
                return false;
            }
            engine.effective_period()
        };
        self.install(period);
        true
    }

    /// Stop scheduling ticks, keeping all state
    pub async fn pause(&mut self) -> bool {
        self.cancel();
        self.engine.lock().await.pause()
    }

    /// Cancel any pending tick, then reset the engine
    pub async fn restart(&mut self) {
        self.cancel();
        self.engine.lock().await.restart();
        self.reports.send_replace(None);
    }

    pub async fn set_speed_multiplier(&mut self, speed: f64) -> Result<()> {
        let reschedule = {
            let mut engine = self.engine.lock().await;
            engine.set_speed_multiplier(speed)?;
            engine.is_running().then(|| engine.effective_period())
        };
        if let Some(period) = reschedule {
            self.install(period);
        }
        Ok(())
    }

    pub async fn set_tick_period(&mut self, period: Duration) -> Result<()> {
        let reschedule = {
            let mut engine = self.engine.lock().await;
            engine.set_tick_period(period)?;
            engine.is_running().then(|| engine.effective_period())
        };
        if let Some(period) = reschedule {
            self.install(period);
        }
        Ok(())
    }

    pub async fn set_fleet_size(&mut self, target: usize) -> Result<ResizeOutcome> {
        self.engine.lock().await.set_fleet_size(target)
    }

    pub async fn snapshot(&self) -> FleetSnapshot {
        self.engine.lock().await.snapshot()
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    fn install(&mut self, period: Duration) {
        self.cancel();
        self.task = Some(ScheduledTask::spawn(
            Arc::clone(&self.engine),
            period,
            self.reports.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::simulation::engine::RunState;
    use tokio::time::sleep;

    fn scheduler() -> TickScheduler {
        let config = SimulationConfig {
            tick_period_ms: 1000,
            ..Default::default()
        };
        TickScheduler::new(SimulationEngine::new(config).unwrap())
    }

    async fn ticks(scheduler: &TickScheduler) -> u64 {
        scheduler.lock().await.current_tick()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_cadence() {
        let mut scheduler = scheduler();
        assert!(scheduler.start().await);
        assert!(!scheduler.start().await);

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(ticks(&scheduler).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_replaces_schedule() {
        let mut scheduler = scheduler();
        scheduler.start().await;
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(ticks(&scheduler).await, 1);

        scheduler.set_speed_multiplier(2.0).await.unwrap();
        assert_eq!(scheduler.current_period(), Some(Duration::from_millis(500)));

        // New loop fires at +500 and +1000; the old one would also have
        // fired at +500 if it were still alive.
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(ticks(&scheduler).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_suspends_and_resume_continues() {
        let mut scheduler = scheduler();
        scheduler.start().await;
        sleep(Duration::from_millis(2500)).await;
        assert!(scheduler.pause().await);
        assert!(!scheduler.is_scheduled());

        sleep(Duration::from_millis(5000)).await;
        assert_eq!(ticks(&scheduler).await, 2);

        scheduler.start().await;
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(ticks(&scheduler).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_and_stops() {
        let mut scheduler = scheduler();
        scheduler.start().await;
        sleep(Duration::from_millis(2500)).await;

        scheduler.restart().await;
        assert!(!scheduler.is_scheduled());
        sleep(Duration::from_millis(5000)).await;

        let engine = scheduler.lock().await;
        assert_eq!(engine.current_tick(), 0);
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert!(engine.decision_log().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_speed_keeps_schedule() {
        let mut scheduler = scheduler();
        scheduler.start().await;

        assert!(scheduler.set_speed_multiplier(0.0).await.is_err());
        assert!(scheduler.set_tick_period(Duration::ZERO).await.is_err());
        assert_eq!(scheduler.current_period(), Some(Duration::from_millis(1000)));

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(ticks(&scheduler).await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_reports() {
        let mut scheduler = scheduler();
        let mut rx = scheduler.subscribe();
        assert!(rx.borrow().is_none());

        scheduler.start().await;
        rx.changed().await.unwrap();
        let tick = rx.borrow().as_ref().map(|r| r.tick);
        assert_eq!(tick, Some(1));
    }
}
