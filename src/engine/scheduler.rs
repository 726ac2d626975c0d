//! Periodic task scheduling.
//!
//! Three independent tokio tasks drive the engine: the fine-grained test
//! countdown, the coarse status refresh, and the progression sweep. The
//! periods are never coalesced. Each interval skips missed ticks, so a slow
//! cycle is followed by at most one tick, never a burst.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::errors::{Error, Result};

use super::Engine;

struct Running {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

/// Tracks the three periodic tasks. Start and stop are all-or-nothing: the
/// tasks share one shutdown signal and `stop` joins every handle before
/// returning.
#[derive(Default)]
pub(crate) struct Scheduler {
    running: Mutex<Option<Running>>,
}

impl Scheduler {
    pub(crate) fn start(&self, engine: Engine) -> Result<()> {
        let mut running = self.running.lock().unwrap();
        if running.is_some() {
            return Err(Error::AlreadyRunning);
        }

        let (shutdown, rx) = watch::channel(false);
        let scheduler_config = engine.config().scheduler.clone();
        let handles = vec![
            spawn_periodic(
                "countdown",
                scheduler_config.countdown_interval(),
                rx.clone(),
                {
                    let engine = engine.clone();
                    move || engine.countdown_cycle()
                },
            ),
            spawn_periodic(
                "refresh",
                scheduler_config.refresh_interval(),
                rx.clone(),
                {
                    let engine = engine.clone();
                    move || engine.refresh_cycle()
                },
            ),
            spawn_periodic("sweep", scheduler_config.sweep_interval(), rx, move || {
                engine.sweep_cycle()
            }),
        ];

        *running = Some(Running { shutdown, handles });
        info!("scheduler started");
        Ok(())
    }

    pub(crate) async fn stop(&self) -> Result<()> {
        let running = self.running.lock().unwrap().take();
        let Some(Running { shutdown, handles }) = running else {
            return Err(Error::NotRunning);
        };

        let _ = shutdown.send(true);
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("periodic task join failed: {e}");
            }
        }
        info!("scheduler stopped");
        Ok(())
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.lock().unwrap().is_some()
    }
}

/// Spawn one periodic task. A failed cycle is logged and the schedule
/// continues; only the shutdown signal ends the loop.
fn spawn_periodic<F>(
    name: &'static str,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    cycle: F,
) -> JoinHandle<()>
where
    F: Fn() -> Result<()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Skip the immediate first tick
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = cycle() {
                        warn!(task = name, "periodic cycle failed: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    debug!(task = name, "periodic task stopped");
                    break;
                }
            }
        }
    })
}
