//! Scheduled dashboard refresh for live display.
//!
//! Spawns a background thread that recomputes one patient's dashboard
//! every `interval` and hands each payload to a callback. The analysis
//! engine knows nothing about this cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::analysis::Dashboard;
use crate::config::DEFAULT_REFRESH_INTERVAL;
use crate::dashboard::DashboardService;
use crate::db::{PatientRepository, ReadingRepository};
use crate::models::PatientId;

/// Sleep granularity for shutdown responsiveness.
const SLEEP_GRANULARITY: Duration = Duration::from_millis(50);

/// Handle for the refresh thread.
///
/// Supports graceful shutdown via `shutdown()` or automatic cleanup on `Drop`.
pub struct RefreshHandle {
    shutdown: Arc<AtomicBool>,
    interval: Duration,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl RefreshHandle {
    /// Request shutdown. An in-flight refresh completes; no new one starts.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Cadence the thread was started with.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

/// Start refreshing `patient_id` at the bedside polling cadence.
pub fn start_default_refresh<S, F>(
    service: DashboardService<S>,
    patient_id: PatientId,
    on_update: F,
) -> RefreshHandle
where
    S: ReadingRepository + PatientRepository + 'static,
    F: FnMut(Dashboard) + Send + 'static,
{
    start_refresh(service, patient_id, DEFAULT_REFRESH_INTERVAL, on_update)
}

/// Start refreshing `patient_id` every `interval`. The first refresh runs immediately.
pub fn start_refresh<S, F>(
    service: DashboardService<S>,
    patient_id: PatientId,
    interval: Duration,
    on_update: F,
) -> RefreshHandle
where
    S: ReadingRepository + PatientRepository + 'static,
    F: FnMut(Dashboard) + Send + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    let handle = std::thread::spawn(move || {
        tracing::info!(
            patient_id = %patient_id,
            interval_ms = interval.as_millis() as u64,
            "Dashboard refresh started"
        );
        refresh_loop(&service, patient_id, interval, on_update, &flag);
        tracing::info!(patient_id = %patient_id, "Dashboard refresh stopped");
    });

    RefreshHandle {
        shutdown,
        interval,
        handle: Some(handle),
    }
}

fn refresh_loop<S, F>(
    service: &DashboardService<S>,
    patient_id: PatientId,
    interval: Duration,
    mut on_update: F,
    shutdown: &AtomicBool,
) where
    S: ReadingRepository + PatientRepository,
    F: FnMut(Dashboard),
{
    while !shutdown.load(Ordering::Relaxed) {
        match service.dashboard(patient_id) {
            Ok(dashboard) => on_update(dashboard),
            Err(e) => {
                tracing::warn!(patient_id = %patient_id, error = %e, "Dashboard refresh failed");
            }
        }

        // Sleep in small increments for responsive shutdown
        let deadline = Instant::now() + interval;
        loop {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(SLEEP_GRANULARITY.min(deadline - now));
        }
    }
}
