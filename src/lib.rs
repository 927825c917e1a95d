pub mod analysis; // Scorer, trends, interpretation, dashboard aggregation
pub mod config;
pub mod dashboard;
pub mod db;
pub mod ingest;
pub mod models;
pub mod refresh;

use std::sync::{mpsc, Arc};
use std::time::Duration as StdDuration;

use chrono::{Duration, Local};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::dashboard::DashboardService;
use crate::db::MemoryStore;
use crate::ingest::RawRow;
use crate::models::{PatientId, VitalParameter};

/// How long the demo waits for the first refreshed payload.
const DEMO_REFRESH_WAIT: StdDuration = StdDuration::from_secs(10);

/// Install the fmt subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Demo run: seed the store, import a short bedside series, start the live
/// refresh and print its first payload.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let now = Local::now().naive_local();
    let store = Arc::new(MemoryStore::with_demo_patient(now));
    let service = DashboardService::new(store);

    let start = now
        .date()
        .and_hms_opt(8, 0, 0)
        .ok_or("invalid demo start time")?;
    let series = [(78, 97, 37.1), (96, 95, 37.9), (118, 93, 38.6), (134, 91, 39.2)];
    let rows: Vec<RawRow> = series
        .iter()
        .enumerate()
        .map(|(i, &(hr, spo2, temp))| {
            let at = start + Duration::minutes(10 * i as i64);
            serde_json::from_value::<RawRow>(json!({
                "Time": at.format("%H:%M:%S").to_string(),
                "HeartRate": hr,
                "SpO2": spo2,
                "Temperature": temp,
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = service.import(PatientId(1), &rows, start.date())?;
    tracing::info!(imported = report.imported, "Demo series loaded");

    let (tx, rx) = mpsc::channel();
    let handle = refresh::start_default_refresh(service, PatientId(1), move |dashboard| {
        let _ = tx.send(dashboard);
    });
    let dashboard = rx.recv_timeout(DEMO_REFRESH_WAIT)?;
    drop(handle);

    if let Some(latest) = &dashboard.latest {
        for parameter in VitalParameter::ALL {
            tracing::info!(
                parameter = %parameter,
                value = latest.value(parameter),
                unit = parameter.unit(),
                "Latest vital"
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    Ok(())
}
