use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ecg_capture_core::{
    export, AcquisitionConfig, AcquisitionController, AesGcmCodec, ConfigError, HardwareError,
    SecretKey, SessionStore, StoreError,
};
use ecg_capture_rig::{SimulatedEcgChannel, SimulatedLines};

/// Environment variable holding the base64- or hex-encoded 256-bit
/// session key.
const KEY_ENV: &str = "ECG_SESSION_KEY";
/// Optional override for the session database path.
const STORE_PATH_ENV: &str = "ECG_STORE_PATH";
const DEFAULT_STORE_PATH: &str = "sensor_data.db";

/// Simulated button schedule: released 10 s, then held 35 s — long
/// enough for one full batch per hold.
const SIM_HOLD: Duration = Duration::from_secs(35);
const SIM_RELEASE: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
enum DaemonError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Hardware(#[from] HardwareError),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("failed to export session: {0}")]
    Export(#[from] std::io::Error),
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("fatal: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DaemonError> {
    let key = SecretKey::from_env(KEY_ENV)?;
    log::info!("session key loaded (fingerprint {})", key.fingerprint());

    let store_path = std::env::var(STORE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));
    let store = SessionStore::open(&store_path, Box::new(AesGcmCodec::new(&key)))?;
    log::info!(
        "session store at {} ({} sessions)",
        store_path.display(),
        store.session_count()?
    );

    let config = AcquisitionConfig::default();
    let lines = SimulatedLines::new(config.button_line, SIM_HOLD, SIM_RELEASE);
    let channel = SimulatedEcgChannel::new(config.channel);
    let mut controller = AcquisitionController::new(lines, channel, store, config)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;

    controller.run(&shutdown)?;

    let diag = controller.diagnostics();
    log::info!(
        "acquisition finished: {} batches, {} samples ({} sample failures, {} store failures)",
        diag.batches_completed,
        diag.samples_collected,
        diag.sample_failures,
        diag.store_failures
    );

    export_latest(&controller)
}

/// Writes the most recent session to a timestamped plain-text file in
/// the working directory.
fn export_latest(
    controller: &AcquisitionController<SimulatedLines, SimulatedEcgChannel>,
) -> Result<(), DaemonError> {
    let Some(batch) = controller.store().latest()? else {
        log::info!("no sessions to export");
        return Ok(());
    };

    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = format!("data_{}.txt", stamp);
    fs::write(&path, export::render_batch(&batch))?;
    log::info!(
        "exported latest session ({} samples) to {}",
        batch.len(),
        path
    );
    Ok(())
}
