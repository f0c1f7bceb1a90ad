use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::models::batch::SampleBatch;
use crate::models::config::AcquisitionConfig;
use crate::models::error::{ConfigError, HardwareError};
use crate::models::state::{AcquisitionDiagnostics, AcquisitionState};
use crate::storage::session_store::SessionStore;
use crate::traits::acquisition_delegate::AcquisitionDelegate;
use crate::traits::analog_channel::AnalogChannel;
use crate::traits::digital_io::{DigitalIo, LineLevel};

/// Internal mutable controller state, protected by `parking_lot::Mutex`.
struct ControllerStatus {
    state: AcquisitionState,
    diagnostics: AcquisitionDiagnostics,
}

impl ControllerStatus {
    fn new() -> Self {
        Self {
            state: AcquisitionState::Idle,
            diagnostics: AcquisitionDiagnostics::default(),
        }
    }
}

/// Button-gated acquisition orchestrator.
///
/// Generic over the digital line driver and the analog input via the
/// `DigitalIo` and `AnalogChannel` traits. Owns the `SessionStore` and
/// drives one poll step per tick of [`run`](Self::run):
///
/// ```text
/// [Idle] ──── button active ────▶ excitation on → stabilize ──▶ [Collecting]
/// [Collecting] ─ button active ─▶ fixed-duration batch ──▶ SessionStore
/// [Collecting] ─ button inactive ▶ excitation off → settle ──▶ [Idle]
/// ```
///
/// The button is deliberately *not* re-checked inside a running batch: a
/// press commits the controller to a full batch, and holding the button
/// re-arms the next batch on the following poll. The shutdown flag *is*
/// checked between samples, so termination never waits out a full batch.
/// On every exit path — clean shutdown, hardware fault, drop — the
/// excitation line is driven inactive again.
pub struct AcquisitionController<D: DigitalIo, A: AnalogChannel> {
    digital: D,
    analog: A,
    store: SessionStore,
    config: AcquisitionConfig,
    status: Arc<Mutex<ControllerStatus>>,
    delegate: Option<Arc<dyn AcquisitionDelegate>>,
}

impl<D: DigitalIo, A: AnalogChannel> AcquisitionController<D, A> {
    /// Builds a controller over validated configuration.
    ///
    /// Performs no hardware I/O; lines are first touched by `run`.
    pub fn new(
        digital: D,
        analog: A,
        store: SessionStore,
        config: AcquisitionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            digital,
            analog,
            store,
            config,
            status: Arc::new(Mutex::new(ControllerStatus::new())),
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn AcquisitionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> AcquisitionState {
        self.status.lock().state
    }

    pub fn diagnostics(&self) -> AcquisitionDiagnostics {
        self.status.lock().diagnostics.clone()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Polls the button until `shutdown` is set, collecting and storing a
    /// batch for every poll that finds the button held.
    ///
    /// Returns when `shutdown` is observed or a line read/write fails; the
    /// excitation line is driven inactive before returning either way. The
    /// flag is also observed between samples, so a request arriving
    /// mid-batch discards the partial batch instead of waiting it out.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<(), HardwareError> {
        self.digital
            .write(self.config.excitation_line, LineLevel::Inactive)?;
        log::info!(
            "acquisition loop started (button line {}, excitation line {}, channel P{})",
            self.config.button_line,
            self.config.excitation_line,
            self.analog.channel_id()
        );

        let result = loop {
            if shutdown.load(Ordering::SeqCst) {
                break Ok(());
            }
            if let Err(e) = self.poll_once(shutdown) {
                break Err(e);
            }
            thread::sleep(self.config.poll_interval);
        };

        self.force_excitation_inactive();
        self.set_state(AcquisitionState::Idle);
        log::info!("acquisition loop stopped");
        result
    }

    // --- Internal helpers ---

    /// One poll step: read the button and advance the state machine.
    ///
    /// A button read failure is fatal — without the button the controller
    /// is blind, so it fails safe and propagates the error.
    fn poll_once(&mut self, shutdown: &AtomicBool) -> Result<(), HardwareError> {
        let level = match self.digital.read(self.config.button_line) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Failed to read button line: {}", e);
                self.force_excitation_inactive();
                self.set_state(AcquisitionState::Idle);
                self.notify_error(&e);
                return Err(e);
            }
        };

        match (self.state(), level) {
            (AcquisitionState::Idle, LineLevel::Active) => self.begin_collecting(),
            (AcquisitionState::Collecting, LineLevel::Active) => {
                self.collect_batch(shutdown);
                Ok(())
            }
            (AcquisitionState::Collecting, LineLevel::Inactive) => self.end_collecting(),
            (AcquisitionState::Idle, LineLevel::Inactive) => Ok(()),
        }
    }

    /// Activate the excitation line, wait for the signal to stabilize,
    /// then enter `Collecting`. Transitions: idle → collecting.
    fn begin_collecting(&mut self) -> Result<(), HardwareError> {
        log::info!("button pressed, starting data collection");
        if let Err(e) = self
            .digital
            .write(self.config.excitation_line, LineLevel::Active)
        {
            log::error!("Failed to activate excitation line: {}", e);
            self.force_excitation_inactive();
            self.notify_error(&e);
            return Err(e);
        }
        thread::sleep(self.config.stabilization_delay);
        self.set_state(AcquisitionState::Collecting);
        Ok(())
    }

    /// Deactivate the excitation line, let it settle, then return to
    /// `Idle`. Transitions: collecting → idle.
    fn end_collecting(&mut self) -> Result<(), HardwareError> {
        log::info!("button released, stopping data collection");
        let result = self
            .digital
            .write(self.config.excitation_line, LineLevel::Inactive);
        if let Err(ref e) = result {
            log::error!("Failed to deactivate excitation line: {}", e);
            self.notify_error(e);
        }
        thread::sleep(self.config.settle_delay);
        self.set_state(AcquisitionState::Idle);
        result
    }

    /// Collect one fixed-duration batch and hand it to the store.
    ///
    /// The button is not consulted here; a started batch runs to
    /// completion unless a sample read fails (partial batch discarded,
    /// fail safe to `Idle`) or shutdown is requested (partial batch
    /// discarded, `run` handles the cleanup). A store failure loses the
    /// batch but never stops acquisition.
    fn collect_batch(&mut self, shutdown: &AtomicBool) {
        let count = self.config.samples_per_batch();
        let mut batch = SampleBatch::with_capacity(count);
        log::info!(
            "collecting {} samples over {:?}",
            count,
            self.config.batch_duration
        );

        for _ in 0..count {
            if shutdown.load(Ordering::SeqCst) {
                log::info!(
                    "shutdown requested, discarding partial batch ({} of {} samples)",
                    batch.len(),
                    count
                );
                return;
            }
            match self.analog.sample() {
                Ok(volts) => {
                    log::debug!("collected P{}: {:.3}V", self.analog.channel_id(), volts);
                    batch.push(volts);
                }
                Err(e) => {
                    log::error!("Sample acquisition failed, discarding batch: {}", e);
                    self.status.lock().diagnostics.sample_failures += 1;
                    self.force_excitation_inactive();
                    self.set_state(AcquisitionState::Idle);
                    self.notify_error(&e);
                    return;
                }
            }
            thread::sleep(self.config.sample_interval);
        }

        let samples = batch.len();
        {
            let mut s = self.status.lock();
            s.diagnostics.batches_completed += 1;
            s.diagnostics.samples_collected += samples as u64;
        }

        match self.store.write(batch) {
            Ok(id) => {
                log::info!("session {} stored ({} samples)", id, samples);
                if let Some(ref delegate) = self.delegate {
                    delegate.on_batch_stored(id, samples);
                }
            }
            Err(e) => {
                log::error!("Failed to store session, batch lost: {}", e);
                self.status.lock().diagnostics.store_failures += 1;
            }
        }
    }

    fn set_state(&self, new_state: AcquisitionState) {
        let changed = {
            let mut s = self.status.lock();
            let changed = s.state != new_state;
            if changed {
                log::debug!("state: {:?} -> {:?}", s.state, new_state);
                s.state = new_state;
            }
            changed
        };
        if changed {
            if let Some(ref delegate) = self.delegate {
                delegate.on_state_changed(new_state);
            }
        }
    }

    /// Best-effort deactivation used on every exit and failure path.
    fn force_excitation_inactive(&mut self) {
        if let Err(e) = self
            .digital
            .write(self.config.excitation_line, LineLevel::Inactive)
        {
            log::error!("Failed to deactivate excitation line: {}", e);
        }
    }

    fn notify_error(&self, error: &HardwareError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }
}

impl<D: DigitalIo, A: AnalogChannel> Drop for AcquisitionController<D, A> {
    fn drop(&mut self) {
        self.force_excitation_inactive();
    }
}
