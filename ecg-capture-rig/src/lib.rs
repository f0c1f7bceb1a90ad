//! # ecg-capture-rig
//!
//! Simulation rig and acquisition daemon for ecg-capture-kit.
//!
//! Provides:
//! - `SimulatedLines` — digital I/O with a time-scheduled button and recorded output lines
//! - `SimulatedEcgChannel` — synthetic ECG-like analog source
//!
//! The `ecg-capture-rig` binary wires both into the generic
//! `AcquisitionController` and runs the acquisition loop until SIGINT or
//! SIGTERM, then exports the most recent session as plain text.
//!
//! ## Usage
//! ```ignore
//! use ecg_capture_core::{AcquisitionConfig, AcquisitionController};
//! use ecg_capture_rig::{SimulatedEcgChannel, SimulatedLines};
//!
//! let config = AcquisitionConfig::default();
//! let lines = SimulatedLines::new(config.button_line, hold, release);
//! let channel = SimulatedEcgChannel::new(config.channel);
//! let mut controller = AcquisitionController::new(lines, channel, store, config).unwrap();
//! ```

pub mod sim_channel;
pub mod sim_lines;

pub use sim_channel::SimulatedEcgChannel;
pub use sim_lines::SimulatedLines;
