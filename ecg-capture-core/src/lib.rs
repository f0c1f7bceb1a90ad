//! # ecg-capture-core
//!
//! Hardware-agnostic biosignal acquisition core library.
//!
//! Provides the button-gated acquisition state machine, authenticated
//! encryption of sample batches, the append-only SQLite session store,
//! and plain-text export. Board-specific line and ADC drivers implement
//! the `DigitalIo` and `AnalogChannel` traits and plug into the generic
//! `AcquisitionController`.
//!
//! ## Architecture
//!
//! ```text
//! ecg-capture-core (this crate)
//! ├── traits/       ← DigitalIo, AnalogChannel, BatchCodec, AcquisitionDelegate
//! ├── models/       ← HardwareError, AcquisitionState, AcquisitionConfig, SampleBatch
//! ├── crypto/       ← SecretKey, AesGcmCodec (AES-256-GCM batch sealing)
//! ├── acquisition/  ← AcquisitionController (generic poll loop)
//! ├── storage/      ← SessionStore (encrypted append-only session log)
//! └── export/       ← plain-text batch rendering
//! ```

pub mod acquisition;
pub mod crypto;
pub mod export;
pub mod models;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use acquisition::controller::AcquisitionController;
pub use crypto::aes_gcm::AesGcmCodec;
pub use crypto::key::SecretKey;
pub use models::batch::SampleBatch;
pub use models::config::AcquisitionConfig;
pub use models::error::{CodecError, ConfigError, HardwareError, StoreError};
pub use models::state::{AcquisitionDiagnostics, AcquisitionState};
pub use storage::session_store::{SessionId, SessionStore};
pub use traits::acquisition_delegate::AcquisitionDelegate;
pub use traits::analog_channel::AnalogChannel;
pub use traits::codec::BatchCodec;
pub use traits::digital_io::{DigitalIo, LineLevel};
