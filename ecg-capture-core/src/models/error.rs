use thiserror::Error;

/// Failures at the hardware boundary (digital lines, analog channel).
///
/// Raised by `DigitalIo` / `AnalogChannel` backends; the controller decides
/// recovery. Read and sample failures carry the line/channel identity so
/// logs point at the physical pin.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HardwareError {
    #[error("read failed on line {line}: {reason}")]
    Read { line: u32, reason: String },

    #[error("write failed on line {line}: {reason}")]
    Write { line: u32, reason: String },

    #[error("sample failed on channel {channel}: {reason}")]
    Sample { channel: u8, reason: String },
}

/// Errors from the authenticated batch codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The ciphertext failed authentication: tampered data or wrong key.
    #[error("ciphertext failed authentication")]
    AuthenticationFailed,

    /// The input is too short or otherwise not a valid sealed box.
    #[error("malformed ciphertext: {0}")]
    MalformedInput(String),

    #[error("encryption failed")]
    EncryptFailed,
}

/// Errors from the encrypted session store.
///
/// Codec failures pass through unchanged so callers can tell tampering
/// apart from an empty store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("refusing to persist an empty batch")]
    EmptyBatch,

    #[error("refusing to persist a non-finite sample")]
    NonFiniteSample,
}

/// Startup configuration errors. All of these are fatal: the acquisition
/// loop must not start with a missing or invalid key or configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment: {0}")]
    Env(#[from] std::env::VarError),

    #[error("invalid session key: {0}")]
    Key(String),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
