use crate::models::error::HardwareError;

/// Interface to one analog-to-digital converter channel.
///
/// One synchronous conversion per call — no internal averaging, no
/// batching. Implemented by ADC chip backends (ADS1115 and friends) and by
/// `SimulatedEcgChannel` in the bench rig.
pub trait AnalogChannel: Send {
    /// Takes one voltage reading, in volts.
    fn sample(&mut self) -> Result<f64, HardwareError>;

    /// Identifier of the underlying channel, for diagnostics and logs.
    fn channel_id(&self) -> u8;
}
