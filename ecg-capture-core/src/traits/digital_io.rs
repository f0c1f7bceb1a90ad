use crate::models::error::HardwareError;

/// Logical level of a digital line.
///
/// `Active` is the asserted level after bias handling: a pressed pull-up
/// button reads `Active` here even though the electrical level is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Inactive,
    Active,
}

impl LineLevel {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Interface to a requested bank of digital lines.
///
/// Implemented by GPIO character-device backends on the target board and
/// by `SimulatedLines` in the bench rig. Calls are synchronous and polled;
/// there is no event subscription.
pub trait DigitalIo: Send {
    /// Reads the current level of an input line.
    fn read(&mut self, line: u32) -> Result<LineLevel, HardwareError>;

    /// Drives an output line to the given level.
    fn write(&mut self, line: u32, level: LineLevel) -> Result<(), HardwareError>;
}
