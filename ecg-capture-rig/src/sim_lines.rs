use std::collections::HashMap;
use std::time::{Duration, Instant};

use ecg_capture_core::{DigitalIo, HardwareError, LineLevel};

/// Deterministic stand-in for the board's digital lines.
///
/// The configured button line follows a fixed wall-clock schedule:
/// released for `release`, then held for `hold`, repeating. Every other
/// line is treated as an output; driven levels are remembered so the
/// excitation line can be inspected.
pub struct SimulatedLines {
    button_line: u32,
    hold: Duration,
    release: Duration,
    started: Instant,
    outputs: HashMap<u32, LineLevel>,
}

impl SimulatedLines {
    pub fn new(button_line: u32, hold: Duration, release: Duration) -> Self {
        Self {
            button_line,
            hold,
            release,
            started: Instant::now(),
            outputs: HashMap::new(),
        }
    }

    /// Last level driven on an output line, if any.
    pub fn driven_level(&self, line: u32) -> Option<LineLevel> {
        self.outputs.get(&line).copied()
    }

    /// Button level at this point of the schedule. A zero `hold` pins the
    /// button released; a zero `release` pins it held.
    fn scheduled_level(&self) -> LineLevel {
        if self.hold.is_zero() {
            return LineLevel::Inactive;
        }
        if self.release.is_zero() {
            return LineLevel::Active;
        }
        let period = self.hold + self.release;
        let phase =
            Duration::from_nanos((self.started.elapsed().as_nanos() % period.as_nanos()) as u64);
        if phase < self.release {
            LineLevel::Inactive
        } else {
            LineLevel::Active
        }
    }
}

impl DigitalIo for SimulatedLines {
    fn read(&mut self, line: u32) -> Result<LineLevel, HardwareError> {
        if line != self.button_line {
            return Err(HardwareError::Read {
                line,
                reason: "not an input line".into(),
            });
        }
        Ok(self.scheduled_level())
    }

    fn write(&mut self, line: u32, level: LineLevel) -> Result<(), HardwareError> {
        if line == self.button_line {
            return Err(HardwareError::Write {
                line,
                reason: "button line is not an output".into(),
            });
        }
        let previous = self.outputs.insert(line, level);
        if previous != Some(level) {
            log::debug!("line {} driven {:?}", line, level);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn schedule_starts_released() {
        let mut lines =
            SimulatedLines::new(21, Duration::from_secs(35), Duration::from_secs(10));
        assert_eq!(lines.read(21).unwrap(), LineLevel::Inactive);
    }

    #[test]
    fn schedule_cycles_between_released_and_held() {
        let mut lines =
            SimulatedLines::new(21, Duration::from_millis(20), Duration::from_millis(20));
        assert_eq!(lines.read(21).unwrap(), LineLevel::Inactive);

        thread::sleep(Duration::from_millis(25));
        assert_eq!(lines.read(21).unwrap(), LineLevel::Active);
    }

    #[test]
    fn zero_release_pins_the_button_held() {
        let mut lines = SimulatedLines::new(21, Duration::from_secs(1), Duration::ZERO);
        assert_eq!(lines.read(21).unwrap(), LineLevel::Active);
    }

    #[test]
    fn zero_hold_pins_the_button_released() {
        let mut lines = SimulatedLines::new(21, Duration::ZERO, Duration::from_secs(1));
        assert_eq!(lines.read(21).unwrap(), LineLevel::Inactive);

        let mut degenerate = SimulatedLines::new(21, Duration::ZERO, Duration::ZERO);
        assert_eq!(degenerate.read(21).unwrap(), LineLevel::Inactive);
    }

    #[test]
    fn remembers_driven_levels() {
        let mut lines =
            SimulatedLines::new(21, Duration::from_secs(1), Duration::from_secs(1));
        assert_eq!(lines.driven_level(27), None);

        lines.write(27, LineLevel::Active).unwrap();
        assert_eq!(lines.driven_level(27), Some(LineLevel::Active));

        lines.write(27, LineLevel::Inactive).unwrap();
        assert_eq!(lines.driven_level(27), Some(LineLevel::Inactive));
    }

    #[test]
    fn rejects_io_against_line_direction() {
        let mut lines =
            SimulatedLines::new(21, Duration::from_secs(1), Duration::from_secs(1));
        assert!(matches!(
            lines.read(27),
            Err(HardwareError::Read { line: 27, .. })
        ));
        assert!(matches!(
            lines.write(21, LineLevel::Active),
            Err(HardwareError::Write { line: 21, .. })
        ));
    }
}
