use std::f64::consts::PI;
use std::time::Instant;

use ecg_capture_core::{AnalogChannel, HardwareError};

/// Rail midpoint of the simulated 3.3 V analog front end.
const MIDSCALE_VOLTS: f64 = 1.65;
/// Peak deviation around midscale.
const AMPLITUDE_VOLTS: f64 = 0.6;
/// 75 beats per minute.
const FREQUENCY_HZ: f64 = 1.25;

/// Synthetic ECG-like waveform source.
///
/// Produces a midscale-centred sine at resting heart rate so exported
/// traces look plausible without hardware attached. Sampling never fails.
pub struct SimulatedEcgChannel {
    channel: u8,
    started: Instant,
}

impl SimulatedEcgChannel {
    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            started: Instant::now(),
        }
    }
}

impl AnalogChannel for SimulatedEcgChannel {
    fn sample(&mut self) -> Result<f64, HardwareError> {
        let t = self.started.elapsed().as_secs_f64();
        Ok(MIDSCALE_VOLTS + AMPLITUDE_VOLTS * (2.0 * PI * FREQUENCY_HZ * t).sin())
    }

    fn channel_id(&self) -> u8 {
        self.channel
    }
}
