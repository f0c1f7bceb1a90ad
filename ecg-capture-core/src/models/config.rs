use std::time::Duration;

use super::error::ConfigError;

/// Configuration for the acquisition controller.
///
/// Defaults match the reference rig: AD8232 excitation on line 27,
/// push-button on line 21, ADS1115 channel 0, one sample per second for
/// 30-second batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionConfig {
    /// GPIO line the push-button is read from.
    pub button_line: u32,

    /// GPIO line driving sensor excitation.
    pub excitation_line: u32,

    /// ADC channel sampled during collection.
    pub channel: u8,

    /// Button poll (debounce) interval.
    pub poll_interval: Duration,

    /// Wait after driving excitation active, before sampling begins.
    pub stabilization_delay: Duration,

    /// Wait after driving excitation inactive.
    pub settle_delay: Duration,

    /// Sleep between consecutive samples.
    pub sample_interval: Duration,

    /// Total duration of one batch.
    pub batch_duration: Duration,
}

impl AcquisitionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Validation(
                "poll interval must be positive".into(),
            ));
        }
        if self.sample_interval.is_zero() {
            return Err(ConfigError::Validation(
                "sample interval must be positive".into(),
            ));
        }
        if self.batch_duration < self.sample_interval {
            return Err(ConfigError::Validation(format!(
                "batch duration {:?} is shorter than the sample interval {:?}",
                self.batch_duration, self.sample_interval
            )));
        }
        if self.button_line == self.excitation_line {
            return Err(ConfigError::Validation(
                "button and excitation lines must differ".into(),
            ));
        }
        Ok(())
    }

    /// Number of samples in one batch: `batch_duration / sample_interval`,
    /// rounded down, at least 1. A zero `sample_interval` (which
    /// [`validate`](Self::validate) rejects) yields 1 rather than a
    /// division panic.
    pub fn samples_per_batch(&self) -> usize {
        let n = self
            .batch_duration
            .as_nanos()
            .checked_div(self.sample_interval.as_nanos())
            .unwrap_or(0);
        (n as usize).max(1)
    }
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            button_line: 21,
            excitation_line: 27,
            channel: 0,
            poll_interval: Duration::from_millis(100),
            stabilization_delay: Duration::from_secs(2),
            settle_delay: Duration::from_secs(1),
            sample_interval: Duration::from_secs(1),
            batch_duration: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = AcquisitionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.samples_per_batch(), 30);
    }

    #[test]
    fn zero_intervals_are_rejected() {
        let config = AcquisitionConfig {
            sample_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));

        let config = AcquisitionConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn batch_shorter_than_interval_is_rejected() {
        let config = AcquisitionConfig {
            sample_interval: Duration::from_secs(2),
            batch_duration: Duration::from_secs(1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shared_line_numbers_are_rejected() {
        let config = AcquisitionConfig {
            button_line: 27,
            excitation_line: 27,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn samples_per_batch_rounds_down() {
        let config = AcquisitionConfig {
            sample_interval: Duration::from_millis(2),
            batch_duration: Duration::from_millis(5),
            ..Default::default()
        };
        assert_eq!(config.samples_per_batch(), 2);

        let config = AcquisitionConfig {
            sample_interval: Duration::from_millis(2),
            batch_duration: Duration::from_millis(2),
            ..Default::default()
        };
        assert_eq!(config.samples_per_batch(), 1);
    }

    #[test]
    fn samples_per_batch_survives_an_unvalidated_zero_interval() {
        let config = AcquisitionConfig {
            sample_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.samples_per_batch(), 1);
    }
}
