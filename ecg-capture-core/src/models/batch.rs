use serde::{Deserialize, Serialize};

/// One contiguous, fixed-duration run of analog samples collected while
/// the controller is in `Collecting`.
///
/// Samples are kept in acquisition order. The batch serializes
/// transparently as a bare JSON array (`[0.1,0.2]`) — the canonical
/// plaintext form the session store encrypts.
///
/// Lifecycle: created empty on entry to `Collecting`, appended to by the
/// sampling loop, then moved by value into `SessionStore::write`. The move
/// is what makes a completed batch immutable: the controller cannot touch
/// it again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleBatch {
    samples: Vec<f64>,
}

impl SampleBatch {
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Appends one voltage reading.
    pub fn push(&mut self, voltage: f64) {
        self.samples.push(voltage);
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when every sample is a finite number.
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|v| v.is_finite())
    }
}

impl From<Vec<f64>> for SampleBatch {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}
