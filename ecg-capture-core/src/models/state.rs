/// Acquisition controller state machine.
///
/// State transitions (polled at the debounce interval):
/// ```text
/// idle ──(button active: excite + stabilize)──→ collecting
/// collecting ──(button held)──→ collecting      (batch after batch)
/// collecting ──(button inactive: settle)──→ idle
/// ```
///
/// There is no terminal state: the controller runs until the process is
/// told to stop, and the excitation line is driven inactive on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Idle,
    Collecting,
}

impl AcquisitionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self, Self::Collecting)
    }
}

/// Diagnostics for debugging acquisition runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionDiagnostics {
    pub batches_completed: u64,
    pub samples_collected: u64,
    pub sample_failures: u64,
    pub store_failures: u64,
}
