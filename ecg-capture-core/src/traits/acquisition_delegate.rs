use crate::models::error::HardwareError;
use crate::models::state::AcquisitionState;
use crate::storage::session_store::SessionId;

/// Event delegate for acquisition notifications.
///
/// All methods are called from the poll thread; implementations should
/// return quickly and must not block on the controller itself.
pub trait AcquisitionDelegate: Send + Sync {
    /// Called on every state transition.
    fn on_state_changed(&self, state: AcquisitionState);

    /// Called after a completed batch has been durably stored.
    fn on_batch_stored(&self, session_id: SessionId, samples: usize);

    /// Called when a hardware fault was handled (read fail-safe, batch
    /// discarded on a sample failure).
    fn on_error(&self, error: &HardwareError);
}
