use thiserror::Error;

/// Errors that can occur within the slot scheduler.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Persisting the plan document failed.
    #[error("State error: {0}")]
    State(#[from] clipcast_state::StateError),

    /// The slot does not exist in the current plan.
    #[error("Slot index out of range: {index}")]
    SlotOutOfRange { index: usize },
}

pub type Result<T> = std::result::Result<T, PlanError>;
