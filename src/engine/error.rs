use thiserror::Error;

use super::PersonId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("waiting queue full (capacity {capacity}); person {person:?} not admitted")]
    QueueFull { person: PersonId, capacity: usize },

    #[error("engine needs at least one slot")]
    NoSlots,

    #[error("batch cap must be positive")]
    ZeroBatchCap,

    #[error("waiting queue capacity must be positive")]
    ZeroQueueCapacity,
}
