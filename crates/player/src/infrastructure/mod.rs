//! Infrastructure adapters for the player ports

pub mod engine_lookup;
pub mod timers;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use engine_lookup::EngineReferenceLookup;
pub use timers::TokioTimers;
