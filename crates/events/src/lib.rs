//! Audit events and their pub/sub transport.
//!
//! Domain crates define concrete event enums and implement [`Event`] for them;
//! this crate only knows how to wrap and distribute them.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
