//! Message bus infrastructure: pattern matching, transports, and the
//! deployment-scoped client.

pub mod memory_bus;
pub mod pattern;
pub mod redis_bus;
pub mod scoped;
pub mod service;

pub use memory_bus::InMemoryBus;
pub use pattern::ChannelPattern;
pub use redis_bus::RedisBus;
pub use scoped::ScopedBus;
pub use service::{BusError, BusResult, Handler, MessageBus, handler};
