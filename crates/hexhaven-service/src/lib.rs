//! Hexhaven service layer.
//!
//! Wraps [`hexhaven_core`] with everything a transport needs and nothing it
//! provides itself: the concurrent lobby registry, the peer-trade registry,
//! per-lobby turn bookkeeping and the plain-request entry points. Message
//! framing, sessions and wire encoding stay with the embedding server.
//!
//! Each lobby runs behind its own exclusive section; registries are
//! concurrent maps, so lobbies never contend with each other.

pub mod lobby;
pub mod service;

// Re-export commonly used types
pub use lobby::{DiceRoll, Lobby};
pub use service::{GameService, ServiceError, TradeRequest};
