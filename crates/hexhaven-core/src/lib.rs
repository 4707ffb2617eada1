//! Hexhaven - simulation core for a hexagonal settlement-building game
//!
//! This crate is the authoritative rules engine: it builds the board graph,
//! enforces placement and trading rules, distributes production and computes
//! derived state (longest road, victory points). It never touches
//! connections, sessions or wire formats - callers hand in plain ids and
//! resource maps and get plain results or [`RuleError`]s back.
//!
//! # Modules
//!
//! - [`geometry`]: plane math, the 60°-polar unit offsets and the ring-walk
//!   rhythm behind board construction
//! - [`tiles`]: tile types and the ordered, numbered, placed tile list
//! - [`graph`]: the arena of building sites and roads, and its builder
//! - [`placement`]: the `Empty → Settlement → City` rule machine
//! - [`longest_road`]: longest simple path over a player's roads
//! - [`trade`]: ports, trade ratios and the bank fallback
//! - [`production`]: dice-roll fan-out to buildings
//! - [`snapshot`]: serialization-ready board views
//! - [`player`], [`resources`]: player state, resource hands and costs
//! - [`error`]: the caller-visible rule-violation taxonomy

pub mod error;
pub mod geometry;
pub mod graph;
pub mod longest_road;
pub mod placement;
pub mod player;
pub mod production;
pub mod resources;
pub mod snapshot;
pub mod tiles;
pub mod trade;

// Re-export commonly used types
pub use error::RuleError;
pub use graph::{BoardGraph, Building, BuildingKind, BuildingSite, GraphBuilder, NodeId, Road,
    RoadId, TileId};
pub use longest_road::longest_route;
pub use player::{Player, PlayerColor, PlayerId};
pub use production::Payout;
pub use resources::{costs, Resource, ResourceHand};
pub use snapshot::BoardSnapshot;
pub use tiles::{Tile, TileKind, TileListBuilder};
pub use trade::{bank_accepts, validate_exchange, Port, PortKind, BANK_RATIO};
