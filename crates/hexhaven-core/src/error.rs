//! Rule-violation taxonomy shared across the engine.
//!
//! Every variant is a recoverable, caller-visible failure: validation happens
//! before any state is touched, so a returned error means the board, the
//! players and the trade registries are exactly as they were. Construction
//! bugs (a fourth tile on a site, a road re-binding its endpoints) are a
//! different class entirely and panic instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{NodeId, RoadId};

/// Errors produced when a player action violates the game rules.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleError {
    #[error("intersection is occupied by another player's building")]
    IntersectionOccupied,

    #[error("a neighbouring intersection is already built up")]
    SpacingRuleViolation,

    #[error("no adjacent road owned by the player")]
    NoAdjacentRoad,

    #[error("insufficient resources")]
    InsufficientResources,

    #[error("no trade ratio matches the offered resources")]
    InvalidTradeRatio,

    #[error("action attempted outside the player's turn")]
    InvalidTurn,

    #[error("no buildable pieces of this kind remain")]
    BuildableLimitReached,

    #[error("road is already owned")]
    AlreadyOwned,

    #[error("unknown road id {0}")]
    UnknownRoad(RoadId),

    #[error("unknown building site id {0}")]
    UnknownSite(NodeId),

    #[error("invalid board configuration: {0}")]
    Configuration(String),
}
