//! Ports and trade-ratio validation.
//!
//! A port is attached to at most one building site and grants a favorable
//! exchange ratio to whoever builds there: 3:1 for general ports, 2:1 for a
//! single fixed resource. Without a reachable port the bank still trades at
//! 4:1. All checks are pure; the service layer owns execution order and the
//! atomic hand swap.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::graph::NodeId;
use crate::resources::{Resource, ResourceHand};

/// The bank's fallback exchange rate when no port applies.
pub const BANK_RATIO: u32 = 4;

/// Port variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortKind {
    /// 3:1, any single resource type per bundle.
    General,
    /// 2:1 for one fixed resource type.
    Specific(Resource),
}

impl PortKind {
    /// The exchange ratio for this port.
    pub fn ratio(&self) -> u32 {
        match self {
            PortKind::General => 3,
            PortKind::Specific(_) => 2,
        }
    }

    /// The standard port set: four general ports plus one specific port per
    /// resource type.
    pub fn standard_set() -> Vec<PortKind> {
        let mut kinds = vec![PortKind::General; 4];
        kinds.extend(Resource::ALL.map(PortKind::Specific));
        kinds
    }
}

/// A port on the board, attached to one building site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    kind: PortKind,
    site: NodeId,
}

impl Port {
    pub fn new(kind: PortKind, site: NodeId) -> Self {
        Self { kind, site }
    }

    pub fn kind(&self) -> PortKind {
        self.kind
    }

    pub fn site(&self) -> NodeId {
        self.site
    }

    /// Whether this port accepts the offered bundle against the desired one.
    ///
    /// Shared ratio rule: the offered total must be a positive multiple of
    /// the ratio and convert exactly into the desired total. General ports
    /// additionally demand every offered type forms whole bundles (no mixed
    /// bundles); specific ports accept exactly their own resource. A type
    /// appearing on both sides is always rejected.
    pub fn can_trade(&self, offered: &ResourceHand, desired: &ResourceHand) -> bool {
        let ratio = self.kind.ratio();
        if !ratio_holds(offered, desired, ratio) {
            return false;
        }
        match self.kind {
            PortKind::General => offered
                .kinds()
                .into_iter()
                .all(|r| offered.get(r) % ratio == 0),
            PortKind::Specific(resource) => offered.kinds() == vec![resource],
        }
    }
}

/// The 4:1 bank fallback: one offered resource type, whole bundles.
pub fn bank_accepts(offered: &ResourceHand, desired: &ResourceHand) -> bool {
    ratio_holds(offered, desired, BANK_RATIO) && offered.kinds().len() == 1
}

fn ratio_holds(offered: &ResourceHand, desired: &ResourceHand, ratio: u32) -> bool {
    let total = offered.total();
    total > 0 && total % ratio == 0 && total / ratio == desired.total() && disjoint(offered, desired)
}

/// No self-trades: a type present in both hands invalidates the exchange.
fn disjoint(offered: &ResourceHand, desired: &ResourceHand) -> bool {
    Resource::ALL
        .into_iter()
        .all(|r| offered.get(r) == 0 || desired.get(r) == 0)
}

/// Validate a bank-trade request against the ports the player can reach,
/// falling back to the 4:1 bank rate.
pub fn validate_exchange(
    offered: &ResourceHand,
    desired: &ResourceHand,
    reachable_ports: &[&Port],
) -> Result<(), RuleError> {
    if reachable_ports.iter().any(|p| p.can_trade(offered, desired)) {
        return Ok(());
    }
    if bank_accepts(offered, desired) {
        return Ok(());
    }
    Err(RuleError::InvalidTradeRatio)
}
