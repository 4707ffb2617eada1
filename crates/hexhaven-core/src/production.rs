//! Resource distribution for dice rolls.
//!
//! Every building site is subscribed to the tiles it touches. A roll
//! resolves to one synchronous dispatch: every tile whose value matches the
//! total notifies its subscribed sites exactly once, a site without a
//! building ignores the notification, a site with a building credits the
//! owner with the building's yield of the tile's resource. Desert tiles
//! carry no value and never match.

use serde::{Deserialize, Serialize};

use crate::graph::{BoardGraph, NodeId, TileId};
use crate::player::PlayerId;
use crate::resources::Resource;

/// One production credit from a single tile to a single building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub player: PlayerId,
    pub resource: Resource,
    pub amount: u32,
    pub site: NodeId,
    pub tile: TileId,
}

impl BoardGraph {
    /// Resolve the payouts for a rolled total. The board itself is not
    /// mutated; the caller applies the credits to its player pools.
    pub fn distribute_roll(&self, total: u8) -> Vec<Payout> {
        let mut payouts = Vec::new();
        for (tile_id, tile) in self.tiles().iter().enumerate() {
            if !tile.produces_on(total) {
                continue;
            }
            let resource = tile
                .kind()
                .resource()
                .expect("producing tile carries a resource");

            for site in self.subscribers_of(tile_id) {
                if let Some(building) = site.building() {
                    payouts.push(Payout {
                        player: building.owner,
                        resource,
                        amount: building.kind.yield_per_tile(),
                        site: site.id(),
                        tile: tile_id,
                    });
                }
            }
        }
        payouts
    }
}
