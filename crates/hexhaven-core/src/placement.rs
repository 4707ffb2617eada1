//! Placement rules: road ownership and the building state machine.
//!
//! A building site moves `Empty → Settlement → City`; a city is terminal.
//! The occupancy check rejects any builder who is not the current owner.
//! Only a placement onto an empty site runs the spacing rule (no building on
//! any neighbouring site) and the adjacency rule (at least one connected
//! road owned by the builder). All checks complete before anything is
//! written, so a failed placement leaves the board untouched.

use crate::error::RuleError;
use crate::graph::{BoardGraph, Building, BuildingKind, NodeId, RoadId};
use crate::player::{PlayerColor, PlayerId};

impl BoardGraph {
    // ==================== Roads ====================

    /// Claim an unowned road. There is no adjacency precondition on roads;
    /// ownership is first come, first served.
    pub fn place_road(&mut self, player: PlayerId, road: RoadId) -> Result<(), RuleError> {
        let existing = self.road(road).ok_or(RuleError::UnknownRoad(road))?;
        if existing.owner().is_some() {
            return Err(RuleError::AlreadyOwned);
        }
        self.road_mut(road)
            .expect("road existence checked above")
            .set_owner(player);
        Ok(())
    }

    // ==================== Buildings ====================

    /// Place a settlement for the player.
    pub fn place_settlement(&mut self, player: PlayerId, site: NodeId) -> Result<(), RuleError> {
        self.place_building(site, BuildingKind::Settlement, player)
    }

    /// Replace the player's settlement with a city. Gating on an existing
    /// settlement is the caller's responsibility; the engine re-checks
    /// ownership through the occupancy rule.
    pub fn upgrade_to_city(&mut self, player: PlayerId, site: NodeId) -> Result<(), RuleError> {
        self.place_building(site, BuildingKind::City, player)
    }

    fn place_building(
        &mut self,
        site: NodeId,
        kind: BuildingKind,
        player: PlayerId,
    ) -> Result<(), RuleError> {
        let current = self
            .site(site)
            .ok_or(RuleError::UnknownSite(site))?
            .building()
            .copied();

        match current {
            Some(existing) if existing.owner != player => {
                return Err(RuleError::IntersectionOccupied);
            }
            Some(existing)
                if existing.kind == BuildingKind::City && kind == BuildingKind::Settlement =>
            {
                // A city never downgrades.
                return Err(RuleError::IntersectionOccupied);
            }
            Some(_) => {}
            None => {
                self.check_spacing(site)?;
                self.check_adjacent_road(site, player)?;
            }
        }

        let building = Building {
            kind,
            owner: player,
            color: PlayerColor::for_player(player),
        };
        self.site_mut(site)
            .expect("site existence checked above")
            .set_building(building);
        Ok(())
    }

    /// Spacing rule: no building on any of the up-to-3 neighbouring sites.
    fn check_spacing(&self, site: NodeId) -> Result<(), RuleError> {
        for neighbour in self.neighbours_of(site) {
            if self
                .site(neighbour)
                .is_some_and(|s| s.building().is_some())
            {
                return Err(RuleError::SpacingRuleViolation);
            }
        }
        Ok(())
    }

    /// Adjacency rule: at least one of the connected roads belongs to the
    /// builder.
    fn check_adjacent_road(&self, site: NodeId, player: PlayerId) -> Result<(), RuleError> {
        let connected = self
            .site(site)
            .map(|s| s.roads().to_vec())
            .unwrap_or_default();
        let owns_one = connected
            .iter()
            .any(|&r| self.road(r).is_some_and(|road| road.owner() == Some(player)));
        if owns_one {
            Ok(())
        } else {
            Err(RuleError::NoAdjacentRoad)
        }
    }

    // ==================== Derived State ====================

    /// Victory points from the player's buildings on this board:
    /// 1 per settlement, 2 per city.
    pub fn building_victory_points(&self, player: PlayerId) -> u32 {
        self.sites()
            .iter()
            .filter_map(|s| s.building())
            .filter(|b| b.owner == player)
            .map(|b| b.kind.victory_points())
            .sum()
    }
}
