//! Per-lobby game state.
//!
//! A lobby owns one board for its whole lifetime, the players that joined
//! it (external uuids mapped to the core's dense player ids) and the turn
//! pointer. Every method validates before it mutates: a returned error
//! means board and hands are untouched. Building actions charge the cost
//! table and piece pools only after the board mutation succeeded.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hexhaven_core::{
    longest_route, BoardGraph, BoardSnapshot, BuildingKind, NodeId, Payout, Player, PlayerId,
    ResourceHand, RoadId, RuleError,
};

use crate::service::ServiceError;

/// Longest-road length required before the bonus applies.
const MIN_LONGEST_ROAD: u32 = 5;

/// Result of one dice roll, payouts already applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
    pub total: u8,
    pub payouts: Vec<Payout>,
}

/// One lobby: players, board and turn order.
pub struct Lobby {
    pub id: Uuid,
    pub name: String,
    players: Vec<Player>,
    ids: HashMap<Uuid, PlayerId>,
    /// Join order doubles as turn order.
    order: Vec<Uuid>,
    active: usize,
    board: Option<BoardGraph>,
    last_roll: Option<(u8, u8)>,
}

impl Lobby {
    pub fn new(id: Uuid, name: String) -> Self {
        Self {
            id,
            name,
            players: Vec::new(),
            ids: HashMap::new(),
            order: Vec::new(),
            active: 0,
            board: None,
            last_roll: None,
        }
    }

    // ==================== Players & Turns ====================

    /// Register a player; join order is turn order.
    pub fn add_player(&mut self, external: Uuid, name: String) {
        let id = self.players.len() as PlayerId;
        self.players.push(Player::new(id, name));
        self.ids.insert(external, id);
        self.order.push(external);
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, external: Uuid) -> Result<&Player, ServiceError> {
        let id = self.resolve(external)?;
        Ok(&self.players[id as usize])
    }

    fn resolve(&self, external: Uuid) -> Result<PlayerId, ServiceError> {
        self.ids
            .get(&external)
            .copied()
            .ok_or(ServiceError::PlayerNotInLobby)
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> Option<Uuid> {
        self.order.get(self.active).copied()
    }

    /// Resolve the player and fail with `InvalidTurn` unless they are
    /// active.
    fn require_active(&self, external: Uuid) -> Result<PlayerId, ServiceError> {
        let id = self.resolve(external)?;
        if self.active_player() != Some(external) {
            return Err(RuleError::InvalidTurn.into());
        }
        Ok(id)
    }

    /// Advance the turn pointer.
    pub fn end_turn(&mut self, external: Uuid) -> Result<Uuid, ServiceError> {
        self.require_active(external)?;
        self.active = (self.active + 1) % self.order.len();
        Ok(self.active_player().expect("turn order is non-empty"))
    }

    // ==================== Board ====================

    /// Generate the lobby's board. A lobby keeps its board for life;
    /// regenerating is rejected.
    pub fn generate_board<R: Rng>(
        &mut self,
        ring_count: usize,
        hex_radius: f64,
        flip_y: bool,
        rng: &mut R,
    ) -> Result<BoardSnapshot, ServiceError> {
        if self.board.is_some() {
            return Err(ServiceError::BoardAlreadyGenerated);
        }
        let board = BoardGraph::generate_with_rng(ring_count, hex_radius, flip_y, rng)?;
        let snapshot = board.snapshot();
        self.board = Some(board);
        Ok(snapshot)
    }

    pub fn board(&self) -> Result<&BoardGraph, ServiceError> {
        self.board.as_ref().ok_or(ServiceError::BoardNotGenerated)
    }

    fn board_mut(&mut self) -> Result<&mut BoardGraph, ServiceError> {
        self.board.as_mut().ok_or(ServiceError::BoardNotGenerated)
    }

    pub fn snapshot(&self) -> Result<BoardSnapshot, ServiceError> {
        Ok(self.board()?.snapshot())
    }

    // ==================== Building ====================

    pub fn place_road(&mut self, external: Uuid, road: RoadId) -> Result<(), ServiceError> {
        let id = self.require_active(external)?;
        let player = &self.players[id as usize];
        if player.roads_remaining == 0 {
            return Err(RuleError::BuildableLimitReached.into());
        }
        if !player.can_afford_road() {
            return Err(RuleError::InsufficientResources.into());
        }

        self.board_mut()?.place_road(id, road)?;
        self.players[id as usize].buy_road();
        Ok(())
    }

    pub fn place_settlement(&mut self, external: Uuid, site: NodeId) -> Result<(), ServiceError> {
        let id = self.require_active(external)?;
        let player = &self.players[id as usize];
        if player.settlements_remaining == 0 {
            return Err(RuleError::BuildableLimitReached.into());
        }
        if !player.can_afford_settlement() {
            return Err(RuleError::InsufficientResources.into());
        }

        self.board_mut()?.place_settlement(id, site)?;
        self.players[id as usize].buy_settlement();
        Ok(())
    }

    pub fn upgrade_settlement(&mut self, external: Uuid, site: NodeId) -> Result<(), ServiceError> {
        let id = self.require_active(external)?;

        // The engine only re-checks ownership; gating the upgrade on an
        // existing settlement is this layer's job.
        let standing = self
            .board()?
            .site(site)
            .ok_or(RuleError::UnknownSite(site))?
            .building()
            .copied();
        match standing {
            Some(b) if b.owner == id && b.kind == BuildingKind::Settlement => {}
            _ => return Err(ServiceError::NoSettlementToUpgrade),
        }

        let player = &self.players[id as usize];
        if player.cities_remaining == 0 {
            return Err(RuleError::BuildableLimitReached.into());
        }
        if !player.can_afford_city() {
            return Err(RuleError::InsufficientResources.into());
        }

        self.board_mut()?.upgrade_to_city(id, site)?;
        self.players[id as usize].buy_city();
        Ok(())
    }

    // ==================== Dice & Production ====================

    /// Roll two dice and fan the production out to every eligible building.
    /// The payouts are applied before this returns, so a following
    /// affordability check already sees them.
    pub fn roll_dice<R: Rng>(&mut self, external: Uuid, rng: &mut R) -> Result<DiceRoll, ServiceError> {
        self.require_active(external)?;

        let die1 = rng.gen_range(1..=6);
        let die2 = rng.gen_range(1..=6);
        let total = die1 + die2;
        self.last_roll = Some((die1, die2));

        let payouts = self.board()?.distribute_roll(total);
        for payout in &payouts {
            self.players[payout.player as usize]
                .resources
                .add(payout.resource, payout.amount);
        }

        Ok(DiceRoll {
            die1,
            die2,
            total,
            payouts,
        })
    }

    pub fn last_roll(&self) -> Option<(u8, u8)> {
        self.last_roll
    }

    // ==================== Trading ====================

    /// Bank trade: holdings first, then every reachable port, then the 4:1
    /// fallback; the swap itself is atomic.
    pub fn bank_trade(
        &mut self,
        external: Uuid,
        offered: &ResourceHand,
        desired: &ResourceHand,
    ) -> Result<(), ServiceError> {
        let id = self.require_active(external)?;

        if !self.players[id as usize].resources.can_afford(offered) {
            return Err(RuleError::InsufficientResources.into());
        }

        let board = self.board()?;
        hexhaven_core::validate_exchange(offered, desired, &board.ports_reachable_by(id))?;

        let hand = &mut self.players[id as usize].resources;
        hand.subtract(offered);
        hand.add_hand(desired);
        Ok(())
    }

    /// Whether the player currently holds at least the given hand.
    pub fn holds(&self, external: Uuid, hand: &ResourceHand) -> Result<bool, ServiceError> {
        let id = self.resolve(external)?;
        Ok(self.players[id as usize].resources.can_afford(hand))
    }

    /// Two-sided transfer for an accepted peer trade: the source loses
    /// `offered` and gains `desired`, the target mirrors it. Both sides'
    /// sufficiency must have been re-validated under this lobby's lock.
    pub fn execute_swap(
        &mut self,
        source: Uuid,
        target: Uuid,
        offered: &ResourceHand,
        desired: &ResourceHand,
    ) -> Result<(), ServiceError> {
        let source_id = self.resolve(source)?;
        let target_id = self.resolve(target)?;

        if !self.players[source_id as usize].resources.can_afford(offered)
            || !self.players[target_id as usize].resources.can_afford(desired)
        {
            return Err(RuleError::InsufficientResources.into());
        }

        {
            let hand = &mut self.players[source_id as usize].resources;
            hand.subtract(offered);
            hand.add_hand(desired);
        }
        {
            let hand = &mut self.players[target_id as usize].resources;
            hand.subtract(desired);
            hand.add_hand(offered);
        }
        Ok(())
    }

    /// Grant a hand directly, e.g. for tests and setup flows.
    pub fn grant(&mut self, external: Uuid, hand: &ResourceHand) -> Result<(), ServiceError> {
        let id = self.resolve(external)?;
        self.players[id as usize].resources.add_hand(hand);
        Ok(())
    }

    // ==================== Derived State ====================

    /// Longest road of one player, in edges.
    pub fn longest_road(&self, external: Uuid) -> Result<u32, ServiceError> {
        let id = self.resolve(external)?;
        let board = self.board()?;
        Ok(longest_route(board, &board.roads_owned_by(id)))
    }

    /// Victory points: buildings plus the longest-road bonus for the unique
    /// leader at five roads or more.
    pub fn victory_points(&self, external: Uuid) -> Result<u32, ServiceError> {
        let id = self.resolve(external)?;
        let board = self.board()?;
        let mut points = board.building_victory_points(id);

        let own = longest_route(board, &board.roads_owned_by(id));
        if own >= MIN_LONGEST_ROAD {
            let beaten = self.players.iter().all(|p| {
                p.id == id || longest_route(board, &board.roads_owned_by(p.id)) < own
            });
            if beaten {
                points += 2;
            }
        }
        Ok(points)
    }
}
