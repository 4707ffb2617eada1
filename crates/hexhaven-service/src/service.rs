//! The game service: concurrent registries and per-lobby entry points.
//!
//! `GameService` is what the surrounding transport layer holds on to. The
//! lobby registry and the trade-request registry are concurrent maps that
//! take inserts, lookups and removals across lobbies without a global lock;
//! all work on one lobby's board and hands runs under that lobby's mutex,
//! because the rule checks evaluate and then write non-atomically.
//!
//! Peer-trade requests deliberately do not lock resources. Acceptance
//! re-validates both sides under the lobby lock and fails with
//! `InsufficientResources` when holdings changed in between; the request
//! then stays registered.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use hexhaven_core::{BoardSnapshot, NodeId, ResourceHand, RoadId, RuleError};

use crate::lobby::{DiceRoll, Lobby};

/// Board scale handed to the tile-list builder for every lobby.
const HEX_RADIUS: f64 = 50.0;

/// Errors returned by the service entry points.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("lobby not found")]
    LobbyNotFound,

    #[error("player not in lobby")]
    PlayerNotInLobby,

    #[error("board has not been generated")]
    BoardNotGenerated,

    #[error("board already generated for this lobby")]
    BoardAlreadyGenerated,

    #[error("trade request not found")]
    TradeNotFound,

    #[error("no settlement of yours to upgrade there")]
    NoSettlementToUpgrade,
}

/// A pending peer-to-peer trade, scoped to one lobby.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub id: Uuid,
    pub lobby: Uuid,
    pub source: Uuid,
    pub target: Uuid,
    /// What the source gives up.
    pub offered: ResourceHand,
    /// What the source wants back.
    pub desired: ResourceHand,
}

/// Shared state behind all entry points.
pub struct GameService {
    /// All lobbies, each behind its own exclusive section.
    lobbies: DashMap<Uuid, Arc<Mutex<Lobby>>>,
    /// Pending peer trades across all lobbies.
    trades: DashMap<Uuid, TradeRequest>,
}

impl GameService {
    pub fn new() -> Self {
        Self {
            lobbies: DashMap::new(),
            trades: DashMap::new(),
        }
    }

    /// Run a closure under one lobby's lock.
    fn with_lobby<T>(
        &self,
        lobby: Uuid,
        f: impl FnOnce(&mut Lobby) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let shared = self
            .lobbies
            .get(&lobby)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(ServiceError::LobbyNotFound)?;
        let mut guard = shared.lock().expect("lobby mutex poisoned");
        f(&mut guard)
    }

    // ==================== Lobby Lifecycle ====================

    pub fn create_lobby(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.lobbies
            .insert(id, Arc::new(Mutex::new(Lobby::new(id, name.to_string()))));
        info!(lobby = %id, name, "lobby created");
        id
    }

    /// Drop a lobby and its pending trades.
    pub fn remove_lobby(&self, lobby: Uuid) -> bool {
        let removed = self.lobbies.remove(&lobby).is_some();
        if removed {
            self.trades.retain(|_, t| t.lobby != lobby);
            info!(lobby = %lobby, "lobby removed");
        }
        removed
    }

    pub fn lobby_count(&self) -> usize {
        self.lobbies.len()
    }

    pub fn join_lobby(&self, lobby: Uuid, name: &str) -> Result<Uuid, ServiceError> {
        let player = Uuid::new_v4();
        self.with_lobby(lobby, |l| {
            l.add_player(player, name.to_string());
            Ok(())
        })?;
        info!(lobby = %lobby, player = %player, name, "player joined");
        Ok(player)
    }

    // ==================== Board ====================

    pub fn generate_board(
        &self,
        lobby: Uuid,
        ring_count: usize,
    ) -> Result<BoardSnapshot, ServiceError> {
        let mut rng = rand::thread_rng();
        self.generate_board_with_rng(lobby, ring_count, &mut rng)
    }

    pub fn generate_board_with_rng<R: Rng>(
        &self,
        lobby: Uuid,
        ring_count: usize,
        rng: &mut R,
    ) -> Result<BoardSnapshot, ServiceError> {
        let snapshot =
            self.with_lobby(lobby, |l| l.generate_board(ring_count, HEX_RADIUS, false, rng))?;
        info!(lobby = %lobby, ring_count, "board generated");
        Ok(snapshot)
    }

    pub fn board_snapshot(&self, lobby: Uuid) -> Result<BoardSnapshot, ServiceError> {
        debug!(lobby = %lobby, "snapshot requested");
        self.with_lobby(lobby, |l| l.snapshot())
    }

    // ==================== Building ====================

    pub fn place_road(&self, lobby: Uuid, player: Uuid, road: RoadId) -> Result<(), ServiceError> {
        self.with_lobby(lobby, |l| l.place_road(player, road))?;
        info!(lobby = %lobby, player = %player, road, "road placed");
        Ok(())
    }

    pub fn place_settlement(
        &self,
        lobby: Uuid,
        player: Uuid,
        site: NodeId,
    ) -> Result<(), ServiceError> {
        self.with_lobby(lobby, |l| l.place_settlement(player, site))?;
        info!(lobby = %lobby, player = %player, site, "settlement placed");
        Ok(())
    }

    pub fn upgrade_settlement(
        &self,
        lobby: Uuid,
        player: Uuid,
        site: NodeId,
    ) -> Result<(), ServiceError> {
        self.with_lobby(lobby, |l| l.upgrade_settlement(player, site))?;
        info!(lobby = %lobby, player = %player, site, "settlement upgraded to city");
        Ok(())
    }

    // ==================== Dice ====================

    /// Roll the dice and distribute production. The fan-out completes under
    /// the lobby lock before this returns.
    pub fn roll_dice(&self, lobby: Uuid, player: Uuid) -> Result<DiceRoll, ServiceError> {
        let mut rng = rand::thread_rng();
        let roll = self.with_lobby(lobby, |l| l.roll_dice(player, &mut rng))?;
        info!(
            lobby = %lobby,
            player = %player,
            total = roll.total,
            payouts = roll.payouts.len(),
            "dice rolled"
        );
        Ok(roll)
    }

    // ==================== Trading ====================

    pub fn bank_trade(
        &self,
        lobby: Uuid,
        player: Uuid,
        offered: &ResourceHand,
        desired: &ResourceHand,
    ) -> Result<(), ServiceError> {
        self.with_lobby(lobby, |l| l.bank_trade(player, offered, desired))?;
        info!(lobby = %lobby, player = %player, "bank trade executed");
        Ok(())
    }

    /// Store a peer trade after checking both sides can currently cover it.
    pub fn create_peer_trade(
        &self,
        lobby: Uuid,
        source: Uuid,
        target: Uuid,
        offered: ResourceHand,
        desired: ResourceHand,
    ) -> Result<Uuid, ServiceError> {
        self.with_lobby(lobby, |l| {
            if !l.holds(source, &offered)? || !l.holds(target, &desired)? {
                return Err(RuleError::InsufficientResources.into());
            }
            Ok(())
        })?;

        let id = Uuid::new_v4();
        self.trades.insert(
            id,
            TradeRequest {
                id,
                lobby,
                source,
                target,
                offered,
                desired,
            },
        );
        info!(lobby = %lobby, trade = %id, source = %source, target = %target, "peer trade created");
        Ok(id)
    }

    /// Accept a pending trade. Only the target may accept; both sides are
    /// re-validated under the lobby lock since holdings may have changed
    /// since creation. On failure the request stays registered.
    pub fn accept_peer_trade(&self, trade: Uuid, accepting: Uuid) -> Result<(), ServiceError> {
        let (_, request) = self
            .trades
            .remove(&trade)
            .ok_or(ServiceError::TradeNotFound)?;

        if accepting != request.target {
            self.trades.insert(trade, request);
            return Err(RuleError::InvalidTurn.into());
        }

        let outcome = self.with_lobby(request.lobby, |l| {
            l.execute_swap(
                request.source,
                request.target,
                &request.offered,
                &request.desired,
            )
        });

        match outcome {
            Ok(()) => {
                info!(trade = %trade, "peer trade accepted");
                Ok(())
            }
            Err(err) => {
                warn!(trade = %trade, %err, "peer trade acceptance failed");
                self.trades.insert(trade, request);
                Err(err)
            }
        }
    }

    /// Reject (or withdraw) a pending trade; either party may do so.
    pub fn reject_peer_trade(&self, trade: Uuid, rejecting: Uuid) -> Result<(), ServiceError> {
        let request = self
            .trades
            .get(&trade)
            .map(|r| r.value().clone())
            .ok_or(ServiceError::TradeNotFound)?;

        if rejecting != request.source && rejecting != request.target {
            return Err(RuleError::InvalidTurn.into());
        }

        self.trades.remove(&trade);
        info!(trade = %trade, "peer trade rejected");
        Ok(())
    }

    pub fn pending_trades(&self, lobby: Uuid) -> Vec<TradeRequest> {
        self.trades
            .iter()
            .filter(|t| t.lobby == lobby)
            .map(|t| t.value().clone())
            .collect()
    }

    // ==================== Derived State ====================

    pub fn longest_road(&self, lobby: Uuid, player: Uuid) -> Result<u32, ServiceError> {
        debug!(lobby = %lobby, player = %player, "longest road requested");
        self.with_lobby(lobby, |l| l.longest_road(player))
    }

    pub fn victory_points(&self, lobby: Uuid, player: Uuid) -> Result<u32, ServiceError> {
        debug!(lobby = %lobby, player = %player, "victory points requested");
        self.with_lobby(lobby, |l| l.victory_points(player))
    }

    pub fn end_turn(&self, lobby: Uuid, player: Uuid) -> Result<Uuid, ServiceError> {
        let next = self.with_lobby(lobby, |l| l.end_turn(player))?;
        info!(lobby = %lobby, player = %player, next = %next, "turn ended");
        Ok(next)
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
