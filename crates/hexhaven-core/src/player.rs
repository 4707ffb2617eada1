//! Player state: identity, color, resources and piece pools.

use serde::{Deserialize, Serialize};

use crate::resources::{costs, ResourceHand};

/// Player identifier within one lobby (0-3 for a 4-player game).
pub type PlayerId = u8;

/// Player color for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Orange,
    White,
}

impl PlayerColor {
    /// Color for a player index.
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Orange,
            _ => PlayerColor::White,
        }
    }
}

/// A single player's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player id within the lobby.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Player color.
    pub color: PlayerColor,
    /// Current resources.
    pub resources: ResourceHand,
    /// Roads remaining to build.
    pub roads_remaining: u32,
    /// Settlements remaining to build.
    pub settlements_remaining: u32,
    /// Cities remaining to build.
    pub cities_remaining: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            color: PlayerColor::for_player(id),
            resources: ResourceHand::new(),
            roads_remaining: 15,
            settlements_remaining: 5,
            cities_remaining: 4,
        }
    }

    /// Can this player afford a road?
    pub fn can_afford_road(&self) -> bool {
        self.resources.can_afford(&costs::road())
    }

    /// Can this player afford a settlement?
    pub fn can_afford_settlement(&self) -> bool {
        self.resources.can_afford(&costs::settlement())
    }

    /// Can this player afford a city upgrade?
    pub fn can_afford_city(&self) -> bool {
        self.resources.can_afford(&costs::city())
    }

    /// Pay for a road and consume a piece.
    pub fn buy_road(&mut self) {
        self.resources.subtract(&costs::road());
        self.roads_remaining -= 1;
    }

    /// Pay for a settlement and consume a piece.
    pub fn buy_settlement(&mut self) {
        self.resources.subtract(&costs::settlement());
        self.settlements_remaining -= 1;
    }

    /// Pay for a city; the settlement piece returns to the pool.
    pub fn buy_city(&mut self) {
        self.resources.subtract(&costs::city());
        self.cities_remaining -= 1;
        self.settlements_remaining += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_cycle() {
        assert_eq!(PlayerColor::for_player(0), PlayerColor::Red);
        assert_eq!(PlayerColor::for_player(3), PlayerColor::White);
        assert_eq!(PlayerColor::for_player(4), PlayerColor::Red);
    }

    #[test]
    fn test_buy_road() {
        let mut player = Player::new(0, "Test".to_string());
        player.resources = ResourceHand::with_amounts(5, 5, 5, 5, 5);

        assert!(player.can_afford_road());
        player.buy_road();
        assert_eq!(player.roads_remaining, 14);
        assert_eq!(player.resources.wood, 4);
        assert_eq!(player.resources.clay, 4);
    }

    #[test]
    fn test_buy_city_returns_settlement_piece() {
        let mut player = Player::new(1, "Test".to_string());
        player.resources = ResourceHand::with_amounts(5, 5, 5, 5, 5);
        player.settlements_remaining = 3;

        player.buy_city();
        assert_eq!(player.cities_remaining, 3);
        assert_eq!(player.settlements_remaining, 4);
    }
}
