//! Resource types and resource bookkeeping.
//!
//! This module contains:
//! - The five producing resource types
//! - `ResourceHand` for per-player resource counts
//! - Building costs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resource types produced by the board's tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Clay,
    Sheep,
    Wheat,
    Ore,
}

impl Resource {
    /// All resource types, in the fixed cycle order used by tile assignment.
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Clay,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Ore,
    ];
}

/// A hand of resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub clay: u32,
    pub sheep: u32,
    pub wheat: u32,
    pub ore: u32,
}

impl ResourceHand {
    /// Create an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts.
    pub const fn with_amounts(wood: u32, clay: u32, sheep: u32, wheat: u32, ore: u32) -> Self {
        Self {
            wood,
            clay,
            sheep,
            wheat,
            ore,
        }
    }

    /// Create a hand holding a single resource type.
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut hand = Self::new();
        hand.add(resource, amount);
        hand
    }

    /// Total number of resource units.
    pub fn total(&self) -> u32 {
        self.wood + self.clay + self.sheep + self.wheat + self.ore
    }

    /// Check if the hand is empty.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get the count of a specific resource.
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Clay => self.clay,
            Resource::Sheep => self.sheep,
            Resource::Wheat => self.wheat,
            Resource::Ore => self.ore,
        }
    }

    /// Add resources to the hand.
    pub fn add(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Wood => self.wood += amount,
            Resource::Clay => self.clay += amount,
            Resource::Sheep => self.sheep += amount,
            Resource::Wheat => self.wheat += amount,
            Resource::Ore => self.ore += amount,
        }
    }

    /// Add another hand to this one.
    pub fn add_hand(&mut self, other: &ResourceHand) {
        self.wood += other.wood;
        self.clay += other.clay;
        self.sheep += other.sheep;
        self.wheat += other.wheat;
        self.ore += other.ore;
    }

    /// Check whether this hand covers a cost.
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.wood >= cost.wood
            && self.clay >= cost.clay
            && self.sheep >= cost.sheep
            && self.wheat >= cost.wheat
            && self.ore >= cost.ore
    }

    /// Subtract a cost (panics if insufficient).
    pub fn subtract(&mut self, cost: &ResourceHand) {
        assert!(self.can_afford(cost), "cannot afford this cost");
        self.wood -= cost.wood;
        self.clay -= cost.clay;
        self.sheep -= cost.sheep;
        self.wheat -= cost.wheat;
        self.ore -= cost.ore;
    }

    /// Try to subtract, returning false if insufficient.
    pub fn try_subtract(&mut self, cost: &ResourceHand) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.subtract(cost);
        true
    }

    /// Resource types present in this hand.
    pub fn kinds(&self) -> Vec<Resource> {
        Resource::ALL
            .into_iter()
            .filter(|r| self.get(*r) > 0)
            .collect()
    }

    /// Convert to a map of the non-zero counts.
    pub fn to_map(&self) -> HashMap<Resource, u32> {
        let mut map = HashMap::new();
        for resource in Resource::ALL {
            let count = self.get(resource);
            if count > 0 {
                map.insert(resource, count);
            }
        }
        map
    }

    /// Build a hand from a resource-type → quantity map.
    pub fn from_map(map: &HashMap<Resource, u32>) -> Self {
        let mut hand = Self::new();
        for (resource, amount) in map {
            hand.add(*resource, *amount);
        }
        hand
    }
}

/// Building costs.
pub mod costs {
    use super::ResourceHand;

    /// Cost to build a road: 1 wood, 1 clay.
    pub fn road() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 0, 0)
    }

    /// Cost to build a settlement: 1 wood, 1 clay, 1 sheep, 1 wheat.
    pub fn settlement() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 1, 1, 0)
    }

    /// Cost to upgrade to a city: 2 wheat, 3 ore.
    pub fn city() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 0, 2, 3)
    }
}
