//! Tiles and the tile-list builder.
//!
//! The tile list is the first half of board generation: an ordered, typed,
//! numbered and spatially placed set of tiles for a board of a given ring
//! count. The graph builder consumes the list ring-major (index 0 is the
//! center, ring t occupies indices `3t(t-1)+1 ..= 3t(t+1)`), so the order
//! produced here is part of the contract, not a presentation detail.
//!
//! Id, production value and coordinates are write-once: they are set exactly
//! once during generation and later writes are ignored. Modelling them as
//! `Option` (rather than a zero sentinel) keeps a legitimately computed
//! origin coordinate representable.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::geometry::{unit_offsets, Point};
use crate::resources::Resource;

/// Dice values a producing tile may carry (2-12, skipping 7).
const PIP_VALUES: [u8; 10] = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12];

/// Type of a board tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Produces a resource when its value is rolled.
    Resource(Resource),
    /// Desert - never numbered, never produces.
    Desert,
}

impl TileKind {
    /// The resource this kind produces, if any.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            TileKind::Resource(r) => Some(*r),
            TileKind::Desert => None,
        }
    }
}

/// A single hex tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    kind: TileKind,
    id: Option<u32>,
    value: Option<u8>,
    coords: Option<Point>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            id: None,
            value: None,
            coords: None,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Sequential id assigned after the shuffle, if set.
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// Production value (2-12 without 7), never set for Desert.
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn coords(&self) -> Option<Point> {
        self.coords
    }

    /// Set the id if it has not been set yet; later writes are ignored.
    pub fn set_id_if_unset(&mut self, id: u32) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Set the production value if unset. Desert tiles never take a value.
    pub fn set_value_if_unset(&mut self, value: u8) {
        if self.kind == TileKind::Desert {
            return;
        }
        if self.value.is_none() {
            self.value = Some(value);
        }
    }

    /// Set the coordinates if unset; later writes are ignored.
    pub fn set_coords_if_unset(&mut self, coords: Point) {
        if self.coords.is_none() {
            self.coords = Some(coords);
        }
    }

    /// Whether this tile produces on the given dice total.
    pub fn produces_on(&self, total: u8) -> bool {
        self.value == Some(total) && self.kind.resource().is_some()
    }
}

/// Builds the ordered, typed, numbered and placed tile list for one board.
#[derive(Debug, Clone)]
pub struct TileListBuilder {
    ring_count: usize,
    hex_radius: f64,
    flip_y: bool,
}

impl TileListBuilder {
    /// Configure a builder; ring count and hex radius must be positive.
    pub fn new(ring_count: usize, hex_radius: f64, flip_y: bool) -> Result<Self, RuleError> {
        if ring_count == 0 {
            return Err(RuleError::Configuration(
                "ring count must be positive".into(),
            ));
        }
        if hex_radius <= 0.0 {
            return Err(RuleError::Configuration(
                "hex radius must be positive".into(),
            ));
        }
        Ok(Self {
            ring_count,
            hex_radius,
            flip_y,
        })
    }

    /// Number of tiles on a board with the given ring count.
    pub fn tile_count(ring_count: usize) -> usize {
        3 * ring_count * (ring_count - 1) + 1
    }

    /// Build the tile list with a fresh RNG.
    pub fn build(&self) -> Vec<Tile> {
        let mut rng = rand::thread_rng();
        self.build_with_rng(&mut rng)
    }

    /// Build the tile list with a provided RNG, for deterministic boards.
    pub fn build_with_rng<R: Rng>(&self, rng: &mut R) -> Vec<Tile> {
        let mut tiles = self.typed_tiles();

        // Values come out of the shuffled bag front to back; the overflow
        // reserve sits at the back so every value is used its base count of
        // times before any value repeats an extra time.
        let mut values = Self::value_bag(tiles.len(), rng).into_iter();
        for tile in tiles.iter_mut().filter(|t| t.kind != TileKind::Desert) {
            let value = values.next().expect("value bag exhausted");
            tile.set_value_if_unset(value);
        }

        // Shuffle the board order, then ids are sequential in final order.
        tiles.shuffle(rng);
        for (idx, tile) in tiles.iter_mut().enumerate() {
            tile.set_id_if_unset(idx as u32 + 1);
        }

        self.assign_coordinates(&mut tiles);
        tiles
    }

    /// Pre-shuffle type order: the five producing kinds cycling, one desert.
    fn typed_tiles(&self) -> Vec<Tile> {
        let count = Self::tile_count(self.ring_count);
        let mut tiles = Vec::with_capacity(count);
        for i in 0..count - 1 {
            let resource = Resource::ALL[i % Resource::ALL.len()];
            tiles.push(Tile::new(TileKind::Resource(resource)));
        }
        tiles.push(Tile::new(TileKind::Desert));
        tiles
    }

    /// Bag of pip values for `tile_count` tiles: each value repeated
    /// `(N-1)/10` times, then one overflow copy of each value appended so
    /// any remainder tiles still receive one. Both segments are shuffled in
    /// place; keeping the reserve behind the base keeps every value at its
    /// base count or one above.
    fn value_bag<R: Rng>(tile_count: usize, rng: &mut R) -> Vec<u8> {
        let repeats = (tile_count - 1) / PIP_VALUES.len();
        let mut bag = Vec::with_capacity(PIP_VALUES.len() * (repeats + 1));
        for value in PIP_VALUES {
            for _ in 0..repeats {
                bag.push(value);
            }
        }
        bag.shuffle(rng);

        let mut reserve = PIP_VALUES;
        reserve.shuffle(rng);
        bag.extend(reserve);
        bag
    }

    /// Place tiles ring-major: center at the origin, each ring walked
    /// counter-clockwise from its east anchor by unit-offset translation.
    fn assign_coordinates(&self, tiles: &mut [Tile]) {
        let offsets = unit_offsets(self.hex_radius, self.flip_y);
        tiles[0].set_coords_if_unset(Point::ORIGIN);

        let mut anchor = Point::ORIGIN;
        let mut index = 1;
        for ring in 1..self.ring_count {
            // Each ring's anchor is one step east of the inner ring's.
            anchor = anchor + offsets[0];
            let mut pos = anchor;
            // Walking the sides in this order keeps the ring order aligned
            // with the node-layer walk: offset 0 east, counter-clockwise.
            for side in [2usize, 3, 4, 5, 0, 1] {
                for _ in 0..ring {
                    tiles[index].set_coords_if_unset(pos);
                    pos = pos + offsets[side];
                    index += 1;
                }
            }
        }
        debug_assert_eq!(index, tiles.len());
    }
}
