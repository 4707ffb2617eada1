//! Plane geometry for the hexagonal board.
//!
//! This module provides the foundational pieces the board builders lean on:
//! - `Point`: Cartesian coordinates with the vector arithmetic the
//!   triangulation passes need (`C = A + B - P` reflections, centroids)
//! - `unit_offsets`: the six center-to-center translations between adjacent
//!   tiles, derived from 60°-multiple polar angles
//! - `RingWalker`: the corner/side step rhythm of one node layer
//!
//! Keeping the walk rhythm here, away from the graph assembly itself, is what
//! makes the rhythm testable on its own: the walker only reports *where* the
//! walk is (which ring tile, corner or side, spoke step or not), never what
//! to build there.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point (or vector) in board space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Centroid of a non-empty set of points.
    pub fn centroid(points: &[Point]) -> Point {
        assert!(!points.is_empty(), "centroid of no points");
        let sum = points
            .iter()
            .fold(Point::ORIGIN, |acc, p| Point::new(acc.x + p.x, acc.y + p.y));
        let n = points.len() as f64;
        Point::new(sum.x / n, sum.y / n)
    }

    /// Reflect `across` through the midpoint of `self` and `other`.
    ///
    /// This is the triangulation step used for boundary nodes: given two
    /// known points A and B and a known opposite point P, the unknown corner
    /// is `A + B - P`.
    pub fn reflect(self, other: Point, across: Point) -> Point {
        self + other - across
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (self - other).length()
    }

    fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle of the vector from `self` to `other`, in radians.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The six translations from a tile center to its neighbors' centers,
/// counter-clockwise starting east.
///
/// Adjacent hex centers sit `√3 · hex_radius` apart at 60°-multiple polar
/// angles. With `flip_y` the y component is negated, for targets whose
/// vertical axis grows downward.
pub fn unit_offsets(hex_radius: f64, flip_y: bool) -> [Point; 6] {
    let dist = 3.0_f64.sqrt() * hex_radius;
    let mut offsets = [Point::ORIGIN; 6];
    for (i, offset) in offsets.iter_mut().enumerate() {
        let angle = (i as f64) * 60.0_f64.to_radians();
        let y = dist * angle.sin();
        *offset = Point::new(dist * angle.cos(), if flip_y { -y } else { y });
    }
    offsets
}

/// One step of a layer walk: a single new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    /// Offset of the ring tile this node belongs to, 0-based within the ring.
    pub tile_offset: usize,
    /// Whether that tile sits on one of the six ring corners.
    pub corner_tile: bool,
    /// Whether this is the tile's last new node: the boundary corner it
    /// shares with the next tile, where the spoke road drops to the inner
    /// layer.
    pub spoke: bool,
}

/// Iterator over the steps of the node layer wrapped around tile ring `t`.
///
/// Corner tiles (ring offsets divisible by `t`) expose three new nodes, side
/// tiles two, so one full walk yields `6·(2t+1)` steps with exactly `6t`
/// spoke steps: the corner/side rhythm that gives the layer its hexagonal
/// shape.
#[derive(Debug)]
pub struct RingWalker {
    ring: usize,
    tile_offset: usize,
    step_in_tile: usize,
}

impl RingWalker {
    pub fn new(ring: usize) -> Self {
        assert!(ring >= 1, "ring walker needs a ring of tiles");
        Self {
            ring,
            tile_offset: 0,
            step_in_tile: 0,
        }
    }

    fn nodes_in_tile(&self, tile_offset: usize) -> usize {
        if tile_offset % self.ring == 0 {
            3
        } else {
            2
        }
    }
}

impl Iterator for RingWalker {
    type Item = WalkStep;

    fn next(&mut self) -> Option<WalkStep> {
        if self.tile_offset >= 6 * self.ring {
            return None;
        }

        let nodes = self.nodes_in_tile(self.tile_offset);
        let step = WalkStep {
            tile_offset: self.tile_offset,
            corner_tile: self.tile_offset % self.ring == 0,
            spoke: self.step_in_tile == nodes - 1,
        };

        self.step_in_tile += 1;
        if self.step_in_tile == nodes {
            self.step_in_tile = 0;
            self.tile_offset += 1;
        }

        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
    }

    #[test]
    fn test_reflection() {
        // Reflecting the origin through the midpoint of (2,0) and (0,2)
        // lands on (2,2).
        let c = Point::new(2.0, 0.0).reflect(Point::new(0.0, 2.0), Point::ORIGIN);
        assert_eq!(c, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_centroid() {
        let c = Point::centroid(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
        ]);
        assert_eq!(c, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_unit_offsets_spacing() {
        let offsets = unit_offsets(10.0, false);
        for offset in offsets {
            let dist = Point::ORIGIN.distance_to(offset);
            assert!((dist - 3.0_f64.sqrt() * 10.0).abs() < 1e-9);
        }
        // First offset points due east.
        assert!((offsets[0].y).abs() < 1e-9);
        assert!(offsets[0].x > 0.0);
    }

    #[test]
    fn test_unit_offsets_flip_y() {
        let plain = unit_offsets(1.0, false);
        let flipped = unit_offsets(1.0, true);
        for (a, b) in plain.iter().zip(flipped.iter()) {
            assert!((a.x - b.x).abs() < 1e-12);
            assert!((a.y + b.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_walker_step_counts() {
        for ring in 1..6 {
            let steps: Vec<WalkStep> = RingWalker::new(ring).collect();
            assert_eq!(steps.len(), 6 * (2 * ring + 1), "ring {}", ring);

            let spokes = steps.iter().filter(|s| s.spoke).count();
            assert_eq!(spokes, 6 * ring, "ring {}", ring);

            let corner_steps = steps.iter().filter(|s| s.corner_tile).count();
            assert_eq!(corner_steps, 18, "ring {}", ring);
        }
    }

    #[test]
    fn test_walker_innermost_ring_is_all_corners() {
        // Ring 1 has six tiles, all of them corners, three nodes each.
        let steps: Vec<WalkStep> = RingWalker::new(1).collect();
        assert_eq!(steps.len(), 18);
        assert!(steps.iter().all(|s| s.corner_tile));
    }

    #[test]
    fn test_walker_spoke_ends_every_tile() {
        for ring in 1..5 {
            let steps: Vec<WalkStep> = RingWalker::new(ring).collect();
            // The step before a tile change is always the spoke step.
            for pair in steps.windows(2) {
                if pair[0].tile_offset != pair[1].tile_offset {
                    assert!(pair[0].spoke);
                    assert!(!pair[1].spoke);
                }
            }
            assert!(steps.last().unwrap().spoke);
        }
    }
}
