//! Serialization-ready board snapshots.
//!
//! Flat `Vec`-based structures mirroring the arena, with ids instead of
//! references, so any wire encoding can consume them directly. The actual
//! format (JSON or otherwise) is the transport layer's concern.

use serde::{Deserialize, Serialize};

use crate::graph::{BoardGraph, Building, NodeId, RoadId};
use crate::player::PlayerId;
use crate::tiles::TileKind;
use crate::trade::PortKind;

/// Complete serializable view of one board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub ring_count: usize,
    pub tiles: Vec<TileSnapshot>,
    pub nodes: Vec<NodeSnapshot>,
    pub roads: Vec<RoadSnapshot>,
    pub ports: Vec<PortSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: u32,
    pub kind: TileKind,
    pub value: Option<u8>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub building: Option<Building>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadSnapshot {
    pub id: RoadId,
    pub endpoint_a: NodeId,
    pub endpoint_b: NodeId,
    pub owner: Option<PlayerId>,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSnapshot {
    pub kind: PortKind,
    pub ratio: u32,
    pub site: NodeId,
}

impl BoardGraph {
    /// Capture the board as a flat, serialization-ready structure.
    pub fn snapshot(&self) -> BoardSnapshot {
        let tiles = self
            .tiles()
            .iter()
            .map(|tile| {
                let coords = tile.coords().expect("generation places every tile");
                TileSnapshot {
                    id: tile.id().expect("generation numbers every tile"),
                    kind: tile.kind(),
                    value: tile.value(),
                    x: coords.x,
                    y: coords.y,
                }
            })
            .collect();

        let nodes = self
            .sites()
            .iter()
            .map(|site| {
                let coords = site.coords().expect("generation resolves every site");
                NodeSnapshot {
                    id: site.id(),
                    x: coords.x,
                    y: coords.y,
                    building: site.building().copied(),
                }
            })
            .collect();

        let roads = self
            .roads()
            .iter()
            .map(|road| {
                let (endpoint_a, endpoint_b) = road.endpoints();
                let midpoint = road.midpoint().expect("generation resolves every road");
                RoadSnapshot {
                    id: road.id(),
                    endpoint_a,
                    endpoint_b,
                    owner: road.owner(),
                    x: midpoint.x,
                    y: midpoint.y,
                    angle: road.angle().expect("angle set with midpoint"),
                }
            })
            .collect();

        let ports = self
            .ports()
            .iter()
            .map(|port| PortSnapshot {
                kind: port.kind(),
                ratio: port.kind().ratio(),
                site: port.site(),
            })
            .collect();

        BoardSnapshot {
            ring_count: self.ring_count(),
            tiles,
            nodes,
            roads,
            ports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_covers_whole_board() {
        let board = BoardGraph::generate(3, 10.0, false).unwrap();
        let snapshot = board.snapshot();

        assert_eq!(snapshot.ring_count, 3);
        assert_eq!(snapshot.tiles.len(), 19);
        assert_eq!(snapshot.nodes.len(), 54);
        assert_eq!(snapshot.roads.len(), board.roads().len());
        assert_eq!(snapshot.ports.len(), 9);
    }

    #[test]
    fn test_snapshot_reflects_placements() {
        let mut board = BoardGraph::generate(2, 10.0, false).unwrap();
        let road = board.site(0).unwrap().roads()[0];
        board.place_road(1, road).unwrap();
        board.place_settlement(1, 0).unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.roads[road].owner, Some(1));
        let node = &snapshot.nodes[0];
        assert_eq!(node.building.unwrap().owner, 1);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let board = BoardGraph::generate(2, 10.0, false).unwrap();
        let json = serde_json::to_value(board.snapshot()).unwrap();
        assert!(json.get("tiles").is_some());
        assert!(json.get("nodes").is_some());
        assert!(json.get("roads").is_some());
        assert!(json.get("ports").is_some());
    }
}
