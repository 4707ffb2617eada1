//! The settlement-position graph: building sites, roads and their assembly.
//!
//! The graph is an arena: sites, roads, tiles and ports live in `Vec`s and
//! reference each other by integer id, so the road ↔ site back-references
//! stay cycle-free. A board is built once per lobby and the arena is never
//! resized afterwards; the only mutable parts are road ownership and site
//! buildings.
//!
//! Construction walks the board layer by layer (see [`GraphBuilder`]):
//! layer 1 is the hexagon of six nodes around the center tile, every further
//! layer is wrapped around the previous one following the corner/side rhythm
//! of [`RingWalker`], with spoke roads dropping to the inner layer at every
//! tile boundary. Two post-passes finish the job: tile completion for inner
//! boundary corners, and coordinate resolution (centroids inside,
//! `C = A + B - P` reflections on the rim).
//!
//! Violating an arena bound (a fourth tile on a site, a road re-binding its
//! endpoints) panics: that is a construction bug, not a player-visible rule
//! violation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::geometry::{Point, RingWalker};
use crate::player::{PlayerColor, PlayerId};
use crate::tiles::{Tile, TileListBuilder};
use crate::trade::{Port, PortKind};

/// Index of a tile in the board arena.
pub type TileId = usize;
/// Index of a building site in the board arena.
pub type NodeId = usize;
/// Index of a road in the board arena.
pub type RoadId = usize;

/// Kind of building standing on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Settlement,
    City,
}

impl BuildingKind {
    /// Resource units credited per production notification.
    pub fn yield_per_tile(&self) -> u32 {
        match self {
            BuildingKind::Settlement => 1,
            BuildingKind::City => 2,
        }
    }

    /// Victory points provided by this building.
    pub fn victory_points(&self) -> u32 {
        match self {
            BuildingKind::Settlement => 1,
            BuildingKind::City => 2,
        }
    }
}

/// A building standing on a site, owned by exactly one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub owner: PlayerId,
    pub color: PlayerColor,
}

/// A graph node: an intersection where a settlement or city may stand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSite {
    id: NodeId,
    /// 1-based node layer; the outermost layer equals the board ring count.
    layer: usize,
    coords: Option<Point>,
    tiles: Vec<TileId>,
    roads: Vec<RoadId>,
    building: Option<Building>,
}

impl BuildingSite {
    fn new(id: NodeId, layer: usize) -> Self {
        Self {
            id,
            layer,
            coords: None,
            tiles: Vec::with_capacity(3),
            roads: Vec::with_capacity(3),
            building: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn coords(&self) -> Option<Point> {
        self.coords
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn roads(&self) -> &[RoadId] {
        &self.roads
    }

    pub fn building(&self) -> Option<&Building> {
        self.building.as_ref()
    }

    /// Attach a tile. Idempotent; a fourth distinct tile is a construction
    /// bug and panics.
    pub fn attach_tile(&mut self, tile: TileId) {
        if self.tiles.contains(&tile) {
            return;
        }
        assert!(
            self.tiles.len() < 3,
            "site {} cannot take a fourth tile",
            self.id
        );
        self.tiles.push(tile);
    }

    /// Attach a road. Idempotent; a fourth distinct road is a construction
    /// bug and panics.
    pub fn attach_road(&mut self, road: RoadId) {
        if self.roads.contains(&road) {
            return;
        }
        assert!(
            self.roads.len() < 3,
            "site {} cannot take a fourth road",
            self.id
        );
        self.roads.push(road);
    }

    /// Set the coordinates if unset; later writes are ignored.
    pub fn set_coords_if_unset(&mut self, coords: Point) {
        if self.coords.is_none() {
            self.coords = Some(coords);
        }
    }

    pub(crate) fn set_building(&mut self, building: Building) {
        self.building = Some(building);
    }
}

/// A graph edge: an undirected road between two distinct sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    id: RoadId,
    endpoint_a: NodeId,
    endpoint_b: NodeId,
    owner: Option<PlayerId>,
    midpoint: Option<Point>,
    angle: Option<f64>,
}

impl Road {
    fn new(id: RoadId, endpoint_a: NodeId, endpoint_b: NodeId) -> Self {
        assert!(
            endpoint_a != endpoint_b,
            "road {} must connect two distinct sites",
            id
        );
        Self {
            id,
            endpoint_a,
            endpoint_b,
            owner: None,
            midpoint: None,
            angle: None,
        }
    }

    pub fn id(&self) -> RoadId {
        self.id
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.endpoint_a, self.endpoint_b)
    }

    /// The other endpoint, or `None` if the given site is not an endpoint.
    pub fn neighbour(&self, site: NodeId) -> Option<NodeId> {
        if site == self.endpoint_a {
            Some(self.endpoint_b)
        } else if site == self.endpoint_b {
            Some(self.endpoint_a)
        } else {
            None
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, player: PlayerId) {
        self.owner = Some(player);
    }

    pub fn midpoint(&self) -> Option<Point> {
        self.midpoint
    }

    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    /// Set midpoint and orientation if unset; later writes are ignored.
    pub fn set_geometry_if_unset(&mut self, midpoint: Point, angle: f64) {
        if self.midpoint.is_none() {
            self.midpoint = Some(midpoint);
            self.angle = Some(angle);
        }
    }
}

/// The assembled board: tiles, sites, roads and ports of one lobby.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardGraph {
    ring_count: usize,
    tiles: Vec<Tile>,
    sites: Vec<BuildingSite>,
    roads: Vec<Road>,
    ports: Vec<Port>,
    /// Node ids per layer, in creation order.
    layers: Vec<Vec<NodeId>>,
}

impl BoardGraph {
    /// Generate a complete board with a fresh RNG.
    pub fn generate(ring_count: usize, hex_radius: f64, flip_y: bool) -> Result<Self, RuleError> {
        let mut rng = rand::thread_rng();
        Self::generate_with_rng(ring_count, hex_radius, flip_y, &mut rng)
    }

    /// Generate a complete board with a provided RNG, for deterministic
    /// boards.
    pub fn generate_with_rng<R: Rng>(
        ring_count: usize,
        hex_radius: f64,
        flip_y: bool,
        rng: &mut R,
    ) -> Result<Self, RuleError> {
        let tiles = TileListBuilder::new(ring_count, hex_radius, flip_y)?.build_with_rng(rng);
        let mut board = GraphBuilder::new(tiles, ring_count)?.build();
        board.place_ports(rng);
        Ok(board)
    }

    // ==================== Query Methods ====================

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn sites(&self) -> &[BuildingSite] {
        &self.sites
    }

    pub fn site(&self, id: NodeId) -> Option<&BuildingSite> {
        self.sites.get(id)
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(id)
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Node ids of each layer, innermost first.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// Sites directly connected to the given site by one road.
    pub fn neighbours_of(&self, site: NodeId) -> Vec<NodeId> {
        self.sites[site]
            .roads()
            .iter()
            .filter_map(|&r| self.roads[r].neighbour(site))
            .collect()
    }

    /// Sites subscribed to a tile's production (the sites holding it).
    pub fn subscribers_of(&self, tile: TileId) -> impl Iterator<Item = &BuildingSite> {
        self.sites.iter().filter(move |s| s.tiles.contains(&tile))
    }

    /// Ports whose site carries a building owned by the player.
    pub fn ports_reachable_by(&self, player: PlayerId) -> Vec<&Port> {
        self.ports
            .iter()
            .filter(|p| {
                self.sites[p.site()]
                    .building()
                    .is_some_and(|b| b.owner == player)
            })
            .collect()
    }

    /// All roads currently owned by the player.
    pub fn roads_owned_by(&self, player: PlayerId) -> Vec<RoadId> {
        self.roads
            .iter()
            .filter(|r| r.owner() == Some(player))
            .map(|r| r.id())
            .collect()
    }

    pub(crate) fn site_mut(&mut self, id: NodeId) -> Option<&mut BuildingSite> {
        self.sites.get_mut(id)
    }

    pub(crate) fn road_mut(&mut self, id: RoadId) -> Option<&mut Road> {
        self.roads.get_mut(id)
    }

    // ==================== Port Placement ====================

    /// Spread the standard port set over the outermost layer: four general
    /// 3:1 ports and one specific 2:1 port per resource, kinds shuffled,
    /// sites evenly spaced.
    fn place_ports<R: Rng>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;

        let mut kinds = PortKind::standard_set();
        kinds.shuffle(rng);

        let outer = &self.layers[self.ring_count - 1];
        let spacing = outer.len() / kinds.len();
        for (i, kind) in kinds.into_iter().enumerate() {
            let site = outer[i * spacing];
            self.ports.push(Port::new(kind, site));
        }
    }
}

/// Builds the settlement-position graph from an ordered tile list.
pub struct GraphBuilder {
    tiles: Vec<Tile>,
    ring_count: usize,
}

impl GraphBuilder {
    /// Validate the inputs before any graph work begins.
    pub fn new(tiles: Vec<Tile>, ring_count: usize) -> Result<Self, RuleError> {
        if tiles.is_empty() {
            return Err(RuleError::Configuration("tile list is empty".into()));
        }
        if ring_count <= 1 {
            return Err(RuleError::Configuration(
                "graph construction needs at least two rings".into(),
            ));
        }
        let expected = TileListBuilder::tile_count(ring_count);
        if tiles.len() != expected {
            return Err(RuleError::Configuration(format!(
                "tile list length {} does not match ring count {} (expected {})",
                tiles.len(),
                ring_count,
                expected
            )));
        }
        Ok(Self { tiles, ring_count })
    }

    /// Assemble the graph. Input validation already happened in `new`.
    pub fn build(self) -> BoardGraph {
        let mut board = BoardGraph {
            ring_count: self.ring_count,
            tiles: self.tiles,
            sites: Vec::new(),
            roads: Vec::new(),
            ports: Vec::new(),
            layers: Vec::new(),
        };

        board.build_center_layer();
        for layer in 2..=board.ring_count {
            board.build_layer(layer);
        }
        board.complete_tiles();
        board.assign_site_coords();
        board.assign_road_geometry();
        board
    }
}

impl BoardGraph {
    fn new_site(&mut self, layer: usize) -> NodeId {
        let id = self.sites.len();
        self.sites.push(BuildingSite::new(id, layer));
        id
    }

    fn new_road(&mut self, a: NodeId, b: NodeId) -> RoadId {
        let id = self.roads.len();
        self.roads.push(Road::new(id, a, b));
        self.sites[a].attach_road(id);
        self.sites[b].attach_road(id);
        id
    }

    /// First tile index of tile ring `t` in the ring-major list.
    fn ring_start(ring: usize) -> usize {
        3 * ring * (ring - 1) + 1
    }

    // ==================== Layer Construction ====================

    /// Layer 1: a hexagon of six nodes around the center tile.
    fn build_center_layer(&mut self) {
        let mut layer = Vec::with_capacity(6);
        for _ in 0..6 {
            let node = self.new_site(1);
            self.sites[node].attach_tile(0);
            if let Some(&prev) = layer.last() {
                self.new_road(prev, node);
            }
            layer.push(node);
        }
        self.new_road(layer[5], layer[0]);
        self.layers.push(layer);
    }

    /// Wrap node layer `layer` (> 1) around tile ring `layer - 1`.
    ///
    /// Every step creates one node and the road to the previous node in the
    /// layer; spoke steps (the boundary corner shared with the next tile)
    /// additionally drop a road to the inner layer and copy the boundary
    /// tile pair onto both spoke endpoints, keeping both sides consistent.
    fn build_layer(&mut self, layer: usize) {
        let ring = layer - 1;
        let ring_len = 6 * ring;
        let start = Self::ring_start(ring);

        // Inner nodes still holding two roads, in creation order. There are
        // exactly as many of them as this layer has spokes, and each takes
        // exactly one: that is where the inner "3 roads everywhere"
        // invariant comes from.
        let receivers: Vec<NodeId> = self.layers[layer - 2]
            .iter()
            .copied()
            .filter(|&n| self.sites[n].roads().len() == 2)
            .collect();
        debug_assert_eq!(receivers.len(), ring_len);

        let mut new_layer: Vec<NodeId> = Vec::with_capacity(6 * (2 * layer - 1));
        let mut spoke_index = 0;
        for step in RingWalker::new(ring) {
            let tile = start + step.tile_offset;
            let node = self.new_site(layer);
            self.sites[node].attach_tile(tile);
            if let Some(&prev) = new_layer.last() {
                self.new_road(prev, node);
            }
            new_layer.push(node);

            if step.spoke {
                let next_tile = start + (step.tile_offset + 1) % ring_len;
                self.sites[node].attach_tile(next_tile);

                let target = receivers[(spoke_index + 1) % receivers.len()];
                self.new_road(node, target);
                self.sites[target].attach_tile(tile);
                self.sites[target].attach_tile(next_tile);
                spoke_index += 1;
            }
        }

        let (&first, &last) = (
            new_layer.first().expect("layer is never empty"),
            new_layer.last().expect("layer is never empty"),
        );
        self.new_road(last, first);
        self.layers.push(new_layer);
    }

    // ==================== Tile Completion ====================

    /// Complete inner sites still missing their third tile.
    ///
    /// The missing tile is, by construction, held by exactly two of the
    /// site's three neighbours: collect the neighbours' tiles, drop the ones
    /// the site already holds, and the duplicate among the remaining (at
    /// most five) candidates is the answer. The pairwise scan is O(1) per
    /// site because the candidate list is bounded.
    fn complete_tiles(&mut self) {
        for layer in 0..self.ring_count - 1 {
            for idx in 0..self.layers[layer].len() {
                let node = self.layers[layer][idx];
                if self.sites[node].tiles().len() == 3 {
                    continue;
                }

                let own: Vec<TileId> = self.sites[node].tiles().to_vec();
                let candidates: Vec<TileId> = self
                    .neighbours_of(node)
                    .into_iter()
                    .flat_map(|n| self.sites[n].tiles().to_vec())
                    .filter(|t| !own.contains(t))
                    .collect();

                let duplicate = Self::first_duplicate(&candidates)
                    .unwrap_or_else(|| panic!("site {} has no completing tile", node));
                self.sites[node].attach_tile(duplicate);
            }
        }
    }

    fn first_duplicate(candidates: &[TileId]) -> Option<TileId> {
        for (i, &a) in candidates.iter().enumerate() {
            for &b in &candidates[i + 1..] {
                if a == b {
                    return Some(a);
                }
            }
        }
        None
    }

    // ==================== Coordinate Passes ====================

    /// Resolve site coordinates: inner nodes are the centroid of their three
    /// tiles; outermost nodes are triangulated by reflecting a known point
    /// across the midpoint of two others (`C = A + B - P`), swept until
    /// every rim node is resolved.
    fn assign_site_coords(&mut self) {
        for layer in 0..self.ring_count - 1 {
            for idx in 0..self.layers[layer].len() {
                let node = self.layers[layer][idx];
                let points: Vec<Point> = self.sites[node]
                    .tiles()
                    .iter()
                    .map(|&t| self.tiles[t].coords().expect("tiles are placed first"))
                    .collect();
                let centroid = Point::centroid(&points);
                self.sites[node].set_coords_if_unset(centroid);
            }
        }

        let rim: Vec<NodeId> = self.layers[self.ring_count - 1].clone();
        loop {
            let mut progress = false;
            for &node in &rim {
                if self.sites[node].coords().is_some() {
                    continue;
                }
                if let Some(coords) = self.triangulate_rim_node(node) {
                    self.sites[node].set_coords_if_unset(coords);
                    progress = true;
                }
            }
            if !progress {
                break;
            }
        }

        for &node in &rim {
            assert!(
                self.sites[node].coords().is_some(),
                "rim site {} left without coordinates",
                node
            );
        }
    }

    /// One `C = A + B - P` step for a rim node, by what is known so far:
    /// two tiles and the inner spoke neighbour; one tile and two resolved
    /// neighbours; or one tile, one resolved neighbour and the node two hops
    /// away behind it.
    fn triangulate_rim_node(&self, node: NodeId) -> Option<Point> {
        let site = &self.sites[node];
        let tiles: Vec<Point> = site
            .tiles()
            .iter()
            .filter_map(|&t| self.tiles[t].coords())
            .collect();

        if tiles.len() == 2 {
            // Boundary corner between two tiles: reflect the spoke target.
            let inner = self.inner_neighbour(node)?;
            let p = self.sites[inner].coords()?;
            return Some(tiles[0].reflect(tiles[1], p));
        }

        let tile = *tiles.first()?;
        let resolved: Vec<(NodeId, Point)> = self
            .neighbours_of(node)
            .into_iter()
            .filter_map(|n| self.sites[n].coords().map(|c| (n, c)))
            .collect();

        match resolved.as_slice() {
            [(_, a), (_, b), ..] => Some(a.reflect(*b, tile)),
            [(neighbour, a)] => {
                let two_hop = self.inner_neighbour(*neighbour)?;
                let p = self.sites[two_hop].coords()?;
                Some(tile.reflect(*a, p))
            }
            [] => None,
        }
    }

    /// The neighbour of a rim node that lives on an inner layer, if any.
    fn inner_neighbour(&self, node: NodeId) -> Option<NodeId> {
        let layer = self.sites[node].layer();
        self.neighbours_of(node)
            .into_iter()
            .find(|&n| self.sites[n].layer() < layer)
    }

    /// Midpoint and orientation for every road whose endpoints are resolved.
    fn assign_road_geometry(&mut self) {
        for id in 0..self.roads.len() {
            let (a, b) = self.roads[id].endpoints();
            if let (Some(pa), Some(pb)) = (self.sites[a].coords(), self.sites[b].coords()) {
                self.roads[id].set_geometry_if_unset(pa.midpoint(pb), pa.angle_to(pb));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileKind;

    fn board(ring_count: usize) -> BoardGraph {
        BoardGraph::generate(ring_count, 10.0, false).unwrap()
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(GraphBuilder::new(Vec::new(), 3).is_err());

        let tiles = TileListBuilder::new(3, 10.0, false).unwrap().build();
        assert!(GraphBuilder::new(tiles.clone(), 1).is_err());
        assert!(GraphBuilder::new(tiles, 4).is_err());
    }

    #[test]
    fn test_node_count_is_six_ring_count_squared() {
        for ring_count in 2..6 {
            let board = board(ring_count);
            assert_eq!(
                board.sites().len(),
                6 * ring_count * ring_count,
                "ring count {}",
                ring_count
            );
        }
    }

    #[test]
    fn test_layer_sizes() {
        let board = board(4);
        let sizes: Vec<usize> = board.layers().iter().map(|l| l.len()).collect();
        assert_eq!(sizes, vec![6, 18, 30, 42]);
    }

    #[test]
    fn test_inner_nodes_have_three_tiles_and_roads() {
        for ring_count in 2..5 {
            let board = board(ring_count);
            for layer in &board.layers()[..ring_count - 1] {
                for &node in layer {
                    let site = board.site(node).unwrap();
                    assert_eq!(site.tiles().len(), 3, "site {} tiles", node);
                    assert_eq!(site.roads().len(), 3, "site {} roads", node);
                }
            }
        }
    }

    #[test]
    fn test_every_node_within_bounds() {
        let board = board(4);
        for site in board.sites() {
            let t = site.tiles().len();
            let r = site.roads().len();
            assert!((1..=3).contains(&t), "site {} has {} tiles", site.id(), t);
            assert!((2..=3).contains(&r), "site {} has {} roads", site.id(), r);
        }
    }

    #[test]
    fn test_roads_connect_distinct_nodes() {
        let board = board(3);
        for road in board.roads() {
            let (a, b) = road.endpoints();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_road_count() {
        // In-layer cycles plus spokes: 6k² + 3k(k-1).
        for ring_count in 2..5 {
            let board = board(ring_count);
            let expected = 6 * ring_count * ring_count + 3 * ring_count * (ring_count - 1);
            assert_eq!(board.roads().len(), expected, "ring count {}", ring_count);
        }
    }

    #[test]
    fn test_graph_is_connected() {
        let board = board(3);
        let mut seen = vec![false; board.sites().len()];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(node) = stack.pop() {
            for next in board.neighbours_of(node) {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        assert!(seen.into_iter().all(|v| v), "graph must be connected");
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut site = BuildingSite::new(0, 1);
        site.attach_tile(7);
        site.attach_tile(7);
        assert_eq!(site.tiles().len(), 1);

        site.attach_road(3);
        site.attach_road(3);
        assert_eq!(site.roads().len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_fourth_tile_panics() {
        let mut site = BuildingSite::new(0, 1);
        for tile in 0..4 {
            site.attach_tile(tile);
        }
    }

    #[test]
    fn test_road_neighbour() {
        let road = Road::new(0, 4, 9);
        assert_eq!(road.neighbour(4), Some(9));
        assert_eq!(road.neighbour(9), Some(4));
        assert_eq!(road.neighbour(5), None);
    }

    #[test]
    fn test_all_sites_have_coordinates() {
        let board = board(4);
        for site in board.sites() {
            assert!(site.coords().is_some(), "site {} unresolved", site.id());
        }
    }

    #[test]
    fn test_inner_coords_match_tile_centroids() {
        let board = board(3);
        for &node in &board.layers()[0] {
            let site = board.site(node).unwrap();
            let points: Vec<Point> = site
                .tiles()
                .iter()
                .map(|&t| board.tile(t).unwrap().coords().unwrap())
                .collect();
            let centroid = Point::centroid(&points);
            let coords = site.coords().unwrap();
            assert!(coords.distance_to(centroid) < 1e-9);
        }
    }

    #[test]
    fn test_site_coordinates_are_distinct() {
        let board = board(3);
        for (i, a) in board.sites().iter().enumerate() {
            for b in &board.sites()[i + 1..] {
                let d = a.coords().unwrap().distance_to(b.coords().unwrap());
                assert!(d > 1.0, "sites {} and {} coincide", a.id(), b.id());
            }
        }
    }

    #[test]
    fn test_rim_nodes_sit_outside_inner_nodes() {
        let board = board(3);
        let rim_min = board.layers()[2]
            .iter()
            .map(|&n| Point::ORIGIN.distance_to(board.site(n).unwrap().coords().unwrap()))
            .fold(f64::MAX, f64::min);
        let inner_max = board.layers()[1]
            .iter()
            .map(|&n| Point::ORIGIN.distance_to(board.site(n).unwrap().coords().unwrap()))
            .fold(0.0_f64, f64::max);
        assert!(rim_min > inner_max);
    }

    #[test]
    fn test_roads_have_geometry() {
        let board = board(3);
        for road in board.roads() {
            assert!(road.midpoint().is_some());
            assert!(road.angle().is_some());

            let (a, b) = road.endpoints();
            let pa = board.site(a).unwrap().coords().unwrap();
            let pb = board.site(b).unwrap().coords().unwrap();
            let mid = road.midpoint().unwrap();
            assert!(mid.distance_to(pa.midpoint(pb)) < 1e-9);
        }
    }

    #[test]
    fn test_road_lengths_are_uniform() {
        // Every road spans one hex edge, so endpoint distances all match.
        let board = board(3);
        let mut lengths: Vec<f64> = board
            .roads()
            .iter()
            .map(|r| {
                let (a, b) = r.endpoints();
                board
                    .site(a)
                    .unwrap()
                    .coords()
                    .unwrap()
                    .distance_to(board.site(b).unwrap().coords().unwrap())
            })
            .collect();
        lengths.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let spread = lengths.last().unwrap() - lengths.first().unwrap();
        assert!(spread < 1e-6, "road lengths vary by {}", spread);
    }

    #[test]
    fn test_standard_port_set_placed() {
        let board = board(3);
        assert_eq!(board.ports().len(), 9);

        let general = board
            .ports()
            .iter()
            .filter(|p| p.kind() == PortKind::General)
            .count();
        assert_eq!(general, 4);

        // Ports sit on distinct outermost-layer sites.
        let rim = &board.layers()[2];
        let mut seen = Vec::new();
        for port in board.ports() {
            assert!(rim.contains(&port.site()));
            assert!(!seen.contains(&port.site()), "port site used twice");
            seen.push(port.site());
        }
    }

    #[test]
    fn test_desert_tile_present_once() {
        let board = board(3);
        let deserts = board
            .tiles()
            .iter()
            .filter(|t| t.kind() == TileKind::Desert)
            .count();
        assert_eq!(deserts, 1);
    }
}
