//! Integration tests for the Hexhaven simulation core.
//!
//! These tests exercise complete flows across the public surface: board
//! generation, placement, production fan-out, trading and the derived
//! calculations, on boards of several sizes.

use pretty_assertions::assert_eq;

use hexhaven_core::*;

/// Claim a free road next to the site so the adjacency rule passes, then
/// settle there.
fn settle(board: &mut BoardGraph, player: PlayerId, site: NodeId) {
    let roads = board.site(site).unwrap().roads().to_vec();
    if !roads
        .iter()
        .any(|&r| board.road(r).unwrap().owner() == Some(player))
    {
        let free = roads
            .into_iter()
            .find(|&r| board.road(r).unwrap().owner().is_none())
            .expect("site has a free road");
        board.place_road(player, free).unwrap();
    }
    board.place_settlement(player, site).unwrap();
}

/// A site two road-hops away from every building, so the spacing rule
/// cannot interfere.
fn isolated_site(board: &BoardGraph, occupied: &[NodeId]) -> NodeId {
    board
        .sites()
        .iter()
        .map(|s| s.id())
        .find(|&id| {
            !occupied.contains(&id)
                && board
                    .neighbours_of(id)
                    .iter()
                    .all(|n| !occupied.contains(n))
                && board.site(id).unwrap().building().is_none()
                && board
                    .neighbours_of(id)
                    .iter()
                    .all(|&n| board.site(n).unwrap().building().is_none())
        })
        .expect("board large enough for an isolated site")
}

#[test]
fn test_generated_boards_satisfy_invariants() {
    for ring_count in 2..=5 {
        let board = BoardGraph::generate(ring_count, 12.0, false).unwrap();

        assert_eq!(board.sites().len(), 6 * ring_count * ring_count);
        assert_eq!(
            board.tiles().len(),
            TileListBuilder::tile_count(ring_count)
        );

        for site in board.sites() {
            assert!(!site.tiles().is_empty() && site.tiles().len() <= 3);
            assert!(site.roads().len() >= 2 && site.roads().len() <= 3);
            if site.layer() < ring_count {
                assert_eq!(site.tiles().len(), 3);
                assert_eq!(site.roads().len(), 3);
            }
        }
    }
}

#[test]
fn test_generation_rejects_bad_sizes() {
    assert!(BoardGraph::generate(0, 10.0, false).is_err());
    assert!(BoardGraph::generate(1, 10.0, false).is_err());
    assert!(matches!(
        BoardGraph::generate(2, -3.0, false),
        Err(RuleError::Configuration(_))
    ));
}

#[test]
fn test_settlement_city_production_flow() {
    let mut board = BoardGraph::generate(3, 10.0, false).unwrap();

    // Find a producing tile and settle one of its corners.
    let (tile_id, value) = board
        .tiles()
        .iter()
        .enumerate()
        .find_map(|(id, t)| t.value().map(|v| (id, v)))
        .unwrap();
    let site = board.subscribers_of(tile_id).next().unwrap().id();
    settle(&mut board, 0, site);

    let payouts = board.distribute_roll(value);
    let mine: Vec<&Payout> = payouts.iter().filter(|p| p.site == site).collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].amount, 1);

    // Upgrade and roll again: the same tile now pays double.
    board.upgrade_to_city(0, site).unwrap();
    let payouts = board.distribute_roll(value);
    let mine: Vec<&Payout> = payouts.iter().filter(|p| p.site == site).collect();
    assert_eq!(mine[0].amount, 2);
}

#[test]
fn test_spacing_blocks_neighbouring_player() {
    let mut board = BoardGraph::generate(3, 10.0, false).unwrap();
    settle(&mut board, 0, 0);

    let neighbour = board.neighbours_of(0)[0];
    let roads = board.site(neighbour).unwrap().roads().to_vec();
    let free = roads
        .into_iter()
        .find(|&r| board.road(r).unwrap().owner().is_none())
        .unwrap();
    board.place_road(1, free).unwrap();

    assert_eq!(
        board.place_settlement(1, neighbour),
        Err(RuleError::SpacingRuleViolation)
    );
}

#[test]
fn test_longest_road_grows_with_chain() {
    let mut board = BoardGraph::generate(3, 10.0, false).unwrap();

    // The center hexagon roads are ids 0-5; claim them one by one.
    for (i, road) in (0..6).enumerate() {
        board.place_road(2, road).unwrap();
        let owned = board.roads_owned_by(2);
        assert_eq!(longest_route(&board, &owned), i as u32 + 1);
    }
}

#[test]
fn test_port_reachability_follows_buildings() {
    let mut board = BoardGraph::generate(3, 10.0, false).unwrap();
    assert!(board.ports_reachable_by(0).is_empty());

    let port_site = board.ports()[0].site();
    let port_kind = board.ports()[0].kind();
    settle(&mut board, 0, port_site);

    let reachable = board.ports_reachable_by(0);
    assert_eq!(reachable.len(), 1);
    assert_eq!(reachable[0].kind(), port_kind);
    assert!(board.ports_reachable_by(1).is_empty());
}

#[test]
fn test_exchange_with_and_without_port() {
    let mut board = BoardGraph::generate(3, 10.0, false).unwrap();

    // Without ports only the 4:1 bank applies.
    let offered = ResourceHand::single(Resource::Wood, 4);
    let desired = ResourceHand::single(Resource::Clay, 1);
    assert!(validate_exchange(&offered, &desired, &board.ports_reachable_by(0)).is_ok());

    let bad = ResourceHand::single(Resource::Wood, 1);
    assert_eq!(
        validate_exchange(&bad, &desired, &board.ports_reachable_by(0)),
        Err(RuleError::InvalidTradeRatio)
    );

    // Settle a general port and a 3:1 bundle starts working.
    let port_site = board
        .ports()
        .iter()
        .find(|p| p.kind() == PortKind::General)
        .unwrap()
        .site();
    settle(&mut board, 0, port_site);

    let offered = ResourceHand::single(Resource::Wood, 3);
    assert!(validate_exchange(&offered, &desired, &board.ports_reachable_by(0)).is_ok());
    // The other player gained nothing.
    assert_eq!(
        validate_exchange(&offered, &desired, &board.ports_reachable_by(1)),
        Err(RuleError::InvalidTradeRatio)
    );
}

#[test]
fn test_victory_points_accumulate() {
    let mut board = BoardGraph::generate(3, 10.0, false).unwrap();
    assert_eq!(board.building_victory_points(0), 0);

    settle(&mut board, 0, 0);
    assert_eq!(board.building_victory_points(0), 1);

    let far = isolated_site(&board, &[0]);
    settle(&mut board, 0, far);
    assert_eq!(board.building_victory_points(0), 2);

    board.upgrade_to_city(0, far).unwrap();
    assert_eq!(board.building_victory_points(0), 3);
    assert_eq!(board.building_victory_points(1), 0);
}

#[test]
fn test_snapshot_round_trip() {
    let mut board = BoardGraph::generate(2, 10.0, false).unwrap();
    settle(&mut board, 0, 0);

    let snapshot = board.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: BoardSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.nodes.len(), snapshot.nodes.len());
    assert_eq!(restored.nodes[0].building.unwrap().owner, 0);
    assert_eq!(restored.ring_count, 2);
}

#[test]
fn test_flipped_board_satisfies_same_invariants() {
    let board = BoardGraph::generate(3, 10.0, true).unwrap();
    assert_eq!(board.sites().len(), 54);
    for site in board.sites() {
        assert!(site.coords().is_some());
        if site.layer() < 3 {
            assert_eq!(site.tiles().len(), 3);
            assert_eq!(site.roads().len(), 3);
        }
    }
}
