//! Whole-board invariants across strategies and levels.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_truncation)]

use std::collections::BTreeSet;

use approx::assert_relative_eq;
use xagon_board::{
    dispatch_hexagons, BoardParams, EdgeMatching, Hexagon, Icosahedron, PlayerId, TriangleState,
};
use xagon_subdivide::StrategyKind;
use xagon_types::{Triangle, VertexKey};

const KINDS: [StrategyKind; 2] = [StrategyKind::Naive, StrategyKind::OneToFour];

fn board(kind: StrategyKind, levels: u32) -> Icosahedron {
    let mut board = Icosahedron::new(kind.build()).unwrap();
    board.subdivide(levels).unwrap();
    board
}

// =============================================================================
// Subdivision
// =============================================================================

#[test]
fn test_triangle_count_is_twenty_times_four_to_the_level() {
    for kind in KINDS {
        for levels in 0..=4 {
            let board = board(kind, levels);
            assert_eq!(board.len(), 20 * 4_usize.pow(levels), "{kind} level {levels}");
            assert_eq!(board.level(), levels);
        }
    }
}

#[test]
fn test_total_area_is_invariant() {
    for kind in KINDS {
        let base_area = board(kind, 0).total_area();
        for levels in 1..=3 {
            assert_relative_eq!(board(kind, levels).total_area(), base_area, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_ids_are_unique_and_fresh_after_each_pass() {
    let mut board = board(StrategyKind::OneToFour, 0);
    let mut previous: BTreeSet<u32> = board.triangles().iter().map(|t| t.id().get()).collect();
    for _ in 0..3 {
        board.subdivide(1).unwrap();
        let current: BTreeSet<u32> = board.triangles().iter().map(|t| t.id().get()).collect();
        assert_eq!(current.len(), board.len());
        assert!(current.is_disjoint(&previous));
        previous = current;
    }
}

#[test]
fn test_leaves_at_level_two_share_one_edge_length() {
    for kind in KINDS {
        let board = board(kind, 2);
        let shortest = board.shortest_edge_length();
        assert!(shortest > 0.0);
        for t in board.triangles() {
            for len in t.edge_lengths() {
                assert_relative_eq!(len, shortest, max_relative = 1e-12);
            }
        }
        // A quarter of the base edge.
        let base = Icosahedron::new(kind.build()).unwrap().shortest_edge_length();
        assert_relative_eq!(shortest, base / 4.0, max_relative = 1e-12);
    }
}

#[test]
fn test_one_to_four_shares_midpoints_exactly() {
    let mut board =
        Icosahedron::with_params(StrategyKind::OneToFour.build(), BoardParams::exact()).unwrap();
    board.subdivide(3).unwrap();

    let index = board.adjacency();
    assert!(index.is_watertight());
    assert_eq!(index.vertex_count(), 10 * 4_usize.pow(3) + 2);

    let distinct: BTreeSet<VertexKey> = board
        .triangles()
        .iter()
        .flat_map(Triangle::vertex_keys)
        .collect();
    assert_eq!(distinct.len(), index.vertex_count());
}

#[test]
fn test_naive_with_tolerance_is_watertight() {
    let mut board = Icosahedron::with_params(
        StrategyKind::Naive.build(),
        BoardParams::new().with_edge_matching(EdgeMatching::default()),
    )
    .unwrap();
    board.subdivide(3).unwrap();
    assert!(board.adjacency().is_watertight());
    assert_eq!(board.adjacency().vertex_count(), 10 * 4_usize.pow(3) + 2);
}

#[test]
fn test_every_face_has_three_neighbors() {
    for kind in KINDS {
        let board = board(kind, 2);
        for i in 0..board.len() {
            assert_eq!(board.adjacency().neighbors(i).len(), 3);
        }
    }
}

#[test]
fn test_winding_stays_outward() {
    for kind in KINDS {
        for t in board(kind, 2).triangles() {
            let n = t.normal().unwrap();
            assert!(n.dot(&t.center_point().coords) > 0.0);
        }
    }
}

// =============================================================================
// Hexagons
// =============================================================================

#[test]
fn test_hexagons_surround_every_vertex_except_the_original_twelve() {
    for kind in KINDS {
        let board = board(kind, 2);
        let index = board.adjacency();

        let mut centers = BTreeSet::new();
        for t in board.triangles() {
            for hex in board.hexagons_around(t.id()).unwrap() {
                assert_eq!(index.triangles_at_vertex(hex.vertex()).len(), 6);
                centers.insert(hex.vertex());
            }
        }

        let corners = (0..index.vertex_count() as u32)
            .filter(|&v| index.triangles_at_vertex(v).len() == 5)
            .count();
        assert_eq!(corners, 12);
        assert_eq!(centers.len(), index.vertex_count() - 12);
    }
}

#[test]
fn test_hexagon_centers_are_shared_by_all_six_faces() {
    let board = board(StrategyKind::OneToFour, 1);
    for t in board.triangles() {
        for hex in board.hexagons_around(t.id()).unwrap() {
            for id in hex.triangles() {
                let face = board.triangle(*id).unwrap();
                assert!(face.vertices().contains(&hex.center()));
            }
        }
    }
}

#[test]
fn test_dispatch_reports_each_completed_hexagon_once() {
    let mut board = board(StrategyKind::OneToFour, 2);
    let ids: Vec<_> = board.triangles().iter().map(Triangle::id).collect();

    let mut nothing: Vec<Hexagon> = Vec::new();
    assert_eq!(dispatch_hexagons(&board, &ids, &mut nothing).unwrap(), 0);

    board.set_state(&ids, TriangleState::claimed_by(PlayerId(3))).unwrap();
    let mut collected: Vec<Hexagon> = Vec::new();
    let count = dispatch_hexagons(&board, &ids, &mut collected).unwrap();
    assert_eq!(count, board.adjacency().vertex_count() - 12);
    assert_eq!(collected.len(), count);
}

#[test]
fn test_observers_can_query_hexagons_during_notification() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut board = board(StrategyKind::OneToFour, 1);
    let completed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&completed);
    board.register_on_triangle_changed(move |board, change| {
        for t in &change.triangles {
            sink.borrow_mut()
                .extend(board.completed_hexagons(t.id()).unwrap());
        }
    });

    let center = board.triangles()[3].id();
    let ring = *board.hexagons_around(center).unwrap()[0].triangles();
    board.set_state(&ring, TriangleState::claimed_by(PlayerId(1))).unwrap();

    // Each of the six faces reports the ring it just completed.
    assert_eq!(completed.borrow().len(), 6);
}
