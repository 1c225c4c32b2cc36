use delve_core::dungeon::{CellType, MapGrid, Room, generate_dungeon_with};
use delve_core::vision::compute_visible;
use delve_core::{Direction, GameRng, GenerationOptions, MoveOutcome, Session};
use proptest::prelude::*;

fn dungeon_grid(seed: u64) -> (MapGrid, Vec<(i32, i32)>) {
    let mut rng = GameRng::new(seed);
    let dungeon = generate_dungeon_with(80, 50, &mut rng, &GenerationOptions::default()).unwrap();
    let mut cells: Vec<(i32, i32)> = dungeon.nav.cells().map(|id| dungeon.nav.position(id)).collect();
    cells.sort();
    (dungeon.grid, cells)
}

/// A single closed room on an otherwise void map
fn closed_room(room: &Room, width: i32, height: i32) -> MapGrid {
    let mut grid = MapGrid::new(width, height);
    grid.stamp_room(room);
    grid
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn visibility_is_idempotent(seed in any::<u64>(), pick in any::<usize>(), radius in 0i32..20) {
        let (mut grid, cells) = dungeon_grid(seed);
        let (x, y) = cells[pick % cells.len()];

        compute_visible(&mut grid, x, y, radius);
        let first = grid.visible_cells();
        compute_visible(&mut grid, x, y, radius);
        prop_assert_eq!(first, grid.visible_cells());
        prop_assert!(grid.is_visible(x, y));
    }

    #[test]
    fn seen_never_shrinks(seed in any::<u64>(), picks in prop::collection::vec(any::<usize>(), 1..12)) {
        let (mut grid, cells) = dungeon_grid(seed);
        let mut seen: Vec<(i32, i32)> = Vec::new();
        for pick in picks {
            let (x, y) = cells[pick % cells.len()];
            compute_visible(&mut grid, x, y, 12);
            for &(sx, sy) in &seen {
                prop_assert!(grid.is_seen(sx, sy));
            }
            seen = grid.positions().filter(|&(px, py)| grid.is_seen(px, py)).collect();
        }
    }

    #[test]
    fn visible_cells_stay_within_radius(seed in any::<u64>(), pick in any::<usize>(), radius in 1i32..16) {
        let (mut grid, cells) = dungeon_grid(seed);
        let (x, y) = cells[pick % cells.len()];
        compute_visible(&mut grid, x, y, radius);
        for (vx, vy) in grid.visible_cells() {
            let (dx, dy) = (vx - x, vy - y);
            prop_assert!(dx * dx + dy * dy <= radius * radius);
        }
    }

    #[test]
    fn session_never_leaves_the_graph(seed in any::<u64>(), keys in "[hjklx]{0,80}") {
        let mut rng = GameRng::new(seed);
        let dungeon = generate_dungeon_with(60, 40, &mut rng, &GenerationOptions::default()).unwrap();
        let mut session = Session::new(dungeon, 10);
        for key in keys.chars() {
            let Some(direction) = Direction::from_key(key) else { continue };
            let before = session.position();
            if session.try_move(direction) == MoveOutcome::Blocked {
                prop_assert_eq!(session.position(), before);
            }
            let (x, y) = session.position();
            prop_assert!(session.dungeon().has_location(x, y));
        }
    }
}

#[test]
fn test_observer_sees_whole_closed_room() {
    for (room, radius) in [
        (Room::new(5, 5, 11, 9), 10),
        (Room::new(5, 5, 11, 9), 7),
        (Room::new(3, 4, 7, 7), 6),
        (Room::new(2, 2, 9, 5), 12),
    ] {
        let mut grid = closed_room(&room, 30, 30);
        let (cx, cy) = room.center();
        compute_visible(&mut grid, cx, cy, radius);

        let bounds = room.bounds();
        for (x, y) in grid.positions() {
            let inside = x >= bounds.x && x < bounds.right() && y >= bounds.y && y < bounds.bottom();
            assert_eq!(grid.is_visible(x, y), inside, "({x}, {y}) in {bounds:?} radius {radius}");
        }
    }
}

#[test]
fn test_open_line_is_visible() {
    let mut grid = MapGrid::new(41, 41);
    for (x, y) in grid.positions().collect::<Vec<_>>() {
        grid.set(x, y, CellType::Floor);
    }
    compute_visible(&mut grid, 20, 20, 15);

    for d in 1..=15 {
        assert!(grid.is_visible(20 + d, 20));
        assert!(grid.is_visible(20, 20 - d));
    }
    for d in 1..=10 {
        assert!(grid.is_visible(20 - d, 20 + d));
    }
    assert!(!grid.is_visible(20 + 16, 20));
}

#[test]
fn test_cells_behind_wall_are_hidden() {
    let mut grid = MapGrid::new(41, 41);
    for (x, y) in grid.positions().collect::<Vec<_>>() {
        grid.set(x, y, CellType::Floor);
    }
    grid.set(20, 16, CellType::Wall);
    grid.set(24, 20, CellType::Wall);
    compute_visible(&mut grid, 20, 20, 15);

    assert!(grid.is_visible(20, 16));
    assert!(grid.is_visible(24, 20));
    for d in 1..=10 {
        assert!(!grid.is_visible(20, 16 - d));
        assert!(!grid.is_visible(24 + d, 20));
    }
}

#[test]
fn test_seen_survives_moving_away() {
    let room = Room::new(0, 0, 40, 7);
    let mut grid = closed_room(&room, 40, 7);
    compute_visible(&mut grid, 3, 3, 5);
    assert!(grid.is_visible(6, 3));

    compute_visible(&mut grid, 33, 3, 5);
    assert!(!grid.is_visible(6, 3));
    assert!(grid.is_seen(6, 3));
    assert!(!grid.is_seen(20, 3));
}
