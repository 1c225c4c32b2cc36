//! Level generation pipeline
//!
//! Partition, carve, register rooms, route corridors bottom-up, stamp the
//! grid and light it. Every stage draws from the same [`GameRng`] in a fixed
//! order, so a seed reproduces the level exactly.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use log::info;

use crate::nav::NavGraph;
use crate::rng::GameRng;
use crate::vision::compute_visible;
use crate::world::{GenerationError, GenerationOptions};

use super::bsp::PartitionTree;
use super::corridor::route_corridor;
use super::grid::MapGrid;
use super::lighting::apply_lighting;
use super::rect::Rect;

/// A generated level
#[derive(Debug, Clone)]
pub struct Dungeon {
    pub grid: MapGrid,
    pub nav: NavGraph,
    pub tree: PartitionTree,
    seed: u64,
}

impl Dungeon {
    /// Seed the level was generated from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Check if a cell can be entered
    pub fn has_location(&self, x: i32, y: i32) -> bool {
        self.nav.has_location(x, y)
    }

    /// Center of the first leaf's room
    pub fn start_position(&self) -> (i32, i32) {
        self.tree
            .rooms()
            .next()
            .map(|room| room.center())
            .unwrap_or((self.width() / 2, self.height() / 2))
    }

    /// Every room light in map space
    pub fn lights(&self) -> Vec<(i32, i32)> {
        self.tree
            .rooms()
            .flat_map(|room| room.light_positions())
            .collect()
    }

    /// Reset visibility and recompute it from an observer
    pub fn recompute_visibility(&mut self, x: i32, y: i32, radius: i32) {
        compute_visible(&mut self.grid, x, y, radius);
    }
}

/// Generate a level with default options
///
/// Without a seed the generator is seeded from entropy; the chosen seed is
/// available through [`Dungeon::seed`].
#[cfg(feature = "std")]
pub fn generate_dungeon(
    width: i32,
    height: i32,
    seed: Option<u64>,
) -> Result<Dungeon, GenerationError> {
    let mut rng = GameRng::from_seed_or_entropy(seed);
    generate_dungeon_with(width, height, &mut rng, &GenerationOptions::default())
}

/// Generate a level with tuned options from an existing RNG stream
pub fn generate_dungeon_with(
    width: i32,
    height: i32,
    rng: &mut GameRng,
    options: &GenerationOptions,
) -> Result<Dungeon, GenerationError> {
    options.validate()?;
    let min = options.min_room_size;
    if width < min || height < min {
        return Err(GenerationError::MapTooSmall { width, height, min });
    }

    let mut tree = PartitionTree::build(Rect::new(0, 0, width, height), options, rng);

    let mut nav = NavGraph::new(width, height);
    for room in tree.rooms() {
        nav.add_area(room.x, room.y, &room.area);
    }

    // Children before parents: both subtrees are connected before their join
    for id in tree.post_order() {
        if tree.node(id).is_leaf() {
            continue;
        }
        if let Some(corridor) = route_corridor(&tree, id, &mut nav, options, rng) {
            tree.attach_corridor(id, corridor);
        }
    }

    let mut grid = MapGrid::new(width, height);
    for room in tree.rooms() {
        grid.stamp_room(room);
    }
    for corridor in tree.corridors() {
        grid.stamp_corridor(corridor);
    }

    let lights: Vec<_> = tree.rooms().flat_map(|r| r.light_positions()).collect();
    let lit = apply_lighting(&mut grid, &nav, &lights, options)?;

    info!(
        "generated {width}x{height} level (seed {}): {} leaves, {} corridors, {} navigable cells, {lit} lit",
        rng.seed(),
        tree.leaf_count(),
        tree.corridors().count(),
        nav.len()
    );

    Ok(Dungeon {
        grid,
        nav,
        tree,
        seed: rng.seed(),
    })
}
