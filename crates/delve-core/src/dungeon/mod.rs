//! Dungeon system
//!
//! Contains the partition tree, rooms, corridors, the map grid and the
//! generation pipeline that ties them together.

mod area;
mod bsp;
mod cell;
mod corridor;
mod generation;
mod grid;
mod lighting;
mod rect;
mod room;

pub use area::{Area, AreaCell};
pub use bsp::{NodeId, Occupancy, PartitionNode, PartitionTree};
pub use cell::CellType;
pub use corridor::{Corridor, route_corridor};
#[cfg(feature = "std")]
pub use generation::generate_dungeon;
pub use generation::{Dungeon, generate_dungeon_with};
pub use grid::MapGrid;
pub use lighting::apply_lighting;
pub use rect::{Rect, SplitAxis};
pub use room::{Room, carve_room};
