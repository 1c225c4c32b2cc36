//! Generation constants
//!
//! Defaults for [`GenerationOptions`](crate::world::GenerationOptions).

/// A split is only valid if both children exceed this along the split axis
pub const MIN_LEAF_SIZE: i32 = 12;

/// Smallest room extent, wall border included
pub const MIN_ROOM_SIZE: i32 = 5;

/// Chance that the first split attempt cuts horizontally
pub const HORIZONTAL_SPLIT_PERCENT: u32 = 30;

/// Rooms never exceed this width:height (or height:width) ratio
pub const MAX_ASPECT_RATIO: i32 = 8;

/// Chance per corridor step of ending the current directional run
pub const CORRIDOR_ABORT_PERCENT: u32 = 10;

/// Light propagation budget from each light source
pub const LIGHT_RADIUS: u32 = 24;

/// Step cost for light entering a door cell
pub const DOOR_LIGHT_COST: u32 = 3;

/// Default vision radius of an exploring observer
pub const SIGHT_RANGE: i32 = 12;

/// Map symbols
pub const S_VOID: char = ' ';
pub const S_WALL: char = '#';
pub const S_FLOOR: char = '.';
pub const S_DOOR: char = '+';
pub const S_OBSERVER: char = '@';
