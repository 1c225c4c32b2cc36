//! Rooms carved inside partition leaves
//!
//! A room is a walled box placed somewhere inside its leaf. Padding is drawn
//! per axis and split unevenly between the two sides so rooms do not all
//! sit in the centre of their leaf.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::rng::GameRng;
use crate::world::GenerationOptions;

use super::area::{Area, AreaCell};
use super::rect::Rect;

/// A room owned by one leaf of the partition tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Left x coordinate in map space
    pub x: i32,
    /// Top y coordinate in map space
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Walls on the border, floor inside
    pub area: Area,
    /// Light sources as offsets from the room origin
    pub lights: Vec<(i32, i32)>,
}

impl Room {
    /// Create a walled room with no lights
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            area: Area::walled_box(width, height),
            lights: Vec::new(),
        }
    }

    /// Footprint in map space, walls included
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Centre of the room in map space
    pub fn center(&self) -> (i32, i32) {
        self.bounds().center()
    }

    /// Area cell at a map position
    pub fn cell_at(&self, x: i32, y: i32) -> AreaCell {
        self.area.get(x - self.x, y - self.y)
    }

    /// Light sources in map space
    pub fn light_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.lights.iter().map(|&(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Pick a uniformly random interior cell, in map space
    pub fn random_interior(&self, rng: &mut GameRng) -> (i32, i32) {
        let x = rng.range_inclusive(1, self.width - 2);
        let y = rng.range_inclusive(1, self.height - 2);
        (self.x + x, self.y + y)
    }
}

/// Total and leading padding for one axis of a leaf
fn axis_padding(extent: i32, min_room: i32, rng: &mut GameRng) -> (i32, i32) {
    let max_pad = (extent - min_room).max(0);
    let lo = max_pad.min(2);
    let hi = (max_pad * 3 / 4).max(lo);
    let total = rng.range_inclusive(lo, hi);
    let lead = total * rng.range_inclusive(20, 80) / 100;
    (total, lead)
}

/// Carve a room inside a leaf rectangle
///
/// The caller guarantees the leaf is at least `min_room_size` on both axes.
pub fn carve_room(leaf: Rect, options: &GenerationOptions, rng: &mut GameRng) -> Room {
    let min_room = options.min_room_size;
    debug_assert!(
        leaf.width >= min_room && leaf.height >= min_room,
        "leaf {leaf:?} is smaller than the minimum room size"
    );

    let (pad_y, top) = axis_padding(leaf.height, min_room, rng);
    let (pad_x, left) = axis_padding(leaf.width, min_room, rng);

    let mut width = leaf.width - pad_x;
    let mut height = leaf.height - pad_y;

    // Slivers make poor rooms
    let ratio = options.max_aspect_ratio;
    if width > height * ratio {
        width = height * ratio;
    }
    if height > width * ratio {
        height = width * ratio;
    }
    debug_assert!(width >= min_room && height >= min_room);

    let mut room = Room::new(leaf.x + left, leaf.y + top, width, height);

    let lx = rng.range_inclusive(1, width - 2);
    let ly = rng.range_inclusive(1, height - 2);
    if room.area.get(lx, ly).is_floor() {
        room.lights.push((lx, ly));
    }

    room
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_inside_leaf() {
        let options = GenerationOptions::default();
        let mut rng = GameRng::new(42);
        for i in 0..200 {
            let leaf = Rect::new(i % 7, i % 5, 13 + i % 20, 13 + i % 11);
            let room = carve_room(leaf, &options, &mut rng);
            let bounds = room.bounds();
            assert!(bounds.x >= leaf.x && bounds.right() <= leaf.right());
            assert!(bounds.y >= leaf.y && bounds.bottom() <= leaf.bottom());
            assert!(room.width >= options.min_room_size);
            assert!(room.height >= options.min_room_size);
        }
    }

    #[test]
    fn test_aspect_ratio_clamped() {
        let options = GenerationOptions::default();
        let mut rng = GameRng::new(7);
        for _ in 0..50 {
            let room = carve_room(Rect::new(0, 0, 200, 5), &options, &mut rng);
            assert!(room.width <= room.height * options.max_aspect_ratio);
            let room = carve_room(Rect::new(0, 0, 5, 200), &options, &mut rng);
            assert!(room.height <= room.width * options.max_aspect_ratio);
        }
    }

    #[test]
    fn test_minimum_leaf_gives_minimum_room() {
        let options = GenerationOptions::default();
        let mut rng = GameRng::new(1);
        let room = carve_room(Rect::new(3, 4, 5, 5), &options, &mut rng);
        assert_eq!(room.bounds(), Rect::new(3, 4, 5, 5));
    }

    #[test]
    fn test_single_interior_light() {
        let options = GenerationOptions::default();
        let mut rng = GameRng::new(99);
        let room = carve_room(Rect::new(10, 10, 20, 16), &options, &mut rng);
        assert_eq!(room.lights.len(), 1);
        let (lx, ly) = room.light_positions().next().unwrap();
        assert_eq!(room.cell_at(lx, ly), AreaCell::Floor);
    }

    #[test]
    fn test_border_is_wall() {
        let room = Room::new(4, 4, 6, 5);
        for x in 4..10 {
            assert_eq!(room.cell_at(x, 4), AreaCell::Wall);
            assert_eq!(room.cell_at(x, 8), AreaCell::Wall);
        }
        assert_eq!(room.cell_at(5, 5), AreaCell::Floor);
        assert_eq!(room.cell_at(3, 5), AreaCell::Untouched);
    }

    #[test]
    fn test_random_interior() {
        let room = Room::new(4, 4, 6, 5);
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            let (x, y) = room.random_interior(&mut rng);
            assert_eq!(room.cell_at(x, y), AreaCell::Floor);
        }
    }
}
