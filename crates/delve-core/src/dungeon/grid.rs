//! The materialized map
//!
//! A flat row-major grid of [`CellType`] plus per-cell exploration state
//! (seen, visible) and the light level left by the lighting pass.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use super::area::{AreaCell, cell_count};
use super::cell::CellType;
use super::corridor::Corridor;
use super::room::Room;

/// Row-major map of cells and their exploration state
#[derive(Debug, Clone)]
pub struct MapGrid {
    width: i32,
    height: i32,
    cells: Vec<CellType>,
    seen: Vec<bool>,
    visible: Vec<bool>,
    light: Vec<u32>,
}

impl MapGrid {
    /// A map of void cells, nothing seen
    pub fn new(width: i32, height: i32) -> Self {
        let len = cell_count(width, height);
        Self {
            width,
            height,
            cells: vec![CellType::Void; len],
            seen: vec![false; len],
            visible: vec![false; len],
            light: vec![0; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Cell type, `None` outside the map
    pub fn get(&self, x: i32, y: i32) -> Option<CellType> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite a cell; out of range is ignored
    pub fn set(&mut self, x: i32, y: i32, cell: CellType) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Outside the map counts as opaque
    pub fn blocks_sight(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|c| c.blocks_sight())
    }

    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| c.is_passable())
    }

    pub fn is_seen(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.seen[i])
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.visible[i])
    }

    /// Light level, 0 for unlit cells
    pub fn light(&self, x: i32, y: i32) -> u32 {
        self.index(x, y).map_or(0, |i| self.light[i])
    }

    pub fn set_light(&mut self, x: i32, y: i32, level: u32) {
        if let Some(i) = self.index(x, y) {
            self.light[i] = level;
        }
    }

    pub fn clear_light(&mut self) {
        self.light.fill(0);
    }

    /// Hide every cell; seen flags are kept
    pub fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    /// Make a cell visible and remember it as seen
    pub fn mark_visible(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.visible[i] = true;
            self.seen[i] = true;
        }
    }

    /// Visible cells in row-major order
    pub fn visible_cells(&self) -> Vec<(i32, i32)> {
        self.positions().filter(|&(x, y)| self.is_visible(x, y)).collect()
    }

    /// Number of cells of a type
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    /// Write a room's walls and floor
    pub fn stamp_room(&mut self, room: &Room) {
        for (lx, ly, cell) in room.area.iter() {
            let typ = match cell {
                AreaCell::Untouched => continue,
                AreaCell::Wall => CellType::Wall,
                AreaCell::Floor => CellType::Floor,
            };
            self.set(room.x + lx, room.y + ly, typ);
        }
    }

    /// Write a corridor over the rooms already stamped
    ///
    /// Floor always wins, so corridors cut through room walls. Corridor
    /// walls only fill void and never close an opening.
    pub fn stamp_corridor(&mut self, corridor: &Corridor) {
        for (lx, ly, cell) in corridor.area.iter() {
            let (x, y) = (corridor.x + lx, corridor.y + ly);
            match cell {
                AreaCell::Untouched => {}
                AreaCell::Wall => {
                    if self.get(x, y) == Some(CellType::Void) {
                        self.set(x, y, CellType::Wall);
                    }
                }
                AreaCell::Floor => {
                    let typ = if corridor.doors.contains(&(lx, ly)) {
                        CellType::Door
                    } else {
                        CellType::Floor
                    };
                    self.set(x, y, typ);
                }
            }
        }
    }
}
