//! Local cell areas shared by rooms and corridors
//!
//! An [`Area`] is a small grid in local coordinates. Cells outside the
//! shape are [`AreaCell::Untouched`] and never overwrite map state when the
//! area is stamped onto the [`MapGrid`](super::MapGrid).

#[cfg(not(feature = "std"))]
use crate::compat::*;

/// Cells in a `width × height` block, zero when either side is negative
pub(crate) fn cell_count(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

/// One cell of a room or corridor footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AreaCell {
    /// Not part of this shape
    #[default]
    Untouched,
    Wall,
    Floor,
}

impl AreaCell {
    /// Check if the cell is open floor
    pub const fn is_floor(self) -> bool {
        matches!(self, AreaCell::Floor)
    }
}

/// A `width × height` block of [`AreaCell`]s, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    width: i32,
    height: i32,
    cells: Vec<AreaCell>,
}

impl Area {
    /// Create an area with every cell untouched
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "area must have positive size");
        Self {
            width,
            height,
            cells: vec![AreaCell::Untouched; cell_count(width, height)],
        }
    }

    /// Floor everywhere except a one-cell wall border
    pub fn walled_box(width: i32, height: i32) -> Self {
        let mut area = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                let cell = if border { AreaCell::Wall } else { AreaCell::Floor };
                area.set(x, y, cell);
            }
        }
        area
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a local cell lies inside the area
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Cell at local (`x`, `y`); out-of-range cells read as untouched
    pub fn get(&self, x: i32, y: i32) -> AreaCell {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width as usize + x as usize]
        } else {
            AreaCell::Untouched
        }
    }

    /// Set the cell at local (`x`, `y`); out-of-range writes are ignored
    pub fn set(&mut self, x: i32, y: i32, cell: AreaCell) {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width as usize + x as usize] = cell;
        }
    }

    /// Iterate every cell as `(x, y, cell)` in local coordinates
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, AreaCell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i as i32 % width, i as i32 / width, cell))
    }

    /// Number of floor cells
    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_floor()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walled_box() {
        let area = Area::walled_box(5, 4);
        assert_eq!(area.get(0, 0), AreaCell::Wall);
        assert_eq!(area.get(4, 3), AreaCell::Wall);
        assert_eq!(area.get(2, 0), AreaCell::Wall);
        assert_eq!(area.get(1, 1), AreaCell::Floor);
        assert_eq!(area.get(3, 2), AreaCell::Floor);
        assert_eq!(area.floor_count(), 3 * 2);
    }

    #[test]
    fn test_cell_count_is_widened() {
        assert_eq!(cell_count(-3, 10), 0);
        assert_eq!(cell_count(i32::MAX, 0), 0);
        assert_eq!(cell_count(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn test_out_of_range_is_untouched() {
        let mut area = Area::new(3, 3);
        area.set(5, 5, AreaCell::Floor);
        assert_eq!(area.get(5, 5), AreaCell::Untouched);
        assert_eq!(area.get(-1, 0), AreaCell::Untouched);
        assert_eq!(area.floor_count(), 0);
    }

    #[test]
    fn test_iter_coordinates() {
        let mut area = Area::new(4, 2);
        area.set(3, 1, AreaCell::Floor);
        let floors: Vec<_> = area
            .iter()
            .filter(|(_, _, c)| c.is_floor())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(floors, vec![(3, 1)]);
    }
}
