//! ASCII map rendering for debugging and the command line

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::consts::{S_OBSERVER, S_VOID};
use crate::dungeon::MapGrid;

/// One line per map row
///
/// Cells never seen are blank unless `reveal` is set. The observer, when
/// given and on the map, is drawn over its cell.
pub fn render_ascii(grid: &MapGrid, observer: Option<(i32, i32)>, reveal: bool) -> String {
    let capacity = (grid.width().max(0) as usize + 1) * grid.height().max(0) as usize;
    let mut out = String::with_capacity(capacity);
    for y in 0..grid.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..grid.width() {
            let symbol = if observer == Some((x, y)) {
                S_OBSERVER
            } else if reveal || grid.is_seen(x, y) {
                grid.get(x, y).map_or(S_VOID, |c| c.symbol())
            } else {
                S_VOID
            };
            out.push(symbol);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{CellType, Room};
    use crate::vision::compute_visible;

    #[test]
    fn test_revealed_room() {
        let mut grid = MapGrid::new(6, 4);
        grid.stamp_room(&Room::new(0, 0, 5, 4));
        grid.set(4, 1, CellType::Door);
        let text = render_ascii(&grid, Some((2, 1)), true);
        assert_eq!(text, "##### \n#.@.+ \n#...# \n##### ");
    }

    #[test]
    fn test_unseen_cells_are_blank() {
        let mut grid = MapGrid::new(6, 4);
        grid.stamp_room(&Room::new(0, 0, 5, 4));
        assert_eq!(render_ascii(&grid, None, false).trim(), "");

        compute_visible(&mut grid, 2, 1, 10);
        let text = render_ascii(&grid, None, false);
        assert_eq!(text.lines().next(), Some("##### "));
    }
}
