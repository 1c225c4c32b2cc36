//! Octant shadowcasting over the map grid

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::dungeon::MapGrid;

use super::shadow::{Shadow, ShadowLine};

/// Recompute the visible set from (`origin_x`, `origin_y`)
///
/// Every cell is hidden first; then the observer cell and each cell within
/// `radius` that is not behind an opaque cell is marked visible and seen.
/// Seen flags are never cleared.
pub fn compute_visible(grid: &mut MapGrid, origin_x: i32, origin_y: i32, radius: i32) {
    grid.clear_visible();
    if !grid.in_bounds(origin_x, origin_y) {
        return;
    }
    grid.mark_visible(origin_x, origin_y);

    for octant in 0..8 {
        scan_octant(grid, origin_x, origin_y, radius, octant);
    }
}

/// Map (row, col) in an octant to an offset from the observer
///
/// Octants go clockwise from north-northeast:
///   \7|0/
///   6\|/1
///   --@--
///   5/|\2
///   /4|3\
#[inline]
fn transform(octant: u8, row: i32, col: i32) -> (i32, i32) {
    match octant {
        0 => (col, -row),
        1 => (row, -col),
        2 => (row, col),
        3 => (col, row),
        4 => (-col, row),
        5 => (-row, col),
        6 => (-row, -col),
        _ => (-col, -row),
    }
}

#[inline]
fn distance_sq(dx: i32, dy: i32) -> i64 {
    let (dx, dy) = (i64::from(dx), i64::from(dy));
    dx * dx + dy * dy
}

/// Cells of one row sit at the same distance, so the shadows a row casts
/// only apply from the next row on.
fn scan_octant(grid: &mut MapGrid, origin_x: i32, origin_y: i32, radius: i32, octant: u8) {
    let mut line = ShadowLine::new();
    let mut cast = Vec::new();
    let radius_sq = i64::from(radius) * i64::from(radius);

    for row in 1..=radius {
        // Column 0 leaving the map means the whole row has
        let (dx, dy) = transform(octant, row, 0);
        if !grid.in_bounds(origin_x + dx, origin_y + dy) {
            return;
        }

        for col in 0..=row {
            let (dx, dy) = transform(octant, row, col);
            let (x, y) = (origin_x + dx, origin_y + dy);
            // Later columns only move further out
            if !grid.in_bounds(x, y) || distance_sq(dx, dy) > radius_sq {
                break;
            }

            let projection = Shadow::project(row, col);
            if line.is_in_shadow(&projection) {
                continue;
            }

            grid.mark_visible(x, y);
            if grid.blocks_sight(x, y) {
                cast.push(projection);
            }
        }

        for shadow in cast.drain(..) {
            line.add(shadow);
        }
        if line.is_full_shadow() {
            return;
        }
    }
}
