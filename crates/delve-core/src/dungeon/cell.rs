//! Map cell types

use strum::{Display, EnumIter};

use crate::consts::{S_DOOR, S_FLOOR, S_VOID, S_WALL};

/// Cell/terrain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum CellType {
    /// Never written by any room or corridor
    #[default]
    Void = 0,
    Wall = 1,
    Floor = 2,
    /// Corridor cell where a corridor passes through a room wall
    Door = 3,
}

impl CellType {
    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(self, CellType::Floor | CellType::Door)
    }

    /// Check if this cell blocks line of sight
    pub const fn blocks_sight(&self) -> bool {
        matches!(self, CellType::Void | CellType::Wall)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Void => S_VOID,
            CellType::Wall => S_WALL,
            CellType::Floor => S_FLOOR,
            CellType::Door => S_DOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_passable_and_sight_are_complementary() {
        for typ in CellType::iter() {
            assert_ne!(typ.is_passable(), typ.blocks_sight(), "{typ}");
        }
    }

    #[test]
    fn test_symbols_are_distinct() {
        let symbols: Vec<char> = CellType::iter().map(|t| t.symbol()).collect();
        for (i, a) in symbols.iter().enumerate() {
            for b in &symbols[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_default_is_void() {
        assert_eq!(CellType::default(), CellType::Void);
        assert_eq!(CellType::Door.to_string(), "Door");
    }
}
