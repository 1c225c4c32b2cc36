//! Exploration session
//!
//! Owns a generated [`Dungeon`] and an observer. Moves are cardinal and only
//! land on cells the navigation graph knows; every successful move
//! recomputes visibility.

use log::trace;
use strum::{Display, EnumIter};

use crate::dungeon::Dungeon;

/// Cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Direction for a movement key: vi keys (`hjkl`) or `wasd`
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'k' | 'w' => Some(Direction::North),
            'l' | 'd' => Some(Direction::East),
            'j' | 's' => Some(Direction::South),
            'h' | 'a' => Some(Direction::West),
            _ => None,
        }
    }

    pub const fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Result of a movement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Observer moved and visibility was recomputed
    Moved,
    /// Target cell is not navigable; nothing changed
    Blocked,
}

/// A dungeon being explored by one observer
#[derive(Debug, Clone)]
pub struct Session {
    dungeon: Dungeon,
    x: i32,
    y: i32,
    sight_range: i32,
    moves: u32,
}

impl Session {
    /// Place the observer at the start position and look around
    pub fn new(dungeon: Dungeon, sight_range: i32) -> Self {
        let (x, y) = dungeon.start_position();
        let mut session = Self {
            dungeon,
            x,
            y,
            sight_range,
            moves: 0,
        };
        session.recompute_visibility();
        session
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// Hand back the dungeon, keeping its exploration state
    pub fn into_dungeon(self) -> Dungeon {
        self.dungeon
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn sight_range(&self) -> i32 {
        self.sight_range
    }

    /// Number of successful moves
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Step one cell if the target is navigable
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        let (dx, dy) = direction.delta();
        let (nx, ny) = (self.x + dx, self.y + dy);
        if !self.dungeon.has_location(nx, ny) {
            trace!("blocked moving {direction} from ({}, {})", self.x, self.y);
            return MoveOutcome::Blocked;
        }

        self.x = nx;
        self.y = ny;
        self.moves += 1;
        self.recompute_visibility();
        MoveOutcome::Moved
    }

    /// Recompute what the observer sees from its current cell
    pub fn recompute_visibility(&mut self) {
        let (x, y, radius) = (self.x, self.y, self.sight_range);
        self.dungeon.recompute_visibility(x, y, radius);
    }
}
