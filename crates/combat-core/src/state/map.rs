//! Encounter map topology.
//!
//! The kernel does not generate maps; dungeon generation supplies one as
//! input. All the resolution pipeline needs is a rectangular grid with
//! blocked tiles, queried for movement and knockback collision.

use super::common::Position;

/// Rectangular tile map with per-tile blocking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    width: u32,
    height: u32,
    /// Row-major blocked flags, `width * height` entries.
    blocked: Vec<bool>,
}

impl TileMap {
    /// Creates an open map with no blocked tiles.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x as u32 >= self.width || pos.y as u32 >= self.height {
            return None;
        }
        Some((pos.y as u32 * self.width + pos.x as u32) as usize)
    }

    /// Marks a tile as blocked (wall, pillar, rubble).
    pub fn block(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.blocked[i] = true;
        }
    }

    /// True when the position lies inside the map bounds.
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// True when the tile cannot be entered. Out-of-bounds counts as
    /// blocked so edge tiles behave like walls.
    pub fn is_blocked(&self, pos: Position) -> bool {
        match self.index(pos) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }
}
