//! Shared primitive types for encounter state.

/// Unique identifier for an actor within one encounter.
///
/// Ids are allocated sequentially at spawn time and are never reused, even
/// after the actor dies. That makes "a dead actor is never rescheduled"
/// checkable by id alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Tile position on the encounter map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one tile away in the given direction.
    pub fn step(self, dir: CardinalDirection) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance: adjacency including diagonals counts as 1.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

/// Four-way movement and knockback direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// Tile offset for one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    /// Dominant direction pointing from `from` towards `to`.
    ///
    /// Ties prefer the horizontal axis; returns `None` when the positions
    /// coincide. Used to pick the knockback axis.
    pub fn towards(from: Position, to: Position) -> Option<Self> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        if dx == 0 && dy == 0 {
            return None;
        }

        if dx.abs() >= dy.abs() {
            Some(if dx >= 0 {
                CardinalDirection::East
            } else {
                CardinalDirection::West
            })
        } else {
            Some(if dy >= 0 {
                CardinalDirection::South
            } else {
                CardinalDirection::North
            })
        }
    }
}

/// Faction tag deciding which phase an actor acts in and who counts as an
/// enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    /// Player-controlled side; acts during the Player phase.
    Adventurers,
    /// Hostile side; acts during the Enemy phase.
    Horde,
    /// Acts in neither combat phase (props, critters). Still ticks.
    Neutral,
}

impl Faction {
    /// Whether `other` is a valid attack target for this faction.
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Adventurers, Faction::Horde) | (Faction::Horde, Faction::Adventurers)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn towards_prefers_horizontal_on_ties() {
        let from = Position::new(0, 0);
        assert_eq!(
            CardinalDirection::towards(from, Position::new(3, 3)),
            Some(CardinalDirection::East)
        );
        assert_eq!(
            CardinalDirection::towards(from, Position::new(0, -2)),
            Some(CardinalDirection::North)
        );
        assert_eq!(CardinalDirection::towards(from, from), None);
    }

    #[test]
    fn neutral_is_hostile_to_nobody() {
        assert!(!Faction::Neutral.is_hostile_to(Faction::Horde));
        assert!(!Faction::Horde.is_hostile_to(Faction::Neutral));
        assert!(Faction::Horde.is_hostile_to(Faction::Adventurers));
    }
}
