//! Compass directions and cell edges
//!
//! `Direction` orients tokens. `Edge` names the side of a cell a beam
//! segment enters or leaves through, or `Stop` when the beam ends in the
//! cell.

use serde::{Deserialize, Serialize};

/// Token orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Next direction clockwise
    pub fn cw(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Next direction counter-clockwise
    pub fn ccw(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    /// True for North/South
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// 2-bit code used by the puzzle file
    pub fn bits(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    /// The cell edge facing this direction
    pub fn edge(self) -> Edge {
        match self {
            Direction::North => Edge::North,
            Direction::East => Edge::East,
            Direction::South => Edge::South,
            Direction::West => Edge::West,
        }
    }
}

/// Edge of a cell a beam crosses, or `Stop` when the beam ends there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    East,
    South,
    West,
    Stop,
}

impl Edge {
    /// The edge on the far side of the cell. `Stop` has no opposite.
    pub fn across(self) -> Self {
        match self {
            Edge::North => Edge::South,
            Edge::East => Edge::West,
            Edge::South => Edge::North,
            Edge::West => Edge::East,
            Edge::Stop => Edge::Stop,
        }
    }

    /// Diagonal reflection for a mirror oriented `dir`.
    ///
    /// North/South mirrors pair North<->East and South<->West.
    /// East/West mirrors pair North<->West and South<->East.
    pub fn reflect(self, dir: Direction) -> Self {
        match (dir.is_vertical(), self) {
            (_, Edge::Stop) => Edge::Stop,
            (true, Edge::North) => Edge::East,
            (true, Edge::East) => Edge::North,
            (true, Edge::South) => Edge::West,
            (true, Edge::West) => Edge::South,
            (false, Edge::North) => Edge::West,
            (false, Edge::West) => Edge::North,
            (false, Edge::South) => Edge::East,
            (false, Edge::East) => Edge::South,
        }
    }

    /// True for North/South edges
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::North | Edge::South)
    }

    /// Step one cell across this edge. `None` when the step leaves the grid
    /// or the edge is `Stop`.
    pub fn step(self, row: usize, col: usize) -> Option<(usize, usize)> {
        use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
        match self {
            Edge::North if row > 0 => Some((row - 1, col)),
            Edge::East if col + 1 < GRID_WIDTH => Some((row, col + 1)),
            Edge::South if row + 1 < GRID_HEIGHT => Some((row + 1, col)),
            Edge::West if col > 0 => Some((row, col - 1)),
            _ => None,
        }
    }
}

impl From<Direction> for Edge {
    fn from(dir: Direction) -> Self {
        dir.edge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycles() {
        for dir in Direction::ALL {
            assert_eq!(dir.cw().ccw(), dir);
            assert_eq!(dir.cw().cw().cw().cw(), dir);
        }
        assert_eq!(Direction::West.cw(), Direction::North);
        assert_eq!(Direction::North.ccw(), Direction::West);
    }

    #[test]
    fn test_across() {
        assert_eq!(Edge::North.across(), Edge::South);
        assert_eq!(Edge::East.across(), Edge::West);
        assert_eq!(Edge::Stop.across(), Edge::Stop);
    }

    #[test]
    fn test_reflect_north_south_mirror() {
        let d = Direction::North;
        assert_eq!(Edge::North.reflect(d), Edge::East);
        assert_eq!(Edge::East.reflect(d), Edge::North);
        assert_eq!(Edge::South.reflect(d), Edge::West);
        assert_eq!(Edge::West.reflect(d), Edge::South);
        assert_eq!(Edge::West.reflect(Direction::South), Edge::South);
    }

    #[test]
    fn test_reflect_east_west_mirror() {
        let d = Direction::West;
        assert_eq!(Edge::North.reflect(d), Edge::West);
        assert_eq!(Edge::West.reflect(d), Edge::North);
        assert_eq!(Edge::South.reflect(d), Edge::East);
        assert_eq!(Edge::East.reflect(d), Edge::South);
        assert_eq!(Edge::Stop.reflect(Direction::East), Edge::Stop);
    }

    #[test]
    fn test_reflect_is_involution() {
        for dir in Direction::ALL {
            for edge in [Edge::North, Edge::East, Edge::South, Edge::West] {
                assert_eq!(edge.reflect(dir).reflect(dir), edge);
            }
        }
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(Edge::North.step(0, 2), None);
        assert_eq!(Edge::North.step(1, 2), Some((0, 2)));
        assert_eq!(Edge::East.step(3, 4), None);
        assert_eq!(Edge::South.step(4, 0), None);
        assert_eq!(Edge::West.step(2, 0), None);
        assert_eq!(Edge::Stop.step(2, 2), None);
    }

    #[test]
    fn test_bits_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_bits(dir.bits()), dir);
        }
    }
}
