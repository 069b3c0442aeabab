use modbase_util::Vector;
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::RangeInclusive,
};

/// The position of a block in the world.
///
/// Only positions with `x` and `z` in `[-2^25, 2^25)` and `y` in `[-2048, 2047]` fit the host's
/// packed 64-bit encoding; see [`as_u64`](Self::as_u64).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i16,
    pub z: i32,
}

impl BlockPosition {
    const HORIZONTAL_RANGE: RangeInclusive<i32> = -(1 << 25) ..= (1 << 25) - 1;
    const VERTICAL_RANGE: RangeInclusive<i16> = -(1 << 11) ..= (1 << 11) - 1;

    pub const fn new(x: i32, y: i16, z: i32) -> Self {
        BlockPosition { x, y, z }
    }

    /// Unpacks a position from the host's 64-bit encoding (26 bits x, 26 bits z, 12 bits y).
    pub fn from_u64(value: u64) -> Self {
        let x = (value as i64 >> 38) as i32;
        let y = ((value << 52) as i64 >> 52) as i16;
        let z = ((value << 26) as i64 >> 38) as i32;

        BlockPosition { x, y, z }
    }

    /// Packs this position into the host's 64-bit encoding, or returns `None` if a coordinate is
    /// outside the packed range.
    pub fn as_u64(&self) -> Option<u64> {
        if !Self::HORIZONTAL_RANGE.contains(&self.x)
            || !Self::HORIZONTAL_RANGE.contains(&self.z)
            || !Self::VERTICAL_RANGE.contains(&self.y)
        {
            return None;
        }

        Some(
            ((self.x as u64 & 0x3FFFFFF) << 38)
                | ((self.z as u64 & 0x3FFFFFF) << 12)
                | (self.y as u64 & 0xFFF),
        )
    }

    /// The neighboring position on the given side, or `None` past the edge of the coordinate
    /// space.
    pub fn offset(&self, direction: Direction) -> Option<Self> {
        let (dx, dy, dz) = direction.normal();
        Some(BlockPosition {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy as i16)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// The world coordinates of the center of this block.
    pub fn center(&self) -> Vector<f64> {
        Vector::rect(
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }
}

impl Display for BlockPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "x: {}, y: {}, z: {}", self.x, self.y, self.z)
    }
}

impl Debug for BlockPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six faces of a block. Discriminants match the host's side IDs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Direction {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Horizontal directions ordered by horizontal index, a clockwise sweep starting at south.
    pub const HORIZONTALS: [Direction; 4] = [
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];

    /// Returns the direction with the given side ID, if any.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// The unit offset pointing out of this face.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    /// The position of this direction in [`HORIZONTALS`](Self::HORIZONTALS), or `None` for up and
    /// down.
    pub fn horizontal_index(self) -> Option<usize> {
        Self::HORIZONTALS.iter().position(|&dir| dir == self)
    }

    /// Returns the horizontal direction with the given index, wrapping around.
    pub fn from_horizontal_index(index: usize) -> Self {
        Self::HORIZONTALS[index % Self::HORIZONTALS.len()]
    }

    /// The horizontal direction an entity with the given yaw (degrees) is looking toward. A yaw
    /// of zero looks south and yaw increases clockwise when viewed from above.
    pub fn from_yaw(yaw: f32) -> Self {
        let index = (yaw / 90.0 + 0.5).floor() as i64;
        Self::from_horizontal_index(index.rem_euclid(4) as usize)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
