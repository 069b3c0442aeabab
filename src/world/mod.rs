mod location;

pub use location::*;

use modbase_util::Vector;
use std::collections::HashMap;
use uuid::Uuid;

/// Read access to the host's per-position block metadata. The host owns the storage; this crate
/// only reads the 4-bit metadata value of a position.
pub trait BlockAccess {
    /// The metadata stored at the given position, or `None` if the host has nothing there.
    fn metadata(&self, position: BlockPosition) -> Option<u8>;
}

impl BlockAccess for HashMap<BlockPosition, u8> {
    fn metadata(&self, position: BlockPosition) -> Option<u8> {
        self.get(&position).copied()
    }
}

/// A world with no blocks in it, useful when a transform is needed for a state that is not placed.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyWorld;

impl BlockAccess for EmptyWorld {
    fn metadata(&self, _position: BlockPosition) -> Option<u8> {
        None
    }
}

/// The entity placing a block.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Placer {
    pub uuid: Uuid,
    /// Rotation about the vertical axis in degrees, zero facing south.
    pub yaw: f32,
    /// Degrees below the horizon.
    pub pitch: f32,
}

impl Placer {
    pub fn new(uuid: Uuid, yaw: f32, pitch: f32) -> Self {
        Placer { uuid, yaw, pitch }
    }

    /// The horizontal direction this entity is looking toward.
    #[inline]
    pub fn horizontal_facing(&self) -> Direction {
        Direction::from_yaw(self.yaw)
    }
}

/// Everything known about a block placement at the moment the host asks for the new state.
#[derive(Clone, Copy, Debug)]
pub struct PlacementContext<'a> {
    pub position: BlockPosition,
    /// The face of the neighboring block that was clicked.
    pub side: Direction,
    /// Where on that face the click landed, each component in `[0, 1]`.
    pub hit: Vector<f32>,
    pub placer: Option<&'a Placer>,
}

impl<'a> PlacementContext<'a> {
    pub fn new(position: BlockPosition, side: Direction, hit: Vector<f32>) -> Self {
        PlacementContext {
            position,
            side,
            hit,
            placer: None,
        }
    }

    pub fn with_placer(mut self, placer: &'a Placer) -> Self {
        self.placer = Some(placer);
        self
    }
}
