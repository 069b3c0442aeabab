use crate::{
    block::{BlockState, Property, PropertyError, PropertySet, PropertyValue},
    world::{BlockAccess, BlockPosition, Direction, PlacementContext},
};
use log::debug;
use modbase_util::{Transform, Vector};

/// Pluggable orientation behavior for a block type.
///
/// A handler contributes the properties that describe which way a block faces, picks the oriented
/// state when a block is placed, and turns a state back into the transform from the block's model
/// space to world space. Handlers hold no per-block data; everything they need is in the state.
pub trait OrientationHandler: Send + Sync {
    /// Adds this handler's properties. Called before any block-specific properties are added, so
    /// orientation properties are always the low digits of the metadata.
    fn define_properties(&self, properties: &mut PropertySet) -> Result<(), PropertyError>;

    /// Computes the state of a newly placed block from the placement and the state the placed item
    /// carried.
    fn on_block_placed(&self, context: &PlacementContext<'_>, base_state: BlockState) -> BlockState;

    /// The transform from the block's local model space to world space, with the model anchored at
    /// `origin`.
    fn local_to_global_transformation(
        &self,
        world: &dyn BlockAccess,
        position: BlockPosition,
        state: &BlockState,
        origin: Vector<f64>,
    ) -> Transform;
}

/// Blocks that look the same from every side. Adds no properties and never rotates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orient1Way;

impl OrientationHandler for Orient1Way {
    fn define_properties(&self, _properties: &mut PropertySet) -> Result<(), PropertyError> {
        Ok(())
    }

    fn on_block_placed(
        &self,
        _context: &PlacementContext<'_>,
        base_state: BlockState,
    ) -> BlockState {
        base_state
    }

    fn local_to_global_transformation(
        &self,
        _world: &dyn BlockAccess,
        _position: BlockPosition,
        _state: &BlockState,
        origin: Vector<f64>,
    ) -> Transform {
        Transform::at(origin)
    }
}

/// Blocks that can face any of the four horizontal directions. The model's front is its local +z
/// (south) face, and placed blocks turn their front toward the entity placing them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orient4Ways;

impl Orient4Ways {
    /// The name of the property this handler adds.
    pub const FACING: &'static str = "facing";

    /// Reads the facing of a state, treating a missing or unknown value as south.
    pub fn facing(state: &BlockState) -> Direction {
        state
            .get(Self::FACING)
            .and_then(|value| {
                Direction::HORIZONTALS
                    .iter()
                    .copied()
                    .find(|&dir| PropertyValue::from(dir) == *value)
            })
            .unwrap_or(Direction::South)
    }
}

impl OrientationHandler for Orient4Ways {
    fn define_properties(&self, properties: &mut PropertySet) -> Result<(), PropertyError> {
        properties.add(Property::directions(Self::FACING, &Direction::HORIZONTALS))
    }

    fn on_block_placed(
        &self,
        context: &PlacementContext<'_>,
        base_state: BlockState,
    ) -> BlockState {
        match context.placer {
            Some(placer) => {
                let facing = placer.horizontal_facing().opposite();
                debug!(
                    "Placing at {:?} facing {} (placer yaw {})",
                    context.position, facing, placer.yaw
                );
                base_state.with(Self::FACING, facing)
            }
            None => base_state,
        }
    }

    fn local_to_global_transformation(
        &self,
        _world: &dyn BlockAccess,
        _position: BlockPosition,
        state: &BlockState,
        origin: Vector<f64>,
    ) -> Transform {
        // Horizontal indices run clockwise from above, quarter turns run counterclockwise
        let turns = Self::facing(state).horizontal_index().unwrap_or(0) as i32;
        Transform::at(origin).turned(-turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block::StateCodec,
        world::{EmptyWorld, Placer},
    };
    use modbase_util::UnlocalizedName;
    use uuid::Uuid;

    fn codec(handler: &dyn OrientationHandler) -> StateCodec {
        let mut properties = PropertySet::new(UnlocalizedName::new("test", "oriented"));
        handler.define_properties(&mut properties).unwrap();
        properties.add(Property::boolean("lit")).unwrap();
        StateCodec::new(properties).unwrap()
    }

    #[test]
    fn one_way_is_inert() {
        let codec = codec(&Orient1Way);
        assert_eq!(codec.properties().len(), 1);

        let placer = Placer::new(Uuid::new_v4(), 135.0, 10.0);
        let origin = Vector::rect(1.5, 2.5, 3.5);
        for state in codec.states() {
            for side in Direction::ALL {
                let context = PlacementContext::new(
                    BlockPosition::new(1, 2, 3),
                    side,
                    Vector::rect(0.25, 1.0, 0.0),
                );
                assert_eq!(Orient1Way.on_block_placed(&context, state.clone()), state);
                assert_eq!(
                    Orient1Way.on_block_placed(&context.with_placer(&placer), state.clone()),
                    state
                );
            }

            let transform = Orient1Way.local_to_global_transformation(
                &EmptyWorld,
                BlockPosition::default(),
                &state,
                origin,
            );
            assert_eq!(transform, Transform::at(origin));
        }
    }

    #[test]
    fn four_ways_faces_placer() {
        let codec = codec(&Orient4Ways);
        assert_eq!(codec.combinations(), 8);
        assert_eq!(codec.properties().position(Orient4Ways::FACING), Some(0));

        // Looking north, so the block's front points back south at the placer
        let placer = Placer::new(Uuid::new_v4(), 180.0, 0.0);
        let context = PlacementContext::new(
            BlockPosition::new(0, 64, 0),
            Direction::Up,
            Vector::rect(0.5, 1.0, 0.5),
        )
        .with_placer(&placer);
        let lit = codec.default_state().clone().with("lit", true);
        let placed = Orient4Ways.on_block_placed(&context, lit);
        assert_eq!(Orient4Ways::facing(&placed), Direction::South);
        assert_eq!(placed.get("lit"), Some(&PropertyValue::Bool(true)));

        let placer = Placer::new(Uuid::new_v4(), 90.0, 0.0);
        let placed = Orient4Ways
            .on_block_placed(&context.with_placer(&placer), codec.default_state().clone());
        assert_eq!(Orient4Ways::facing(&placed), Direction::East);
        assert_eq!(codec.decode(codec.encode(&placed)), placed);

        let unplaced = PlacementContext::new(
            BlockPosition::default(),
            Direction::North,
            Vector::<f32>::zero(),
        );
        assert_eq!(
            Orient4Ways.on_block_placed(&unplaced, codec.default_state().clone()),
            *codec.default_state()
        );
    }

    #[test]
    fn four_ways_transform() {
        let mut properties = PropertySet::new(UnlocalizedName::new("test", "turntable"));
        Orient4Ways.define_properties(&mut properties).unwrap();
        let codec = StateCodec::new(properties).unwrap();
        let origin = Vector::rect(0.5, 64.5, 0.5);

        for dir in Direction::HORIZONTALS {
            let state = codec.default_state().clone().with(Orient4Ways::FACING, dir);
            let transform = Orient4Ways.local_to_global_transformation(
                &EmptyWorld,
                BlockPosition::default(),
                &state,
                origin,
            );
            let (x, y, z) = dir.normal();
            let front = transform.rotate(Vector::rect(0.0, 0.0, 1.0));

            assert!(
                (front - Vector::rect(x as f64, y as f64, z as f64)).len_sq() < 1e-12,
                "Front of a block facing {} points along {}",
                dir,
                front
            );
            assert_eq!(transform.offset(), origin);
        }

        let south = codec.default_state();
        assert_eq!(
            Orient4Ways.local_to_global_transformation(
                &EmptyWorld,
                BlockPosition::default(),
                south,
                origin
            ),
            Transform::at(origin)
        );
    }
}
