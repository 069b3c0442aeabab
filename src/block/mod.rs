mod codec;
#[allow(missing_docs)]
pub mod entity;
#[allow(missing_docs)]
mod error;
#[allow(missing_docs)]
mod model;
pub mod orientation;
#[allow(missing_docs)]
mod property;
#[allow(missing_docs)]
mod state;

pub use codec::StateCodec;
pub use entity::{TileEntity, TileEntityRegistry, TileEntityType};
pub use error::*;
pub use model::*;
pub use orientation::{Orient1Way, Orient4Ways, OrientationHandler};
pub use property::*;
pub use state::*;

use crate::{
    base::config,
    world::{BlockAccess, BlockPosition, PlacementContext},
};
use log::{debug, info};
use modbase_util::{Transform, UnlocalizedName, Vector};
use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

/// A block type: its orientation strategy, the codec for its states, and the tile entity and
/// model it declares. Block types are built once with a [`BlockBuilder`] and are immutable apart
/// from their render settings.
pub struct BaseBlock {
    name: UnlocalizedName,
    orientation: Arc<dyn OrientationHandler>,
    codec: StateCodec,
    tile_entity: Option<TileEntityType>,
    model: Option<ModelSpec>,
    render_type: i32,
    layer: BlockLayer,
}

impl BaseBlock {
    /// Starts defining a block type with the given name.
    pub fn builder(name: UnlocalizedName) -> BlockBuilder {
        BlockBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &UnlocalizedName {
        &self.name
    }

    #[inline]
    pub fn orientation(&self) -> &dyn OrientationHandler {
        &*self.orientation
    }

    #[inline]
    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    #[inline]
    pub fn properties(&self) -> &PropertySet {
        self.codec.properties()
    }

    #[inline]
    pub fn default_state(&self) -> &BlockState {
        self.codec.default_state()
    }

    /// The metadata the host should store for the given state.
    #[inline]
    pub fn meta_from_state(&self, state: &BlockState) -> u8 {
        self.codec.encode(state)
    }

    #[inline]
    pub fn state_from_meta(&self, meta: u8) -> BlockState {
        self.codec.decode(meta)
    }

    /// The state of the block at the given position, if the host has metadata for it.
    pub fn state_at(&self, world: &dyn BlockAccess, position: BlockPosition) -> Option<BlockState> {
        world.metadata(position).map(|meta| self.codec.decode(meta))
    }

    /// Computes the state of a block placed from an item carrying the given metadata.
    pub fn on_block_placed(&self, context: &PlacementContext<'_>, meta: u8) -> BlockState {
        let base_state = self.codec.decode(meta);
        self.orientation.on_block_placed(context, base_state)
    }

    pub fn local_to_global_transformation(
        &self,
        world: &dyn BlockAccess,
        position: BlockPosition,
        state: &BlockState,
        origin: Vector<f64>,
    ) -> Transform {
        self.orientation
            .local_to_global_transformation(world, position, state, origin)
    }

    /// The transform for the block placed at the given position, anchored at the block's center.
    /// A position with no metadata is treated as holding the default state.
    pub fn local_to_global_transformation_at(
        &self,
        world: &dyn BlockAccess,
        position: BlockPosition,
    ) -> Transform {
        let state = self
            .state_at(world, position)
            .unwrap_or_else(|| self.default_state().clone());
        self.local_to_global_transformation(world, position, &state, position.center())
    }

    /// The rotation part of the block's transform, with no translation.
    pub fn local_to_global_rotation(
        &self,
        world: &dyn BlockAccess,
        position: BlockPosition,
        state: &BlockState,
    ) -> Transform {
        self.local_to_global_transformation(world, position, state, Vector::<f64>::zero())
    }

    /// Whether blocks of this type in the given state carry a tile entity. Every state of a type
    /// agrees.
    pub fn has_tile_entity(&self, _meta: u8) -> bool {
        self.tile_entity.is_some()
    }

    #[inline]
    pub fn tile_entity_type(&self) -> Option<&TileEntityType> {
        self.tile_entity.as_ref()
    }

    pub fn create_tile_entity(&self) -> Option<Box<dyn TileEntity>> {
        self.tile_entity.as_ref().map(TileEntityType::create)
    }

    /// Called after a block of this type is added to the world. Returns the new block's tile
    /// entity, already notified that it was added, if this type has one.
    pub fn on_block_added(
        &self,
        world: &dyn BlockAccess,
        position: BlockPosition,
    ) -> Option<Box<dyn TileEntity>>
    {
        let meta = world.metadata(position)?;
        if !self.has_tile_entity(meta) {
            return None;
        }

        let mut tile_entity = self.create_tile_entity()?;
        tile_entity.on_added_to_world();
        debug!("Added {} at {}", tile_entity.type_name(), position);
        Some(tile_entity)
    }

    /// The model used to render the given state. All states share one model.
    pub fn model_spec(&self, _state: &BlockState) -> Option<&ModelSpec> {
        self.model.as_ref()
    }

    pub fn texture_names(&self) -> &[String] {
        self.model
            .as_ref()
            .map(|model| model.textures.as_slice())
            .unwrap_or(&[])
    }

    /// Replaces the model with one anchored at the block's corner.
    pub fn set_model_and_textures<S: Into<String>>(
        &mut self,
        model: &str,
        textures: impl IntoIterator<Item = S>,
    )
    {
        self.model = Some(ModelSpec::new(model, textures));
    }

    #[inline]
    pub fn render_type(&self) -> i32 {
        self.render_type
    }

    #[inline]
    pub fn set_render_type(&mut self, render_type: i32) {
        self.render_type = render_type;
    }

    #[inline]
    pub fn layer(&self) -> BlockLayer {
        self.layer
    }

    #[inline]
    pub fn can_render_in_layer(&self, layer: BlockLayer) -> bool {
        self.layer == layer
    }

    /// The number of item variants of this block. Orientation and other state is chosen on
    /// placement, so there is only ever one.
    #[inline]
    pub fn num_subtypes(&self) -> usize {
        1
    }
}

impl Display for BaseBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.name, f)
    }
}

impl Debug for BaseBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Collects the parts of a block type and validates them into a [`BaseBlock`].
pub struct BlockBuilder {
    name: UnlocalizedName,
    orientation: Arc<dyn OrientationHandler>,
    properties: Vec<Property>,
    tile_entity: Option<TileEntityType>,
    model: Option<ModelSpec>,
    layer: BlockLayer,
}

impl BlockBuilder {
    fn new(name: UnlocalizedName) -> Self {
        BlockBuilder {
            name,
            orientation: Arc::new(Orient1Way),
            properties: Vec::new(),
            tile_entity: None,
            model: None,
            layer: BlockLayer::default(),
        }
    }

    pub fn orientation<H: OrientationHandler + 'static>(self, handler: H) -> Self {
        self.shared_orientation(Arc::new(handler))
    }

    /// Uses an orientation handler shared with other block types.
    pub fn shared_orientation(mut self, handler: Arc<dyn OrientationHandler>) -> Self {
        self.orientation = handler;
        self
    }

    /// Adds a block-specific property. These follow the orientation handler's properties.
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn tile_entity(mut self, tile_entity: TileEntityType) -> Self {
        self.tile_entity = Some(tile_entity);
        self
    }

    pub fn model(mut self, model: ModelSpec) -> Self {
        self.model = Some(model);
        self
    }

    pub fn layer(mut self, layer: BlockLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Builds the block type, registering its tile entity with the global registry.
    pub fn build(self) -> Result<BaseBlock, PropertyError> {
        self.build_with(TileEntityRegistry::global())
    }

    /// Builds the block type, registering its tile entity with the given registry. A tile entity
    /// whose name is already registered is left as it was.
    pub fn build_with(self, registry: &TileEntityRegistry) -> Result<BaseBlock, PropertyError> {
        let mut properties = PropertySet::new(self.name.clone());
        self.orientation.define_properties(&mut properties)?;
        for property in self.properties {
            properties.add(property)?;
        }

        if config().debug_state {
            properties.dump();
        }

        let codec = StateCodec::new(properties)?;

        if let Some(tile_entity) = &self.tile_entity {
            registry.register(tile_entity.clone());
        }

        info!(
            "Defined block {} with {} states",
            self.name,
            codec.combinations()
        );

        Ok(BaseBlock {
            name: self.name,
            orientation: self.orientation,
            codec,
            tile_entity: self.tile_entity,
            model: self.model,
            render_type: -1,
            layer: self.layer,
        })
    }
}
