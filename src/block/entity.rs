use log::debug;
use modbase_util::UnlocalizedName;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    fmt::{self, Debug, Formatter},
};

static GLOBAL_TILE_ENTITY_REGISTRY: Lazy<TileEntityRegistry> = Lazy::new(TileEntityRegistry::new);

/// Data attached to a single block position, such as an inventory or a machine's progress.
pub trait TileEntity: Send {
    /// The registered name of this tile entity's type.
    fn type_name(&self) -> &UnlocalizedName;

    /// Called once after the owning block has been added to the world.
    fn on_added_to_world(&mut self) {}
}

/// A registrable kind of tile entity: its name and how to make a fresh instance.
#[derive(Clone)]
pub struct TileEntityType {
    name: UnlocalizedName,
    constructor: fn() -> Box<dyn TileEntity>,
}

impl TileEntityType {
    pub fn new(name: UnlocalizedName, constructor: fn() -> Box<dyn TileEntity>) -> Self {
        TileEntityType { name, constructor }
    }

    /// A type whose instances start from `T::default()`.
    pub fn of<T: TileEntity + Default + 'static>(name: UnlocalizedName) -> Self {
        fn construct<T: TileEntity + Default + 'static>() -> Box<dyn TileEntity> {
            Box::new(T::default())
        }

        Self::new(name, construct::<T>)
    }

    #[inline]
    pub fn name(&self) -> &UnlocalizedName {
        &self.name
    }

    pub fn create(&self) -> Box<dyn TileEntity> {
        (self.constructor)()
    }
}

impl Debug for TileEntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "TileEntityType({})", self.name)
    }
}

/// Maps tile-entity names to their types. Registering a name twice keeps the first registration.
pub struct TileEntityRegistry {
    types: RwLock<HashMap<UnlocalizedName, TileEntityType>>,
}

impl TileEntityRegistry {
    pub fn new() -> Self {
        TileEntityRegistry {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL_TILE_ENTITY_REGISTRY
    }

    /// Registers the given type, returning `false` and changing nothing if its name is taken.
    pub fn register(&self, tile_entity: TileEntityType) -> bool {
        let mut types = self.types.write();
        if types.contains_key(tile_entity.name()) {
            debug!("Ignoring redundant registration of tile entity {}", tile_entity.name());
            return false;
        }

        debug!("Registered tile entity {}", tile_entity.name());
        types.insert(tile_entity.name().clone(), tile_entity);
        true
    }

    pub fn get(&self, name: &UnlocalizedName) -> Option<TileEntityType> {
        self.types.read().get(name).cloned()
    }

    /// Creates a fresh instance of the named type.
    pub fn create(&self, name: &UnlocalizedName) -> Option<Box<dyn TileEntity>> {
        self.types.read().get(name).map(TileEntityType::create)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl Default for TileEntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
