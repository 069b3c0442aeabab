use crate::{block::PropertyError, world::Direction};
use log::debug;
use modbase_util::UnlocalizedName;
use static_assertions::const_assert_eq;
use std::{
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
};
use tinyvec::ArrayVec;

/// The number of bits the host stores per block for its state.
pub const META_BITS: u32 = 4;
/// Mask selecting the metadata bits of a code.
pub const META_MASK: u8 = (1 << META_BITS) - 1;
/// The maximum number of distinct states a block type may have.
pub const MAX_COMBINATIONS: usize = 1 << META_BITS;
/// The maximum number of properties a block type may declare.
pub const MAX_PROPERTIES: usize = 4;

// Four binary properties must exactly fill the metadata
const_assert_eq!(1 << MAX_PROPERTIES, MAX_COMBINATIONS);

/// A single value a property can take. Values are compared by equality only.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Name(String),
}

impl Default for PropertyValue {
    fn default() -> Self {
        PropertyValue::Bool(false)
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => Display::fmt(value, f),
            PropertyValue::Int(value) => Display::fmt(value, f),
            PropertyValue::Name(value) => f.write_str(value),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Name(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Name(value)
    }
}

impl From<Direction> for PropertyValue {
    fn from(value: Direction) -> Self {
        PropertyValue::Name(value.name().to_owned())
    }
}

/// A named axis of a block's configuration with an ordered domain of allowed values. The order of
/// the domain determines how values are numbered in metadata.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Property {
    name: String,
    values: Vec<PropertyValue>,
}

impl Property {
    pub fn new<I, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropertyValue>,
    {
        Property {
            name: name.to_owned(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A property with the domain `[false, true]`.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, [false, true])
    }

    /// A property over every integer in the range, ascending.
    pub fn int_range(name: &str, range: RangeInclusive<i32>) -> Self {
        Self::new(name, range)
    }

    pub fn named(name: &str, values: &[&str]) -> Self {
        Self::new(name, values.iter().copied())
    }

    /// A property whose values are the names of the given directions, in the given order.
    pub fn directions(name: &str, directions: &[Direction]) -> Self {
        Self::new(name, directions.iter().copied())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    /// The size of this property's domain.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The position of the given value in this property's domain.
    pub fn index_of(&self, value: &PropertyValue) -> Option<usize> {
        self.values.iter().position(|candidate| candidate == value)
    }

    pub fn contains(&self, value: &PropertyValue) -> bool {
        self.index_of(value).is_some()
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            Display::fmt(value, f)?;
        }
        f.write_str("}")
    }
}

/// The ordered properties of one block type. Properties are numbered in the order they are
/// added, and that order fixes the layout of the metadata code.
#[derive(Clone, Debug)]
pub struct PropertySet {
    owner: UnlocalizedName,
    properties: ArrayVec<[Property; MAX_PROPERTIES]>,
}

impl PropertySet {
    /// Creates an empty property set for the named block type.
    pub fn new(owner: UnlocalizedName) -> Self {
        PropertySet {
            owner,
            properties: ArrayVec::new(),
        }
    }

    /// Appends a property, failing if the set is already full, if the property has no values, or
    /// if a property of the same name is already present.
    pub fn add(&mut self, property: Property) -> Result<(), PropertyError> {
        debug!("Adding property {} to {}", property, self.owner);

        if self.properties.len() >= MAX_PROPERTIES {
            return Err(PropertyError::TooManyProperties {
                block: self.owner.clone(),
                property: property.name,
            });
        }

        if property.is_empty() {
            return Err(PropertyError::EmptyDomain {
                block: self.owner.clone(),
                property: property.name,
            });
        }

        if self.get(property.name()).is_some() {
            return Err(PropertyError::DuplicateProperty {
                block: self.owner.clone(),
                property: property.name,
            });
        }

        self.properties.push(property);
        debug!("{} now has {} properties", self.owner, self.properties.len());
        Ok(())
    }

    /// Builder-style version of [`add`](Self::add).
    pub fn with(mut self, property: Property) -> Result<Self, PropertyError> {
        self.add(property)?;
        Ok(self)
    }

    /// The product of all domain sizes.
    pub fn combinations(&self) -> usize {
        self.properties
            .iter()
            .fold(1usize, |product, property| product.saturating_mul(property.len()))
    }

    /// Checks that every combination of values fits in the metadata, returning the combination
    /// count.
    pub fn finalize(&self) -> Result<usize, PropertyError> {
        let combinations = self.combinations();
        if combinations > MAX_COMBINATIONS {
            return Err(PropertyError::TooManyCombinations {
                block: self.owner.clone(),
                combinations,
            });
        }

        Ok(combinations)
    }

    /// Logs every property and its numbered values at debug level.
    pub fn dump(&self) {
        debug!("Properties of {}:", self.owner);
        for (index, property) in self.properties.iter().enumerate() {
            debug!("{}: {}", index, property.name());
            for (value_index, value) in property.values().iter().enumerate() {
                debug!("   {}: {}", value_index, value);
            }
        }
    }

    /// The block type these properties belong to.
    #[inline]
    pub fn owner(&self) -> &UnlocalizedName {
        &self.owner
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Property> + ExactSizeIterator {
        self.properties.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name() == name)
    }

    /// The order in which the named property was added.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.properties
            .iter()
            .position(|property| property.name() == name)
    }
}
