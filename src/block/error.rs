use crate::block::property::{MAX_COMBINATIONS, MAX_PROPERTIES};
use crate::block::PropertyValue;
use modbase_util::UnlocalizedName;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A mistake in a block type's property definitions. These are programming errors and should
/// abort registration of the offending block type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// A fifth property was added to a block type.
    TooManyProperties {
        block: UnlocalizedName,
        property: String,
    },
    /// The property domains multiply out to more states than the metadata can hold.
    TooManyCombinations {
        block: UnlocalizedName,
        combinations: usize,
    },
    /// A property was declared with no allowed values.
    EmptyDomain {
        block: UnlocalizedName,
        property: String,
    },
    /// Two properties of one block type share a name.
    DuplicateProperty {
        block: UnlocalizedName,
        property: String,
    },
}

impl PropertyError {
    /// Returns whether this error is a violation of the metadata capacity, either in property
    /// count or in combination count.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            PropertyError::TooManyProperties { .. } | PropertyError::TooManyCombinations { .. }
        )
    }

    /// The block type whose definition failed.
    pub fn block(&self) -> &UnlocalizedName {
        match self {
            PropertyError::TooManyProperties { block, .. }
            | PropertyError::TooManyCombinations { block, .. }
            | PropertyError::EmptyDomain { block, .. }
            | PropertyError::DuplicateProperty { block, .. } => block,
        }
    }
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::TooManyProperties { block, property } => write!(
                f,
                "Block {} has too many properties: cannot add {} ({} allowed)",
                block, property, MAX_PROPERTIES
            ),
            PropertyError::TooManyCombinations {
                block,
                combinations,
            } => write!(
                f,
                "Block {} has {} combinations of property values ({} allowed)",
                block, combinations, MAX_COMBINATIONS
            ),
            PropertyError::EmptyDomain { block, property } =>
                write!(f, "Property {} of block {} has no values", property, block),
            PropertyError::DuplicateProperty { block, property } =>
                write!(f, "Block {} declares property {} twice", block, property),
        }
    }
}

impl Error for PropertyError {}

/// An invalid change to a block state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    UnknownProperty {
        block: UnlocalizedName,
        property: String,
    },
    InvalidValue {
        block: UnlocalizedName,
        property: String,
        value: PropertyValue,
    },
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UnknownProperty { block, property } =>
                write!(f, "Invalid property for {}: {}", block, property),
            StateError::InvalidValue {
                block,
                property,
                value,
            } => write!(
                f,
                "Invalid property value for {} in {}: {}",
                property, block, value
            ),
        }
    }
}

impl Error for StateError {}
