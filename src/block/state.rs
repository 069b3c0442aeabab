use crate::block::{
    property::MAX_PROPERTIES,
    PropertySet,
    PropertyValue,
    StateError,
};
use log::trace;
use std::fmt::{self, Display, Formatter};
use tinyvec::ArrayVec;

/// One complete configuration of a block: a value for each of its type's properties, in property
/// order. States are not tied to a position; many blocks share equal states.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct BlockState {
    properties: ArrayVec<[(String, PropertyValue); MAX_PROPERTIES]>,
}

impl BlockState {
    /// The state assigning each property the first value of its domain.
    pub(crate) fn first_values(properties: &PropertySet) -> Self {
        BlockState {
            properties: properties
                .iter()
                .map(|property| (property.name().to_owned(), property.values()[0].clone()))
                .collect(),
        }
    }

    /// The value of the named property, if this state has that property.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Replaces the value of an existing property without checking it against the property's
    /// domain. Returns `false`, leaving the state untouched, if the state has no such property.
    pub fn set<V: Into<PropertyValue>>(&mut self, name: &str, value: V) -> bool {
        match self.properties.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => {
                trace!("Ignoring unknown property {} on state {}", name, self);
                false
            }
        }
    }

    /// Builder-style version of [`set`](Self::set).
    pub fn with<V: Into<PropertyValue>>(mut self, name: &str, value: V) -> Self {
        self.set(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Display for BlockState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, (name, value)) in self.properties.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str("]")
    }
}

/// Builds a state from a starting state, rejecting properties and values the block type does not
/// declare.
pub struct StateBuilder<'a> {
    properties: &'a PropertySet,
    state: BlockState,
}

impl<'a> StateBuilder<'a> {
    pub fn new(properties: &'a PropertySet, base: &BlockState) -> Self {
        StateBuilder {
            properties,
            state: base.clone(),
        }
    }

    pub fn add_property<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), StateError>
    {
        let property = self
            .properties
            .get(name)
            .ok_or_else(|| StateError::UnknownProperty {
                block: self.properties.owner().clone(),
                property: name.to_owned(),
            })?;

        let value = value.into();
        if !property.contains(&value) {
            return Err(StateError::InvalidValue {
                block: self.properties.owner().clone(),
                property: name.to_owned(),
                value,
            });
        }

        // Base states from elsewhere may lack the property entirely
        if !self.state.set(name, value) {
            return Err(StateError::UnknownProperty {
                block: self.properties.owner().clone(),
                property: name.to_owned(),
            });
        }

        Ok(())
    }

    pub fn with_property<V: Into<PropertyValue>>(
        mut self,
        name: &str,
        value: V,
    ) -> Result<Self, (Self, StateError)>
    {
        match self.add_property(name, value) {
            Ok(()) => Ok(self),
            Err(error) => Err((self, error)),
        }
    }

    pub fn build(self) -> BlockState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Property;
    use modbase_util::UnlocalizedName;

    fn properties() -> PropertySet {
        PropertySet::new(UnlocalizedName::new("test", "torch"))
            .with(Property::named("facing", &["north", "south"]))
            .and_then(|set| set.with(Property::boolean("lit")))
            .unwrap()
    }

    #[test]
    fn first_values_and_display() {
        let state = BlockState::first_values(&properties());
        assert_eq!(state.len(), 2);
        assert_eq!(state.get("facing"), Some(&"north".into()));
        assert_eq!(state.to_string(), "[facing=north,lit=false]");
    }

    #[test]
    fn unchecked_set() {
        let mut state = BlockState::first_values(&properties());
        assert!(state.set("lit", true));
        assert!(!state.set("powered", true));
        assert_eq!(state.get("powered"), None);
        assert_eq!(state.with("facing", 7).get("facing"), Some(&PropertyValue::Int(7)));
    }

    #[test]
    fn builder_validation() {
        let properties = properties();
        let base = BlockState::first_values(&properties);

        let state = StateBuilder::new(&properties, &base)
            .with_property("facing", "south")
            .and_then(|builder| builder.with_property("lit", true))
            .map_err(|(_, error)| error)
            .unwrap()
            .build();
        assert_eq!(state.to_string(), "[facing=south,lit=true]");

        let (builder, error) = StateBuilder::new(&properties, &base)
            .with_property("facing", "up")
            .err()
            .unwrap();
        assert!(matches!(error, StateError::InvalidValue { .. }));
        assert_eq!(builder.build(), base, "Failed change leaked into the state");

        let mut builder = StateBuilder::new(&properties, &base);
        assert!(matches!(
            builder.add_property("powered", true),
            Err(StateError::UnknownProperty { .. })
        ));
    }
}
