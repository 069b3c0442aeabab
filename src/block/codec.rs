use crate::block::{
    property::{META_MASK, MAX_COMBINATIONS},
    BlockState,
    PropertyError,
    PropertySet,
    StateBuilder,
};
use log::{debug, trace};

/// Converts between block states and the 4-bit metadata the host persists.
///
/// States are numbered as a mixed-radix integer whose digits are the indices of each property's
/// value within its domain. Encoding accumulates from the last property added to the first, which
/// makes the first property the least significant digit: for properties `[facing (4), lit (2)]`
/// the code is `lit_index * 4 + facing_index`.
#[derive(Clone, Debug)]
pub struct StateCodec {
    properties: PropertySet,
    combinations: usize,
    default_state: BlockState,
}

impl StateCodec {
    /// Finalizes the given properties and builds a codec for them. Fails if the properties have
    /// more combinations than the metadata can hold.
    pub fn new(properties: PropertySet) -> Result<Self, PropertyError> {
        let combinations = properties.finalize()?;
        let default_state = BlockState::first_values(&properties);

        Ok(StateCodec {
            properties,
            combinations,
            default_state,
        })
    }

    /// Computes the metadata for a state. This never fails: a property the state lacks, or a value
    /// outside the property's domain, counts as the first value of the domain.
    pub fn encode(&self, state: &BlockState) -> u8 {
        let mut meta: usize = 0;

        for property in self.properties.iter().rev() {
            let index = match state.get(property.name()) {
                Some(value) => match property.index_of(value) {
                    Some(index) => index,
                    None => {
                        debug!(
                            "Value {} is not in the domain of {} for {}, using {}",
                            value,
                            property.name(),
                            self.properties.owner(),
                            property.values()[0]
                        );
                        0
                    }
                },
                None => {
                    debug!(
                        "State {} of {} has no value for {}",
                        state,
                        self.properties.owner(),
                        property.name()
                    );
                    0
                }
            };

            meta = meta * property.len() + index;
        }

        trace!("{}: {} --> {}", self.properties.owner(), state, meta);
        (meta as u8) & META_MASK
    }

    /// Reconstructs the state stored as the given metadata. Every value in `[0, 15]` decodes to a
    /// valid state; codes past the last combination wrap around within each property's domain.
    /// Bits above the low four are ignored.
    pub fn decode(&self, meta: u8) -> BlockState {
        let mut state = self.default_state.clone();
        let mut remaining = (meta & META_MASK) as usize;

        // Digits come out least significant first, the reverse of the order encode pushes them
        for property in self.properties.iter() {
            let index = remaining % property.len();
            remaining /= property.len();
            state.set(property.name(), property.values()[index].clone());
        }

        trace!("{}: {} --> {}", self.properties.owner(), meta, state);
        state
    }

    /// Whether the given metadata is the encoding of some state. Codes that are not reachable still
    /// decode, but re-encoding the result yields a different code.
    #[inline]
    pub fn is_reachable(&self, meta: u8) -> bool {
        (meta as usize) < self.combinations
    }

    /// Every distinct state in metadata order.
    pub fn states(&self) -> impl Iterator<Item = BlockState> + '_ {
        (0 .. self.combinations).map(move |meta| self.decode(meta as u8))
    }

    /// The number of distinct states, at most 16.
    #[inline]
    pub fn combinations(&self) -> usize {
        self.combinations
    }

    /// The state with the first value of every property.
    #[inline]
    pub fn default_state(&self) -> &BlockState {
        &self.default_state
    }

    #[inline]
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// A validating builder starting from the default state.
    pub fn builder(&self) -> StateBuilder<'_> {
        StateBuilder::new(&self.properties, &self.default_state)
    }

    /// A validating builder starting from the given state.
    pub fn modify(&self, state: &BlockState) -> StateBuilder<'_> {
        StateBuilder::new(&self.properties, state)
    }
}

// The accumulator can never leave the metadata range once the combination count is checked
static_assertions::const_assert!(MAX_COMBINATIONS - 1 <= META_MASK as usize);
