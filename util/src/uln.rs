use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

/// A two-part identifier composed of a namespace and identifier separated by a colon, used to
/// name block types and tile-entity types.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UnlocalizedName {
    /// The namespace of this name, usually the mod ID.
    pub namespace: String,
    /// The identifier portion of this name.
    pub identifier: String,
}

impl UnlocalizedName {
    /// The namespace assumed when a name is parsed without one.
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Creates a name from its two parts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use modbase_util::UnlocalizedName;
    /// let base = UnlocalizedName::new("sgcraft", "stargate_base");
    ///
    /// assert_eq!(base.namespace, "sgcraft");
    /// assert_eq!(base.identifier, "stargate_base");
    /// ```
    pub fn new(namespace: &str, identifier: &str) -> Self {
        UnlocalizedName {
            namespace: namespace.to_owned(),
            identifier: identifier.to_owned(),
        }
    }

    /// Returns a name in the default namespace with the given identifier.
    #[inline]
    pub fn minecraft(identifier: &str) -> Self {
        Self::new(Self::DEFAULT_NAMESPACE, identifier)
    }
}

impl FromStr for UnlocalizedName {
    type Err = &'static str;

    /// Parses a string in the form `namespace:identifier`. A string without a colon is taken as
    /// an identifier in the default namespace. Empty parts or more than one colon are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, identifier) = match s.split_once(':') {
            Some(parts) => parts,
            None => return Ok(Self::minecraft(s)),
        };

        if namespace.is_empty() || identifier.is_empty() {
            Err("Expected two strings separated by a colon.")
        } else if identifier.contains(':') {
            Err("Expected exactly one colon.")
        } else {
            Ok(Self::new(namespace, identifier))
        }
    }
}

impl Display for UnlocalizedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.identifier)
    }
}

impl Debug for UnlocalizedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
