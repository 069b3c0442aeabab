#![deny(rust_2018_idioms)]
#![warn(missing_docs)]

//! Block definitions for mods on a host that stores four bits of metadata per block. A block type
//! declares up to four properties, and this crate packs every combination of their values into
//! that metadata and back. Orientation is supplied by a pluggable handler that contributes its own
//! properties and turns block states into model transforms.

// Expose sub-crates
pub use modbase_util as util;

mod base;
/// Contains block types, their properties and states, and the metadata codec.
pub mod block;
/// Contains block positions, directions, and the host world interface.
#[allow(missing_docs)]
pub mod world;

pub use base::*;
