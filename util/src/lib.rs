#![warn(missing_docs)]

//! Provides generic utilities for modbase: geometry, namespaced names, and logging setup.

/// Configures log4rs with a colored console and rolling, compressed log files.
pub mod logging;
/// Rigid block transforms built from quarter turns and translations.
pub mod transform;
mod uln;
/// A generic three dimensional vector.
pub mod vector;

pub use transform::Transform;
pub use uln::UnlocalizedName;
pub use vector::Vector;
