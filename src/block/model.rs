use modbase_util::Vector;

/// Which model a block renders with and the textures bound to it. Only stored and handed to the
/// renderer, never interpreted here.
#[derive(Clone, PartialEq, Debug)]
pub struct ModelSpec {
    pub model: String,
    /// Where the model's local origin sits within the block, relative to the block's corner.
    pub origin: Vector<f64>,
    pub textures: Vec<String>,
}

impl ModelSpec {
    /// A model anchored at the block's corner.
    pub fn new<S: Into<String>>(model: &str, textures: impl IntoIterator<Item = S>) -> Self {
        Self::with_origin(model, Vector::<f64>::zero(), textures)
    }

    pub fn with_origin<S: Into<String>>(
        model: &str,
        origin: Vector<f64>,
        textures: impl IntoIterator<Item = S>,
    ) -> Self
    {
        ModelSpec {
            model: model.to_owned(),
            origin,
            textures: textures.into_iter().map(Into::into).collect(),
        }
    }
}

/// The render pass a block draws in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockLayer {
    Solid,
    CutoutMipped,
    Cutout,
    Translucent,
}

impl Default for BlockLayer {
    fn default() -> Self {
        BlockLayer::Solid
    }
}
