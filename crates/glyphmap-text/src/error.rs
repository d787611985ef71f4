use glyphmap_glyph::GlyphError;

/// Errors that can occur while measuring text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextError {
    /// The font cannot be used for measurement.
    #[error("invalid font: {reason}")]
    InvalidFont { reason: String },

    /// The measurement backend has no font faces loaded at all.
    #[error("no font faces are loaded")]
    NoFontFaces,

    #[error(transparent)]
    Glyph(#[from] GlyphError),
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;

/// Errors that can occur while resolving a glyph texture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextureError {
    /// Textures are only built for stacks of at least one glyph.
    #[error("cannot build a texture for an empty glyph stack")]
    EmptyStack,

    /// The bitmap store did not return a texture it reported or just created.
    #[error("bitmap store has no texture for key {key:?}")]
    MissingBitmap { key: String },

    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Glyph(#[from] GlyphError),
}

/// Result type for texture operations.
pub type TextureResult<T> = Result<T, TextureError>;
