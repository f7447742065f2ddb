//! Error types for the viewer.

use thiserror::Error;

/// Failure while turning a geometry source into a mesh buffer.
///
/// Import errors are fatal: there is no partial mesh to fall back to.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read OBJ file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse OBJ: {0}")]
    Obj(#[from] obj::ObjError),

    #[error("OBJ references position {0}, beyond the 32-bit index range")]
    TooManyPositions(usize),

    #[error("geometry source contains no shapes")]
    NoShapes,

    #[error("raw position array has {0} floats, expected a multiple of 3")]
    MalformedPositions(usize),

    #[error("shape '{shape}' has {len} indices, expected a triangle list")]
    NotTriangulated { shape: String, len: usize },

    #[error("shape '{shape}' references position {index}, but only {position_count} exist")]
    IndexOutOfRange {
        shape: String,
        index: u32,
        position_count: usize,
    },
}

/// Failure while reading the TOML configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure while loading a texture image.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to load texture: {0}")]
    Image(#[from] image::ImageError),

    #[error("texture has zero size")]
    Empty,
}
