use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for distance coloring.
#[derive(Debug, Error)]
pub enum DistColorError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to colors, color ramps and normalization windows.
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("color spec needs at least 2 stops, got {count}")]
    TooFewStops { count: usize },

    #[error("color stop {index} at distance {current} does not follow {previous}")]
    NonIncreasingStops {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("color stop {index} has non-finite distance {distance}")]
    NonFiniteStop { index: usize, distance: f64 },

    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("channel {channel} = {value} is out of range [0, 1]")]
    ChannelOutOfRange { channel: &'static str, value: f64 },

    #[error("invalid normalization window [{min}, {max}]")]
    InvalidWindow { min: f64, max: f64 },

    #[error("invalid window fractions ({lower}, {upper})")]
    InvalidFraction { lower: f64, upper: f64 },
}

/// Errors related to distance fields and their sample geometry.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("reference set is empty")]
    EmptyReference,

    #[error("shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("pixel size must be finite and positive, got ({x}, {y})")]
    InvalidPixelSize { x: f64, y: f64 },

    #[error("distance at sample {index} is invalid: {value}")]
    InvalidDistance { index: usize, value: f64 },
}

/// Errors related to the scene store.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("object {0:?} is not a mesh")]
    NotAMesh(String),

    #[error("an object named {0:?} already exists")]
    DuplicateName(String),

    #[error("color attribute has {actual} entries, mesh has {expected} vertices")]
    AttributeLength { expected: usize, actual: usize },

    #[error("face index {index} is out of range ({vertex_count} vertices)")]
    FaceIndexOutOfRange { index: usize, vertex_count: usize },

    #[error("mesh has no color attribute {0:?}")]
    AttributeNotFound(String),
}

/// Errors raised at the file boundary.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: {source}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("invalid index pattern {pattern:?}: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },

    #[error("buffer of {actual} bytes does not match a {width}x{height} image")]
    BufferSize {
        width: u32,
        height: u32,
        actual: usize,
    },
}

impl IoError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

/// Errors related to loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config has no [{0}] section")]
    MissingSection(&'static str),
}

/// Convenience type alias for results using [`DistColorError`].
pub type Result<T> = std::result::Result<T, DistColorError>;
