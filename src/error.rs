//! Error types for loading animation sequences

/// Errors raised while parsing or validating a sequence description
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SequenceError {
    /// The YAML document could not be parsed
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A curve channel was declared without knots
    #[error("Channel '{channel}' has no knots")]
    EmptyChannel { channel: String },

    /// The timeline must span at least one frame
    #[error("Sequence must have at least one frame per loop")]
    NoFrames,

    /// Projection divides by the viewer distance
    #[error("Viewer distance (viewer.z) must be non-zero")]
    ZeroViewerDistance,

    /// Per-vertex normals must line up with vertices
    #[error("Expected {vertices} normals to match vertices, got {normals}")]
    NormalCountMismatch { vertices: usize, normals: usize },

    /// Lookup of a channel by name failed
    #[error("Unknown channel: {name}")]
    UnknownChannel { name: String },
}
