//! Error types for the planning demo

use thiserror::Error;

/// Demo error type
#[derive(Error, Debug)]
pub enum DemoError {
    /// Filesystem failure while reading config or writing outputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config or interchange document failed to (de)serialize
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Bounds with non-finite or inverted limits
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Configuration values out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Setup used before it was fully configured
    #[error("Setup error: {0}")]
    Setup(String),

    /// Interchange graph references missing vertices
    #[error("Malformed planner graph: {0}")]
    Graph(String),

    /// PNG encoding failure
    #[cfg(feature = "graph-analysis")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DemoError>;
