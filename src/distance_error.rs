//! Error handling for distance queries and their configuration

use std::io;

/// Unified error to report failures while building collision shapes, reading the
/// configuration, or running the distance query.
#[derive(Debug)]
pub enum DistanceError {
    IoError(io::Error),
    ParseError(String),
    MeshLoadError { resource: String, reason: String },
    MeshBuildError { link: String, reason: String },
    NarrowPhaseError { first: String, second: String, reason: String },
    ConfigurationError(String),
}

impl std::fmt::Display for DistanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            DistanceError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            DistanceError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            DistanceError::MeshLoadError { ref resource, ref reason } =>
                write!(f, "Cannot load mesh {}: {}", resource, reason),
            DistanceError::MeshBuildError { ref link, ref reason } =>
                write!(f, "Cannot build collision mesh for {}: {}", link, reason),
            DistanceError::NarrowPhaseError { ref first, ref second, ref reason } =>
                write!(f, "Distance query between {} and {} failed: {}", first, second, reason),
            DistanceError::ConfigurationError(ref msg) =>
                write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for DistanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistanceError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DistanceError {
    fn from(err: io::Error) -> Self {
        DistanceError::IoError(err)
    }
}
