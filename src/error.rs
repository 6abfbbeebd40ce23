//! Volumetric line error types

use thiserror::Error;

/// Errors raised while building a volumetric line.
///
/// The runtime API never fails: missing materials or meshes turn the
/// corresponding side effect into a no-op. Errors only come out of
/// construction-time validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("Template material is missing uniform: {0}")]
    MissingUniform(String),
    #[error("Invalid line configuration: {0}")]
    InvalidConfig(String),
}

pub type LineResult<T> = Result<T, LineError>;
