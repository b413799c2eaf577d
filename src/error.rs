//! Error types for the matrix editor and its rendering layer

use thiserror::Error;

use crate::gfx::scene::MeshId;

/// Why a single grid entry could not be turned into a matrix element
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("field {index} (row {row}, column {col}) is not a number: {text:?}")]
    Unparseable {
        index: usize,
        row: usize,
        col: usize,
        text: String,
    },

    #[error("field {index} (row {row}, column {col}) is not finite: {text:?}")]
    NonFinite {
        index: usize,
        row: usize,
        col: usize,
        text: String,
    },
}

impl FieldError {
    /// Row-major index of the offending field
    pub fn index(&self) -> usize {
        match self {
            FieldError::Unparseable { index, .. } | FieldError::NonFinite { index, .. } => *index,
        }
    }
}

/// Errors raised by scene membership operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("mesh {0} is not part of the scene")]
    UnknownMesh(MeshId),

    #[error("material {0:?} is not registered")]
    UnknownMaterial(String),
}

/// Errors returned from applying the edited matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("invalid input: {0}")]
    InvalidField(#[from] FieldError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

impl EditorError {
    /// Index of the field to highlight, if the failure came from user input
    pub fn field_index(&self) -> Option<usize> {
        match self {
            EditorError::InvalidField(err) => Some(err.index()),
            EditorError::Scene(_) => None,
        }
    }
}

/// Errors raised while building render pipelines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("shader {0:?} has not been loaded")]
    MissingShader(String),

    #[error("pipeline {0:?} is not registered")]
    UnknownPipeline(String),
}
