use std::{fmt::Debug, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LibError {
    #[error("Invalid construction parameter: {0}")]
    ConstructionError(String),

    #[error("Cannot return {k} closest images: only {available} candidates are available")]
    InsufficientCandidates { k: usize, available: usize },

    #[error("Error extracting descriptors: {0}")]
    ExtractionError(#[from] ExtractionError),
}

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ExtractionError {
    #[error("Image cannot be loaded - {path}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("Invalid extraction parameter: {0}")]
    InvalidParameter(String),
}
