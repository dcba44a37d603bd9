use std::path::PathBuf;

use thiserror::Error;

use crate::library::LibError;

#[derive(Error, Debug)]
pub enum AppError {
    /////////////////////////////////
    // Argument parsing
    #[error("Args file not found at {0}")]
    ArgsFileNotFound(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse args file at given location: {0}: {1}")]
    ArgsFileParse(PathBuf, String),

    #[error("Could not parse --{arg} as a number: {value}")]
    ParseNumber { arg: &'static str, value: String },

    #[error("--{arg} must be between {min} and {max}, got {value}")]
    OutOfRange {
        arg: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /////////////////////////////////
    // Descriptor extraction and ranking
    #[error("Failed to index images")]
    Preprocessing(#[source] LibError),

    #[error("Query failed for {0}")]
    Query(PathBuf, #[source] LibError),

    #[error("{0} queries failed")]
    QueriesFailed(usize),

    /////////////////////////////////
    // Terminal
    #[error("Failed to read or write the terminal")]
    Terminal(#[from] std::io::Error),
}
