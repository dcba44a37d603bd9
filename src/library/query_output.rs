use std::path::{Path, PathBuf};

use serde::Serialize;

/// Result of one query: the closest images under each ranking, closest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutput {
    query: PathBuf,
    global: Vec<usize>,
    local: Vec<usize>,
}

impl QueryOutput {
    pub fn new(query: PathBuf, global: Vec<usize>, local: Vec<usize>) -> Self {
        Self { query, global, local }
    }

    pub fn query(&self) -> &Path {
        &self.query
    }

    pub fn global(&self) -> &[usize] {
        &self.global
    }

    pub fn local(&self) -> &[usize] {
        &self.local
    }
}
