use std::path::PathBuf;

use crate::library::{DescriptorCfg, ImageSetCfg, SearchCfg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVerbosity {
    Quiet,
    Default,
    Verbose,
}

#[derive(Debug, Clone)]
pub enum QuerySource {
    //prompt for query paths on stdin until the exit token is entered
    Interactive,
    Paths(Vec<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct OutputCfg {
    pub json_output: bool,
    pub verbosity: ReportVerbosity,
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub image_set: ImageSetCfg,
    pub descriptor_cfg: DescriptorCfg,
    pub search_cfg: SearchCfg,
    pub queries: QuerySource,

    pub output_cfg: OutputCfg,
}
