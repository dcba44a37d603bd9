// Global descriptor definitions
pub const HIST_CHANNELS: usize = 3;
pub const HIST_CHANNEL_WEIGHT: f64 = 1.0 / HIST_CHANNELS as f64;
pub const HIST_VALUE_RANGE: usize = 256;
pub const MAX_HIST_BINS: u32 = 255;

// Local descriptor definitions. Each keypoint is described by a grid of
// DESC_CELLS x DESC_CELLS cells, each holding DESC_ORIENTATION_BINS gradient
// orientation bins, sampled over a square patch of DESC_PATCH_SIZE pixels.
pub const DESC_CELLS: usize = 4;
pub const DESC_CELL_SIZE: usize = 4;
pub const DESC_PATCH_SIZE: usize = DESC_CELLS * DESC_CELL_SIZE;
pub const DESC_ORIENTATION_BINS: usize = 8;
pub const DESC_DIMENSION: usize = DESC_CELLS * DESC_CELLS * DESC_ORIENTATION_BINS;
pub const DESC_CLAMP: f64 = 0.2;

pub const FAST_THRESHOLD: u8 = 20;

// number of closest images reported for each ranking
pub const DEFAULT_K: usize = 5;

//typed at the interactive prompt to leave the query loop
pub const EXIT_TOKEN: &str = "#";
