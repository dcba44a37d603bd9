pub mod definitions;
mod descriptor_db;
mod distance;
pub mod errors;
mod extraction;
mod feature_point;
mod lib_fns;
mod library_cfg;
mod query_output;
mod ranking;
mod search_structures;
mod utils;

//internal exports
pub(crate) use utils::img_ops;

//external exports
pub use descriptor_db::{DescriptorDatabase, ImageDescriptorSet};
pub use distance::{histogram_distance, squared_euclidean};
pub use errors::{ExtractionError, LibError};
pub use extraction::{FeatureExtractor, ImageExtractor};
pub use feature_point::{FeaturePoint, Histogram};
pub use lib_fns::{preprocess, run_query};
pub use library_cfg::{DescriptorCfg, ImageSetCfg, SearchCfg};
pub use query_output::QueryOutput;
pub use ranking::{accumulate_votes, global_distances, rank_global, rank_local};
pub use search_structures::{BoundedQueue, Candidate};
