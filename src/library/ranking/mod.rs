mod global;
mod local;

pub use global::{global_distances, rank_global};
pub use local::{accumulate_votes, rank_local};

use crate::library::LibError;

//Both rankings return the k best images, so there must be at least k images to choose from.
fn check_k(k: usize, num_images: usize) -> Result<(), LibError> {
    if k == 0 {
        return Err(LibError::ConstructionError(
            "number of closest images must be at least 1".to_string(),
        ));
    }
    if k > num_images {
        return Err(LibError::InsufficientCandidates {
            k,
            available: num_images,
        });
    }
    Ok(())
}
