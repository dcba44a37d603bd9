use rayon::prelude::*;

use super::check_k;
use crate::library::{
    distance::squared_euclidean, BoundedQueue, Candidate, DescriptorDatabase, FeaturePoint, LibError,
};

/// Returns the `k` images with the most local feature votes, best first. Equal vote counts are
/// ordered by ascending image index.
///
/// Every query feature is compared against every local feature in the database. The images owning
/// its `k` nearest database features each receive one vote per owned feature, so a single image
/// may collect several votes from one query feature.
pub fn rank_local(
    query_features: &[FeaturePoint],
    db: &DescriptorDatabase,
    k: usize,
    parallel: bool,
) -> Result<Vec<usize>, LibError> {
    let votes = accumulate_votes(query_features, db, k, parallel)?;

    let mut order = (0..votes.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| votes[b].cmp(&votes[a]).then_with(|| a.cmp(&b)));
    order.truncate(k);

    Ok(order)
}

/// Vote count for every indexed image, in image index order. The counts always sum to
/// `query_features.len() * k`.
pub fn accumulate_votes(
    query_features: &[FeaturePoint],
    db: &DescriptorDatabase,
    k: usize,
    parallel: bool,
) -> Result<Vec<usize>, LibError> {
    check_k(k, db.len())?;

    //every query feature must be able to fill its queue, otherwise the vote total is not fixed.
    let available = db.total_local_features();
    if available < k {
        return Err(LibError::InsufficientCandidates { k, available });
    }

    let mut votes = vec![0; db.len()];
    let mut queue = BoundedQueue::new(k)?;

    for query_feature in query_features {
        queue.clear();
        if parallel {
            nearest_features_parallel(query_feature, db, &mut queue)?;
        } else {
            nearest_features(query_feature, db, &mut queue);
        }

        for winner in queue.drain_ascending() {
            votes[winner.image_index] += 1;
        }
    }

    trace!("Local feature votes: {:?}", votes);

    Ok(votes)
}

//Exhaustive scan, in image index order and then in extraction order within each image.
fn nearest_features(query_feature: &FeaturePoint, db: &DescriptorDatabase, queue: &mut BoundedQueue) {
    for (image_index, image) in db.iter() {
        for feature in image.local_features() {
            debug_assert_eq!(feature.image_index(), image_index);
            queue.insert(image_index, squared_euclidean(query_feature, feature));
        }
    }
}

//Same result as nearest_features. Each image is scanned into its own queue, then the survivors are
//merged using their position in the sequential scan order, so ties resolve identically.
fn nearest_features_parallel(
    query_feature: &FeaturePoint,
    db: &DescriptorDatabase,
    queue: &mut BoundedQueue,
) -> Result<(), LibError> {
    let capacity = queue.capacity();

    let scan_offsets = db
        .images()
        .iter()
        .scan(0u64, |offset, image| {
            let start = *offset;
            *offset += image.local_features().len() as u64;
            Some(start)
        })
        .collect::<Vec<_>>();

    let per_image_survivors = db
        .images()
        .par_iter()
        .enumerate()
        .map(|(image_index, image)| -> Result<Vec<Candidate>, LibError> {
            let mut image_queue = BoundedQueue::new(capacity)?;
            for feature in image.local_features() {
                image_queue.insert(image_index, squared_euclidean(query_feature, feature));
            }
            Ok(image_queue.drain_ascending().collect())
        })
        .collect::<Result<Vec<_>, LibError>>()?;

    for (survivors, offset) in per_image_survivors.into_iter().zip(scan_offsets) {
        for candidate in survivors {
            queue.insert_with_seq(candidate.image_index, candidate.distance, offset + candidate.seq());
        }
    }

    Ok(())
}
