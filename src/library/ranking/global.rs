use super::check_k;
use crate::library::{distance::histogram_distance, DescriptorDatabase, Histogram, LibError};

/// Histogram distance from the query to every indexed image, in image index order.
pub fn global_distances(query: &Histogram, db: &DescriptorDatabase) -> Vec<f64> {
    db.iter()
        .map(|(_idx, image)| histogram_distance(query, image.histogram()))
        .collect()
}

/// Returns the `k` images whose color histograms are closest to the query's, closest first.
/// Equal distances are ordered by ascending image index.
///
/// Unlike local ranking this does not bound the candidate set: there is only one distance per image,
/// so the whole database is sorted.
pub fn rank_global(query: &Histogram, db: &DescriptorDatabase, k: usize) -> Result<Vec<usize>, LibError> {
    check_k(k, db.len())?;

    let mut scored = global_distances(query, db).into_iter().enumerate().collect::<Vec<_>>();
    scored.sort_by(|(a_idx, a_dist), (b_idx, b_dist)| a_dist.total_cmp(b_dist).then_with(|| a_idx.cmp(b_idx)));

    if let Some((best_idx, best_dist)) = scored.first() {
        debug!("Closest global match: image {} at distance {}", best_idx, best_dist);
    }

    Ok(scored.into_iter().take(k).map(|(idx, _dist)| idx).collect())
}
