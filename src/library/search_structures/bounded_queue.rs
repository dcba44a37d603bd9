use std::{cmp::Ordering, collections::VecDeque};

use crate::library::LibError;

/// An image index paired with its distance from a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub image_index: usize,
    pub distance: f64,
    //position of the candidate in the insertion stream. Among equal distances, earlier wins.
    seq: u64,
}

impl Candidate {
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Keeps the `capacity` smallest-distance candidates out of an unbounded stream of insertions.
///
/// A full queue only accepts a candidate whose distance is strictly smaller than the largest
/// distance it holds. On equal distances the incumbent is kept, so the held set is always the
/// smallest `capacity` candidates ordered by (distance, insertion order).
///
/// The expected capacity is small (the number of closest images requested by the user), so
/// candidates are kept in a sorted ring buffer: the maximum is evicted from the back and the
/// minimum is extracted from the front.
#[derive(Debug, Clone)]
pub struct BoundedQueue {
    capacity: usize,
    inserted: u64,
    //sorted ascending by Candidate::rank_cmp
    entries: VecDeque<Candidate>,
}

impl BoundedQueue {
    pub fn new(capacity: usize) -> Result<Self, LibError> {
        if capacity == 0 {
            return Err(LibError::ConstructionError(
                "bounded queue capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            inserted: 0,
            entries: VecDeque::with_capacity(capacity + 1),
        })
    }

    pub fn insert(&mut self, image_index: usize, distance: f64) {
        let seq = self.inserted;
        self.inserted += 1;
        self.insert_with_seq(image_index, distance, seq);
    }

    /// Insert a candidate whose position in the overall insertion stream is already known. Used
    /// when several queues fed from disjoint parts of one stream are merged into a single queue.
    pub(crate) fn insert_with_seq(&mut self, image_index: usize, distance: f64, seq: u64) {
        let candidate = Candidate {
            image_index,
            distance,
            seq,
        };

        if self.is_full() {
            //a fresh insertion always has the largest seq, so this only accepts a strictly smaller
            //distance. Ties never evict: the incumbent wins.
            match self.peek_max() {
                Some(max) if candidate.rank_cmp(max) == Ordering::Less => {}
                _ => return,
            }
            self.entries.pop_back();
        }

        let pos = self
            .entries
            .partition_point(|held| held.rank_cmp(&candidate) == Ordering::Less);
        self.entries.insert(pos, candidate);
    }

    pub fn peek_min(&self) -> Option<&Candidate> {
        self.entries.front()
    }

    pub fn peek_max(&self) -> Option<&Candidate> {
        self.entries.back()
    }

    pub fn pop_min(&mut self) -> Option<Candidate> {
        self.entries.pop_front()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every candidate, ready to be refilled for a new query.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.inserted = 0;
    }

    /// Empties the queue, yielding candidates in ascending order of distance.
    pub fn drain_ascending(&mut self) -> impl Iterator<Item = Candidate> + '_ {
        self.entries.drain(..)
    }
}
