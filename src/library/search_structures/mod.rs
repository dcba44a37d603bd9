mod bounded_queue;
pub use bounded_queue::{BoundedQueue, Candidate};
