//! Read-through caching for external sheet data.
//!
//! All range reads go through a single process-wide [`TimedCache`] so that a
//! write-triggered `clear()` invalidates every cached range at once.

pub mod store;

pub use store::TimedCache;
