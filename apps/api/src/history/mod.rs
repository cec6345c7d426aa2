//! Local analysis history: an ordered, unbounded sequence of records behind
//! an injectable storage backend.

pub mod handlers;
pub mod store;
