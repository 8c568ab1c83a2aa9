//! Storage abstractions for service layer
//!
//! Contains a reusable map store that lives in memory and can optionally be
//! persisted as JSON after every mutation.

pub mod json_map_store;
