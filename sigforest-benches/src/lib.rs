//! Benchmark support crate for sigforest.
//!
//! Provides seeded synthetic key sets and merge schedules used by the
//! Criterion benchmarks for bulk loading, merging and the connectivity
//! search.

pub mod error;
pub mod params;
pub mod source;
