//! Entity types the ordering engines operate on.

pub mod order;
pub mod submittal;
