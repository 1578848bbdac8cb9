//! Core data structures for the retina dendrite model.

pub mod dendrite;
pub mod geometry;
