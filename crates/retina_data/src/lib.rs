//! # Retina Data
//!
//! Plain data types shared by the growth engine and its consumers: the 2D
//! geometry primitive, grid points, neurotransmitter tags, dendrite points and
//! compartments. Everything here is serde-serializable and free of simulation
//! logic.

pub mod data;

pub use data::dendrite::{Compartment, DendritePoint, Neurotransmitter};
pub use data::geometry::{normalize_heading, BoundingCircle, GridPoint, Vector2D};
