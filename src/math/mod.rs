//! Mathematical utilities for the engine

/// Bearings, angular distances and Euclidean distances between cells
pub mod geometry;
