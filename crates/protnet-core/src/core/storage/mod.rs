//! # Sparse Storage Module
//!
//! Row-major sparse stores that back a [`Network`](crate::network::Network).
//!
//! - [`row`] - Sorted per-row arrays with binary-search insertion and stepped growth
//! - [`partners`] - Existence-only, always bidirectional adjacency
//! - [`weights`] - One `f32` per pair, `NaN` meaning absent
//! - [`annotations`] - One key/value map per pair
//!
//! Rows grow and shrink in steps of [`row::ROW_GROWTH_STEP`]; the row index grows in
//! steps of [`row::INDEX_GROWTH_STEP`] and is never compacted in place.

pub mod annotations;
pub mod partners;
pub mod row;
pub mod weights;
