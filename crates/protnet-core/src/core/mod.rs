//! # Core Module
//!
//! The stateless building blocks of the network engine.
//!
//! - **Value Types** ([`models`]) - Node ids, typed annotation values and edge snapshots
//! - **Sparse Storage** ([`storage`]) - Adjacency index, weight matrix and annotation matrix
//! - **Name Resolution** ([`registry`]) - The boundary to the string/id mapping service
//!
//! Nothing in this module knows about directedness beyond the `symmetrical` flag of
//! the matrices; edge bookkeeping lives in [`crate::network`].

pub mod models;
pub mod registry;
pub mod storage;
