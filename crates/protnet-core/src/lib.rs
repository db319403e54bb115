//! # protnet Core Library
//!
//! An in-memory engine for sparse networks of pairwise protein relationships, where every
//! relationship may carry a numeric weight, typed key/value annotations, or both.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction.
//!
//! - **[`core`]: The Foundation.** Stateless value types (`NodeId`, `AnnotationValue`, `Edge`),
//!   the sparse row storage with its adjacency index and payload matrices, and the
//!   `NodeRegistry` boundary to an external name/id mapping service.
//!
//! - **[`network`]: The Engine.** The stateful `Network` façade that keeps the stores in step
//!   and implements the algorithms on top of them: traversal, set combination with node
//!   merging, filtering, degree-preserving randomization and purification-data derivation.
//!
//! File formats, clustering and scoring are left to callers, which consume the read API
//! (`edges_array`, `edge_weight`, `neighbors`, `proteins`).

pub mod core;
pub mod network;
