//! # Network Module
//!
//! The stateful network façade and the algorithms built on it.
//!
//! ## Overview
//!
//! A [`Network`] ties the sparse stores of [`crate::core::storage`] together and
//! keeps them consistent: the adjacency index, the weight matrix and the
//! annotation matrix always agree on which edges exist, and the edge counter is
//! maintained on every write. Directed and undirected semantics are selected
//! once, at construction.
//!
//! ## Architecture
//!
//! - **Façade** ([`graph`]) - Construction, mutation, point queries and neighbor queries
//! - **Iteration** ([`iter`]) - Lazy edge enumeration
//! - **Traversal** ([`search`]) - Depth/breadth-first search and connected components
//! - **Combination** ([`combine`]) - Union/intersection of networks with optional node merging
//! - **Filtering** ([`filter`]) - Predicate, protein-set and weight cut-off subnetworks
//! - **Randomization** ([`randomize`]) - Degree-preserving rewiring and random networks
//! - **Purification Data** ([`purification`]) - Bait/prey records from directed networks
//! - **Configuration** ([`config`]) - Combination rules and rewiring parameters
//! - **Error Handling** ([`error`]) - The failure taxonomy of all write paths
//!
//! Reads never fail: missing weights are `NaN`, missing annotations are empty.

pub mod combine;
mod compare;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod iter;
pub mod purification;
pub mod randomize;
pub mod search;

pub use config::{
    CombinationRules, CombinationRulesBuilder, CombinationType, ConfigError, RewiringConfig,
    WeightMergePolicy,
};
pub use error::NetworkError;
pub use filter::{EdgePredicate, RESERVED_WEIGHT_KEY};
pub use graph::Network;
pub use iter::EdgeIter;
pub use purification::{PurificationData, PurificationExperiment};
pub use search::{SearchCallback, TraversalOrder};
