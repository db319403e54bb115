//! # Core Models Module
//!
//! Value types shared by the sparse storage layer and the network façade.
//!
//! ## Key Components
//!
//! - [`ids`] - The externally assigned [`NodeId`](ids::NodeId) and pair canonicalization
//! - [`annotation`] - The closed set of typed annotation values and their merge rule
//! - [`edge`] - Detached edge snapshots returned by queries and iteration
//!
//! ## Usage
//!
//! ```ignore
//! use protnet::core::models::annotation::AnnotationValue;
//!
//! let tags = AnnotationValue::list(vec!["tap".into(), "y2h".into()])?;
//! network.set_edge_annotation(1, 2, "methods", tags);
//! ```

pub mod annotation;
pub mod edge;
pub mod ids;
