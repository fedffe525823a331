//! # Graph Schema Core
//!
//! Core types for property-graph schema inference.
//!
//! This crate provides:
//! - The property value model (`PropertyValue`, `PropertyMap`)
//! - The `CypherType` lattice: per-value inference and the join table
//! - The `Schema` accumulator: a commutative monoid over observations
//! - The `GraphSource` / `ReadScope` boundary to graph storage, with an
//!   in-memory implementation (`MemoryGraph`)
//!
//! ## Design Principles
//!
//! 1. **Runtime-agnostic**: no tokio; the scan crate owns execution
//! 2. **Ownership over locking**: partial schemas are moved into the
//!    merge, never shared mutably
//! 3. **Deterministic aggregation**: the join lattice and key-normalized
//!    grouping make the result independent of batch boundaries and
//!    completion order

pub mod cypher_type;
pub mod error;
pub mod schema;
pub mod source;
pub mod value;

// Re-export main types
pub use cypher_type::CypherType;
pub use error::{Error, Result};
pub use schema::{LabelSet, NodeSchema, PropertyTypes, RelationshipSchema, Schema};
pub use source::{GraphSource, MemoryGraph, NodeId, NodeRecord, ReadScope, RelId, RelRecord};
pub use value::{PropertyMap, PropertyValue};
