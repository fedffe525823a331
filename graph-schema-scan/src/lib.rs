//! # Graph Schema Scan
//!
//! Concurrent schema inference over a property graph.
//!
//! For every distinct node label combination and every relationship type,
//! determine which properties occur and the lattice join of each
//! property's observed types, by scanning the full entity set in
//! fixed-size chunks and folding per-chunk partial schemas with a
//! commutative monoid merge.
//!
//! - [`Batches`]: fixed-size chunking of the entity-id stream
//! - [`compute_schema`]: the one externally observable operation
//! - [`SchemaRow`]: the flat output format
//!
//! ## Example
//!
//! ```ignore
//! use graph_schema_core::MemoryGraph;
//! use graph_schema_scan::{compute_schema, ScanOptions};
//! use std::sync::Arc;
//!
//! let graph: MemoryGraph = load_graph()?;
//! let rows = compute_schema(Arc::new(graph), &ScanOptions::default()).await?;
//! for row in rows {
//!     println!("{} {:?} {} {}", row.kind, row.labels, row.property, row.cypher_type);
//! }
//! ```

pub mod batch;
pub mod reduce;
pub mod rows;

pub use batch::{Batches, DEFAULT_BATCH_SIZE};
pub use reduce::{compute_node_schema, compute_relationship_schema, compute_schema, ScanOptions};
pub use rows::{schema_rows, EntityKind, SchemaRow};
