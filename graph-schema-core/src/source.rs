//! Graph source boundary and the in-memory graph.
//!
//! This module defines the traits a graph storage engine implements to be
//! scanned: id iterators over the full node/relationship set, and scoped
//! read transactions through which per-entity records are materialized.
//!
//! The traits are synchronous. A scan unit's work is read-and-CPU bound
//! and runs on the blocking pool; keeping the seam sync avoids forcing an
//! async runtime on implementations that don't need one.
//!
//! ## Implementations
//!
//! [`MemoryGraph`] ships here as the in-process implementation: an owned
//! property graph, deserializable from a JSON graph document, useful for
//! tests and for the CLI front-end. Storage-backed engines implement the
//! same two traits.

use crate::error::{Error, Result};
use crate::value::PropertyMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Entity ids and records
// ============================================================================

/// Opaque node identifier within one graph source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Opaque relationship identifier within one graph source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for RelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rel#{}", self.0)
    }
}

/// One node as read under a scope: labels plus property map.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    /// Label names attached to the node, in storage order (the grouping
    /// key normalizes; order here carries no meaning).
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

/// One relationship as read under a scope: type name plus property map.
#[derive(Debug, Clone)]
pub struct RelRecord {
    pub rel_type: String,
    pub properties: PropertyMap,
}

// ============================================================================
// Source traits
// ============================================================================

/// A property graph that can be scanned.
///
/// `node_ids` / `relationship_ids` enumerate the full entity set of one
/// kind; failing to open either iterator aborts the whole scan. Record
/// reads go through [`GraphSource::begin_read`]: one scope per chunk, so
/// the reads materializing a chunk are mutually consistent.
pub trait GraphSource: Send + Sync + 'static {
    /// Iterator over all node ids.
    fn node_ids(&self) -> Result<Box<dyn Iterator<Item = NodeId> + Send + '_>>;

    /// Iterator over all relationship ids.
    fn relationship_ids(&self) -> Result<Box<dyn Iterator<Item = RelId> + Send + '_>>;

    /// Open a scoped read transaction.
    ///
    /// Every read performed through the returned scope observes one
    /// consistent graph state. The scope ends when dropped.
    fn begin_read(&self) -> Result<Box<dyn ReadScope + '_>>;
}

/// Scoped, read-only access to per-entity records.
pub trait ReadScope: Send {
    /// Labels and properties of one node.
    fn node(&self, id: NodeId) -> Result<NodeRecord>;

    /// Type and properties of one relationship.
    fn relationship(&self, id: RelId) -> Result<RelRecord>;
}

// ============================================================================
// In-memory graph
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NodeData {
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    properties: PropertyMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RelData {
    #[serde(rename = "type")]
    rel_type: String,
    /// Start node index into `nodes`.
    start: u64,
    /// End node index into `nodes`.
    end: u64,
    #[serde(default)]
    properties: PropertyMap,
}

/// Owned in-process property graph.
///
/// Ids are dense indexes in insertion order. The graph is immutable while
/// scanned (shared by `&self`), so a read scope is trivially consistent.
///
/// # Example
///
/// ```
/// use graph_schema_core::{MemoryGraph, PropertyMap, PropertyValue};
///
/// let mut graph = MemoryGraph::new();
/// let mut props = PropertyMap::default();
/// props.insert("name".to_string(), PropertyValue::from("Ada"));
/// let a = graph.add_node(vec!["Person".to_string()], props);
/// let b = graph.add_node(vec!["Person".to_string()], PropertyMap::default());
/// graph
///     .add_relationship(a, b, "KNOWS".to_string(), PropertyMap::default())
///     .unwrap();
/// assert_eq!(graph.node_count(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGraph {
    #[serde(default)]
    nodes: Vec<NodeData>,
    #[serde(default)]
    relationships: Vec<RelData>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        MemoryGraph::default()
    }

    /// Add a node; returns its id.
    pub fn add_node(&mut self, labels: Vec<String>, properties: PropertyMap) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(NodeData { labels, properties });
        id
    }

    /// Add a relationship between existing nodes; returns its id.
    ///
    /// Endpoints are validated at insert so a dangling reference cannot be
    /// constructed through this API.
    pub fn add_relationship(
        &mut self,
        start: NodeId,
        end: NodeId,
        rel_type: String,
        properties: PropertyMap,
    ) -> Result<RelId> {
        let n = self.nodes.len() as u64;
        if start.0 >= n {
            return Err(Error::invalid_graph(format!(
                "relationship start {} out of range ({} nodes)",
                start, n
            )));
        }
        if end.0 >= n {
            return Err(Error::invalid_graph(format!(
                "relationship end {} out of range ({} nodes)",
                end, n
            )));
        }
        let id = RelId(self.relationships.len() as u64);
        self.relationships.push(RelData {
            rel_type,
            start: start.0,
            end: end.0,
            properties,
        });
        Ok(id)
    }

    /// Parse a JSON graph document and validate relationship endpoints.
    ///
    /// Document shape:
    ///
    /// ```json
    /// {
    ///   "nodes": [{"labels": ["A"], "properties": {"val1": "String"}}],
    ///   "relationships": [{"type": "REL", "start": 0, "end": 0, "properties": {}}]
    /// }
    /// ```
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let graph: MemoryGraph = serde_json::from_slice(bytes)?;
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> Result<()> {
        let n = self.nodes.len() as u64;
        for (i, rel) in self.relationships.iter().enumerate() {
            if rel.start >= n || rel.end >= n {
                return Err(Error::invalid_graph(format!(
                    "relationship {} ({}) references node {}..{} but graph has {} nodes",
                    i, rel.rel_type, rel.start, rel.end, n
                )));
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}

/// Read scope over a [`MemoryGraph`]: a shared borrow of the (immutable
/// while scanned) graph.
struct MemoryScope<'a> {
    graph: &'a MemoryGraph,
}

impl ReadScope for MemoryScope<'_> {
    fn node(&self, id: NodeId) -> Result<NodeRecord> {
        let data = self
            .graph
            .nodes
            .get(id.0 as usize)
            .ok_or_else(|| Error::not_found(id.to_string()))?;
        Ok(NodeRecord {
            labels: data.labels.clone(),
            properties: data.properties.clone(),
        })
    }

    fn relationship(&self, id: RelId) -> Result<RelRecord> {
        let data = self
            .graph
            .relationships
            .get(id.0 as usize)
            .ok_or_else(|| Error::not_found(id.to_string()))?;
        Ok(RelRecord {
            rel_type: data.rel_type.clone(),
            properties: data.properties.clone(),
        })
    }
}

impl GraphSource for MemoryGraph {
    fn node_ids(&self) -> Result<Box<dyn Iterator<Item = NodeId> + Send + '_>> {
        Ok(Box::new((0..self.nodes.len() as u64).map(NodeId)))
    }

    fn relationship_ids(&self) -> Result<Box<dyn Iterator<Item = RelId> + Send + '_>> {
        Ok(Box::new((0..self.relationships.len() as u64).map(RelId)))
    }

    fn begin_read(&self) -> Result<Box<dyn ReadScope + '_>> {
        Ok(Box::new(MemoryScope { graph: self }))
    }
}
