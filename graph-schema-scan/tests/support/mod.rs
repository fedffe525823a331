//! Shared helpers for schema scan integration tests.
#![allow(dead_code)]

use graph_schema_core::{
    Error, GraphSource, MemoryGraph, NodeId, NodeRecord, PropertyMap, PropertyValue, ReadScope,
    RelId, RelRecord, Result,
};
use graph_schema_scan::{compute_schema, EntityKind, ScanOptions, SchemaRow};
use std::collections::HashSet;
use std::sync::Arc;

/// Build a property map from literal pairs.
pub fn props(entries: &[(&str, PropertyValue)]) -> PropertyMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Owned label list from literals.
pub fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn node_row(label_combo: &[&str], property: &str, cypher_type: &str) -> SchemaRow {
    SchemaRow {
        kind: EntityKind::Node,
        labels: labels(label_combo),
        property: property.to_string(),
        cypher_type: cypher_type.to_string(),
    }
}

pub fn rel_row(rel_type: &str, property: &str, cypher_type: &str) -> SchemaRow {
    SchemaRow {
        kind: EntityKind::Relationship,
        labels: vec![rel_type.to_string()],
        property: property.to_string(),
        cypher_type: cypher_type.to_string(),
    }
}

/// Options that exercise chunk boundaries even on tiny graphs.
pub fn small_batches() -> ScanOptions {
    ScanOptions {
        batch_size: 2,
        max_concurrency: 4,
        unit_timeout: None,
    }
}

pub fn sorted(mut rows: Vec<SchemaRow>) -> Vec<SchemaRow> {
    rows.sort();
    rows
}

/// Run a scan with small batches and return sorted rows.
pub async fn scan(graph: MemoryGraph) -> Vec<SchemaRow> {
    sorted(
        compute_schema(Arc::new(graph), &small_batches())
            .await
            .expect("scan should succeed"),
    )
}

// ============================================================================
// Fault-injecting sources
// ============================================================================

/// Wraps a [`MemoryGraph`] and fails reads for a chosen set of node ids.
pub struct FlakyGraph {
    inner: MemoryGraph,
    fail_nodes: HashSet<u64>,
}

impl FlakyGraph {
    pub fn new(inner: MemoryGraph, fail_nodes: impl IntoIterator<Item = u64>) -> Self {
        FlakyGraph {
            inner,
            fail_nodes: fail_nodes.into_iter().collect(),
        }
    }
}

struct FlakyScope<'a> {
    scope: Box<dyn ReadScope + 'a>,
    fail_nodes: &'a HashSet<u64>,
}

impl ReadScope for FlakyScope<'_> {
    fn node(&self, id: NodeId) -> Result<NodeRecord> {
        if self.fail_nodes.contains(&id.0) {
            return Err(Error::source(format!("injected read failure for {id}")));
        }
        self.scope.node(id)
    }

    fn relationship(&self, id: RelId) -> Result<RelRecord> {
        self.scope.relationship(id)
    }
}

impl GraphSource for FlakyGraph {
    fn node_ids(&self) -> Result<Box<dyn Iterator<Item = NodeId> + Send + '_>> {
        self.inner.node_ids()
    }

    fn relationship_ids(&self) -> Result<Box<dyn Iterator<Item = RelId> + Send + '_>> {
        self.inner.relationship_ids()
    }

    fn begin_read(&self) -> Result<Box<dyn ReadScope + '_>> {
        Ok(Box::new(FlakyScope {
            scope: self.inner.begin_read()?,
            fail_nodes: &self.fail_nodes,
        }))
    }
}

/// A source whose id iterators cannot be opened at all.
pub struct UnavailableSource {
    pub nodes_available: bool,
    pub relationships_available: bool,
    pub inner: MemoryGraph,
}

impl GraphSource for UnavailableSource {
    fn node_ids(&self) -> Result<Box<dyn Iterator<Item = NodeId> + Send + '_>> {
        if !self.nodes_available {
            return Err(Error::source("node storage unavailable"));
        }
        self.inner.node_ids()
    }

    fn relationship_ids(&self) -> Result<Box<dyn Iterator<Item = RelId> + Send + '_>> {
        if !self.relationships_available {
            return Err(Error::source("relationship storage unavailable"));
        }
        self.inner.relationship_ids()
    }

    fn begin_read(&self) -> Result<Box<dyn ReadScope + '_>> {
        self.inner.begin_read()
    }
}
