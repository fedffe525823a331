//! Flat output rows and the schema flattener.
//!
//! The two accumulated schemas flatten into one row sequence: node
//! grouping keys tagged `Node`, then relationship keys tagged
//! `Relationship`. A grouping key with zero recorded properties yields
//! exactly one row with empty property and type strings: "this key exists
//! in the data but no properties were ever observed on it".

use graph_schema_core::{NodeSchema, PropertyTypes, RelationshipSchema};
use serde::Serialize;
use std::fmt;

/// Whether a row describes a node label combination or a relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EntityKind {
    Node,
    Relationship,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("Node"),
            EntityKind::Relationship => f.write_str("Relationship"),
        }
    }
}

/// One schema row.
///
/// Serializes with the wire field names `type`, `labels`, `property`,
/// `cypherType`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SchemaRow {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Label combination (canonical order) or single relationship type.
    pub labels: Vec<String>,
    /// Property name, or empty when the key has no observed properties.
    pub property: String,
    /// Lattice element name, or empty when `property` is empty.
    #[serde(rename = "cypherType")]
    pub cypher_type: String,
}

fn push_rows(kind: EntityKind, labels: Vec<String>, props: &PropertyTypes, out: &mut Vec<SchemaRow>) {
    if props.is_empty() {
        out.push(SchemaRow {
            kind,
            labels,
            property: String::new(),
            cypher_type: String::new(),
        });
        return;
    }
    for (name, ty) in props {
        out.push(SchemaRow {
            kind,
            labels: labels.clone(),
            property: name.clone(),
            cypher_type: ty.name().to_string(),
        });
    }
}

/// Flatten the final node and relationship schemas into output rows.
pub fn schema_rows(nodes: &NodeSchema, relationships: &RelationshipSchema) -> Vec<SchemaRow> {
    let mut out = Vec::new();
    for (labels, props) in nodes.entries() {
        push_rows(EntityKind::Node, labels.as_slice().to_vec(), props, &mut out);
    }
    for (rel_type, props) in relationships.entries() {
        push_rows(
            EntityKind::Relationship,
            vec![rel_type.clone()],
            props,
            &mut out,
        );
    }
    out
}
