//! Parallel reduction driver.
//!
//! One unit of work per chunk: the unit opens a read scope, materializes
//! its chunk's records, infers per-property types, and returns a partial
//! schema. Units run on the blocking pool (the work is read-and-CPU
//! bound), bounded by a semaphore, collected through a `JoinSet`, and
//! folded with the monoid merge in completion order; ordering is
//! irrelevant by commutativity.
//!
//! ## Failure containment
//!
//! A unit that fails (read error, panic, optional timeout expiry)
//! contributes the identity element: the failure is logged at `warn` and
//! reduction continues, so a partial failure under-reports schema
//! completeness but never fabricates rows. Only id-iterator acquisition
//! aborts the whole pass.

use crate::batch::{Batches, DEFAULT_BATCH_SIZE};
use crate::rows::{schema_rows, SchemaRow};
use graph_schema_core::{
    CypherType, Error, GraphSource, LabelSet, NodeId, NodeSchema, ReadScope, RelId,
    RelationshipSchema, Result, Schema,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Tuning knobs for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Entities per unit of work. Default: 10,000.
    pub batch_size: usize,
    /// Maximum units executing at once. Default: available parallelism.
    pub max_concurrency: usize,
    /// Per-unit wall-clock limit. `None` (the default) waits
    /// unconditionally. On expiry the unit counts as failed and its
    /// contribution is the empty schema; the blocking body cannot be
    /// cancelled, so an expired unit is abandoned and its eventual result
    /// discarded.
    pub unit_timeout: Option<Duration>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        ScanOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: threads,
            unit_timeout: None,
        }
    }
}

/// Partial schema for one chunk of nodes.
fn node_partial(scope: &dyn ReadScope, ids: &[NodeId]) -> Result<NodeSchema> {
    let mut schema = NodeSchema::empty();
    for &id in ids {
        let record = scope.node(id)?;
        let key = LabelSet::new(record.labels);
        let props = record
            .properties
            .into_iter()
            .map(|(name, value)| (name, CypherType::of(&value)));
        schema = schema.merge(NodeSchema::with_properties(key, props));
    }
    Ok(schema)
}

/// Partial schema for one chunk of relationships.
fn rel_partial(scope: &dyn ReadScope, ids: &[RelId]) -> Result<RelationshipSchema> {
    let mut schema = RelationshipSchema::empty();
    for &id in ids {
        let record = scope.relationship(id)?;
        let props = record
            .properties
            .into_iter()
            .map(|(name, value)| (name, CypherType::of(&value)));
        schema = schema.merge(RelationshipSchema::with_properties(record.rel_type, props));
    }
    Ok(schema)
}

/// Submit one unit per chunk, await all, fold with the monoid merge.
async fn reduce_pass<S, Id, K>(
    source: &Arc<S>,
    ids: Box<dyn Iterator<Item = Id> + Send + '_>,
    options: &ScanOptions,
    aggregate: fn(&dyn ReadScope, &[Id]) -> Result<Schema<K>>,
    pass: &'static str,
) -> Schema<K>
where
    S: GraphSource,
    Id: Send + 'static,
    K: Ord + Send + 'static,
{
    let started = Instant::now();
    let semaphore = Arc::new(Semaphore::new(options.max_concurrency.max(1)));
    let unit_timeout = options.unit_timeout;

    let mut join_set: JoinSet<Result<Schema<K>>> = JoinSet::new();
    let mut units = 0usize;
    let mut entities = 0usize;

    for chunk in Batches::new(ids, options.batch_size) {
        units += 1;
        entities += chunk.len();

        let src = Arc::clone(source);
        let sem = Arc::clone(&semaphore);

        join_set.spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|_| Error::task("semaphore closed"))?;

            let handle = tokio::task::spawn_blocking(move || {
                let scope = src.begin_read()?;
                aggregate(&*scope, &chunk)
            });

            let joined = match unit_timeout {
                Some(limit) => tokio::time::timeout(limit, handle).await.map_err(|_| {
                    Error::task(format!("unit timed out after {}ms", limit.as_millis()))
                })?,
                None => handle.await,
            };

            joined.map_err(|e| Error::task(format!("unit panicked: {e}")))?
        });
    }

    let mut schema = Schema::empty();
    let mut failed = 0usize;
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(Ok(partial)) => schema = schema.merge(partial),
            Ok(Err(e)) => {
                failed += 1;
                tracing::warn!(pass, error = %e, "schema unit failed; contributing empty schema");
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(pass, error = %e, "schema unit join failed; contributing empty schema");
            }
        }
    }

    tracing::info!(
        pass,
        entities,
        units,
        failed,
        grouping_keys = schema.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "schema pass complete"
    );

    schema
}

/// Accumulated schema over every node in the source.
pub async fn compute_node_schema<S: GraphSource>(
    source: &Arc<S>,
    options: &ScanOptions,
) -> Result<NodeSchema> {
    let ids = source.node_ids()?;
    Ok(reduce_pass(source, ids, options, node_partial, "nodes").await)
}

/// Accumulated schema over every relationship in the source.
pub async fn compute_relationship_schema<S: GraphSource>(
    source: &Arc<S>,
    options: &ScanOptions,
) -> Result<RelationshipSchema> {
    let ids = source.relationship_ids()?;
    Ok(reduce_pass(source, ids, options, rel_partial, "relationships").await)
}

/// Compute the full schema of `source`: node pass, relationship pass,
/// flatten.
///
/// The two passes run sequentially and share no mutable state. Iterator
/// acquisition failures propagate (no partial result); unit-of-work
/// failures are absorbed per the driver's containment policy.
pub async fn compute_schema<S: GraphSource>(
    source: Arc<S>,
    options: &ScanOptions,
) -> Result<Vec<SchemaRow>> {
    let nodes = compute_node_schema(&source, options).await?;
    let relationships = compute_relationship_schema(&source, options).await?;
    Ok(schema_rows(&nodes, &relationships))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_schema_core::{MemoryGraph, PropertyMap, PropertyValue};

    #[test]
    fn default_options_are_sane() {
        let options = ScanOptions::default();
        assert_eq!(options.batch_size, DEFAULT_BATCH_SIZE);
        assert!(options.max_concurrency >= 1);
        assert!(options.unit_timeout.is_none());
    }

    #[tokio::test]
    async fn empty_graph_yields_no_rows() {
        let graph = Arc::new(MemoryGraph::new());
        let rows = compute_schema(graph, &ScanOptions::default()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn smoke_single_node() {
        let mut graph = MemoryGraph::new();
        let mut props = PropertyMap::default();
        props.insert("name".to_string(), PropertyValue::from("x"));
        graph.add_node(vec!["A".to_string()], props);

        let rows = compute_schema(Arc::new(graph), &ScanOptions::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].property, "name");
        assert_eq!(rows[0].cypher_type, "STRING");
    }
}
