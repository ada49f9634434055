//! Pipeline orchestration - raw chapter records to community-annotated graphs.
//!
//! Stages run strictly in order within one chapter: resolve names, aggregate
//! interactions, assemble the graph, detect communities. Chapters are
//! independent of each other; the alias and group tables are borrowed
//! read-only for every invocation.

mod aggregate;

pub use aggregate::*;

use std::collections::{BTreeSet, HashMap};

use novel_corpus::{
    AliasTable, BookTable, ChapterDataset, ChapterSelection, GroupTable, PipelineConfig,
};

use crate::communities::{CommunityDetector, DetectorConfig};
use crate::graph::{ChapterGraph, Edge, Node};
use crate::resolver::NameResolver;

/// Builds annotated graphs from chapter records.
pub struct ChapterPipeline<'a> {
    aliases: &'a AliasTable,
    groups: &'a GroupTable,
    config: PipelineConfig,
}

impl<'a> ChapterPipeline<'a> {
    pub fn new(aliases: &'a AliasTable, groups: &'a GroupTable, config: PipelineConfig) -> Self {
        Self {
            aliases,
            groups,
            config,
        }
    }

    pub fn with_defaults(aliases: &'a AliasTable, groups: &'a GroupTable) -> Self {
        Self::new(aliases, groups, PipelineConfig::default())
    }

    /// The finished graph for one chapter key.
    ///
    /// `None` means "no data for this chapter" - the caller can show an
    /// empty state rather than treat it as a failure.
    pub fn chapter_graph(&self, dataset: &ChapterDataset, key: &str) -> Option<ChapterGraph> {
        let record = dataset.record(key)?;
        let graph = self.build(std::iter::once(record));
        tracing::debug!(
            chapter = key,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built chapter graph"
        );
        Some(graph)
    }

    /// One graph aggregated over every chapter a selection matches.
    ///
    /// An empty selection result yields an empty graph.
    pub fn selection_graph(
        &self,
        dataset: &ChapterDataset,
        selection: &ChapterSelection,
        books: &BookTable,
    ) -> ChapterGraph {
        let keys = dataset.select(selection, books);
        let graph = self.build(keys.iter().filter_map(|key| dataset.record(key)));
        tracing::debug!(
            chapters = keys.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built selection graph"
        );
        graph
    }

    fn build<'r>(&self, records: impl Iterator<Item = &'r novel_corpus::ChapterRecord>) -> ChapterGraph {
        let resolver = NameResolver::new(self.aliases, self.config.resolution);

        let mut accumulator = InteractionAccumulator::new();
        for record in records {
            accumulator.add_record(record, &resolver);
        }
        accumulator.prune(self.config.min_connections);
        let (edges, roster) = accumulator.finish();

        let mut graph = assemble(roster, edges, self.groups);

        let detector = CommunityDetector::new(DetectorConfig {
            max_passes: self.config.max_passes,
            update_mode: self.config.label_updates,
        });
        detector.annotate(&mut graph);
        graph
    }
}

/// Assemble the node set and aggregated edges into a chapter graph.
///
/// Nodes come from the resolved-character roster alone; every edge endpoint
/// is guaranteed by the aggregator to be in the roster. Each node gets its
/// group membership (first match in declaration order, sentinel otherwise)
/// and its degree, the sum of incident edge weights.
pub fn assemble(roster: BTreeSet<String>, edges: Vec<Edge>, groups: &GroupTable) -> ChapterGraph {
    let mut degrees: HashMap<&str, u32> = HashMap::new();
    for edge in &edges {
        *degrees.entry(edge.source.as_str()).or_default() += edge.weight;
        *degrees.entry(edge.target.as_str()).or_default() += edge.weight;
    }

    let nodes: Vec<Node> = roster
        .iter()
        .map(|id| {
            let (group, group_name) = groups.group_of(id);
            let mut node = Node::new(id.clone()).with_group(group, group_name);
            node.degree = degrees.get(id.as_str()).copied().unwrap_or(0);
            node
        })
        .collect();

    ChapterGraph { nodes, edges }
}
