//! Community detection via greedy weighted label propagation.
//!
//! A simplified stand-in for Louvain modularity optimization. The algorithm:
//! 1. **Initialize**: every node holds a distinct label (its sequence index)
//! 2. **Propagate**: per pass, each node adopts the label it is most heavily
//!    connected to, if that connection strictly beats the one to its own label
//! 3. **Terminate**: a pass with no reassignment, or the pass budget
//! 4. **Renumber**: surviving labels become dense 0-indexed community ids
//!
//! The default in-place update mode lets later nodes in a pass observe
//! earlier reassignments, so results can depend on node traversal order.
//! That order sensitivity is accepted as part of the heuristic.

mod labels;

pub use labels::*;

use std::collections::HashMap;

use novel_corpus::LabelUpdateMode;

use crate::graph::{ChapterGraph, Edge};

/// Configuration for the label propagation detector.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Upper bound on passes; the only bounded-runtime safeguard.
    pub max_passes: usize,

    /// Whether a pass reads labels updated earlier in the same pass.
    pub update_mode: LabelUpdateMode,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_passes: 10,
            update_mode: LabelUpdateMode::InPlace,
        }
    }
}

/// Partitions a chapter graph's nodes into communities.
///
/// The detector never fails: a graph with no edges leaves every node in its
/// own singleton community, and an empty graph yields an empty partition.
pub struct CommunityDetector {
    config: DetectorConfig,
}

impl CommunityDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectorConfig::default())
    }

    /// Community ids for nodes in sequence order; dense and 0-indexed.
    pub fn detect(&self, nodes: &[String], edges: &[Edge]) -> Vec<usize> {
        let count = nodes.len();
        if count == 0 {
            return Vec::new();
        }
        let mut labels = LabelState::distinct(count);

        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(position, id)| (id.as_str(), position))
            .collect();

        // Adjacency with summed weights; neighbor order follows edge order.
        let mut adjacency: Vec<Vec<(usize, u32)>> = vec![Vec::new(); count];
        for edge in edges {
            let (Some(&source), Some(&target)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            accumulate(&mut adjacency[source], target, edge.weight);
            accumulate(&mut adjacency[target], source, edge.weight);
        }

        let mut passes_used = 0;
        for _ in 0..self.config.max_passes {
            passes_used += 1;

            let snapshot = match self.config.update_mode {
                LabelUpdateMode::Snapshot => Some(labels.clone()),
                LabelUpdateMode::InPlace => None,
            };

            let mut improved = false;
            for node in 0..count {
                let current = labels.get(node);

                // Weight from this node to each neighboring label,
                // encounter-ordered so ties keep the first label seen.
                let mut encounter_order: Vec<usize> = Vec::new();
                let mut weight_to: HashMap<usize, u32> = HashMap::new();
                for &(neighbor, weight) in &adjacency[node] {
                    let label = match &snapshot {
                        Some(frozen) => frozen.get(neighbor),
                        None => labels.get(neighbor),
                    };
                    match weight_to.entry(label) {
                        std::collections::hash_map::Entry::Occupied(mut entry) => {
                            *entry.get_mut() += weight;
                        }
                        std::collections::hash_map::Entry::Vacant(entry) => {
                            entry.insert(weight);
                            encounter_order.push(label);
                        }
                    }
                }

                let mut best_label = None;
                let mut best_weight = 0;
                for &label in &encounter_order {
                    let weight = weight_to[&label];
                    if weight > best_weight {
                        best_weight = weight;
                        best_label = Some(label);
                    }
                }

                let Some(best) = best_label else {
                    continue;
                };
                let own_weight = weight_to.get(&current).copied().unwrap_or(0);
                if best != current && best_weight > own_weight {
                    labels.set(node, best);
                    improved = true;
                }
            }

            if !improved {
                break;
            }
        }

        tracing::trace!(
            passes = passes_used,
            communities = labels.distinct_count(),
            "label propagation finished"
        );
        labels.renumbered()
    }

    /// The node id -> community id mapping form of [`detect`](Self::detect).
    pub fn partition(&self, nodes: &[String], edges: &[Edge]) -> HashMap<String, usize> {
        nodes
            .iter()
            .cloned()
            .zip(self.detect(nodes, edges))
            .collect()
    }

    /// Detect communities and write them onto the graph's nodes.
    pub fn annotate(&self, graph: &mut ChapterGraph) {
        let ids: Vec<String> = graph.nodes.iter().map(|node| node.id.clone()).collect();
        let communities = self.detect(&ids, &graph.edges);
        for (node, community) in graph.nodes.iter_mut().zip(communities) {
            node.community = community;
        }
    }
}

fn accumulate(neighbors: &mut Vec<(usize, u32)>, neighbor: usize, weight: u32) {
    if let Some(entry) = neighbors.iter_mut().find(|(id, _)| *id == neighbor) {
        entry.1 += weight;
    } else {
        neighbors.push((neighbor, weight));
    }
}
