//! Label bookkeeping for the propagation passes.

use std::collections::HashMap;

/// The label held by each node, indexed by node position in the sequence.
#[derive(Debug, Clone, Default)]
pub struct LabelState {
    labels: Vec<usize>,
}

impl LabelState {
    /// Every node starts with a distinct label: its own index.
    pub fn distinct(count: usize) -> Self {
        Self {
            labels: (0..count).collect(),
        }
    }

    pub fn get(&self, node: usize) -> usize {
        self.labels[node]
    }

    pub fn set(&mut self, node: usize, label: usize) {
        self.labels[node] = label;
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct labels currently held.
    pub fn distinct_count(&self) -> usize {
        let mut labels = self.labels.clone();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    /// Surviving labels remapped to a dense 0-indexed sequence, in order of
    /// first appearance over the node sequence.
    pub fn renumbered(&self) -> Vec<usize> {
        let mut remap: HashMap<usize, usize> = HashMap::new();
        let mut dense = Vec::with_capacity(self.labels.len());

        for &label in &self.labels {
            let next = remap.len();
            dense.push(*remap.entry(label).or_insert(next));
        }
        dense
    }
}
