//! Interaction aggregation - folding raw interactions into weighted edges.

use std::collections::{BTreeSet, HashMap};

use novel_corpus::ChapterRecord;

use crate::graph::{Edge, Evidence, PairKey};
use crate::resolver::NameResolver;

/// Accumulates resolved interactions across one or more chapter records.
///
/// Edges are kept in first-seen pair order, so output depends only on input
/// order. The roster collects every successfully resolved name - from the
/// explicit character list and from all interaction endpoints, including
/// endpoints of dropped interactions - so characters with no surviving edges
/// still become nodes.
#[derive(Debug, Default)]
pub struct InteractionAccumulator {
    edges: Vec<Edge>,
    index: HashMap<PairKey, usize>,
    roster: BTreeSet<String>,
}

impl InteractionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chapter record into the accumulator.
    ///
    /// An interaction is dropped when either endpoint resolves to no
    /// character or when both endpoints resolve to the same name.
    pub fn add_record(&mut self, record: &ChapterRecord, resolver: &NameResolver<'_>) {
        for name in &record.characters {
            if let Some(canonical) = resolver.resolve(name) {
                self.roster.insert(canonical);
            }
        }

        for interaction in &record.interactions {
            let first = resolver.resolve(&interaction.character_1);
            let second = resolver.resolve(&interaction.character_2);

            // Endpoints join the roster even when the interaction itself is
            // dropped as a self-pair or for a missing partner.
            for canonical in [&first, &second].into_iter().flatten() {
                self.roster.insert(canonical.clone());
            }

            let (Some(first), Some(second)) = (first, second) else {
                continue;
            };
            let Some(key) = PairKey::new(&first, &second) else {
                continue;
            };

            let evidence = Evidence::new(
                interaction.interaction_type.clone(),
                interaction.evidence_snippet.clone(),
            );

            match self.index.get(&key) {
                Some(&position) => self.edges[position].absorb(evidence),
                None => {
                    self.index.insert(key.clone(), self.edges.len());
                    self.edges.push(Edge::new(&key, evidence));
                }
            }
        }
    }

    /// Drop edges lighter than `min_weight`. The roster is unaffected, so
    /// pruning never removes nodes.
    pub fn prune(&mut self, min_weight: u32) {
        if min_weight <= 1 {
            return;
        }
        self.edges.retain(|edge| edge.weight >= min_weight);
        self.index = self
            .edges
            .iter()
            .enumerate()
            .map(|(position, edge)| (edge.key(), position))
            .collect();
    }

    /// Finish: edges in first-seen order plus the resolved character roster.
    pub fn finish(self) -> (Vec<Edge>, BTreeSet<String>) {
        (self.edges, self.roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_corpus::{AliasTable, RawInteraction, ResolutionPolicy};

    fn table() -> AliasTable {
        AliasTable::from_json_str(r#"{"casaubon": "Edward Casaubon"}"#).unwrap()
    }

    fn record(interactions: Vec<RawInteraction>) -> ChapterRecord {
        ChapterRecord {
            characters: Vec::new(),
            interactions,
        }
    }

    #[test]
    fn test_repeated_pairs_fold_into_one_edge() {
        let table = table();
        let resolver = NameResolver::lenient(&table);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &record(vec![
                RawInteraction::new("A", "B", "dialogue", "first"),
                RawInteraction::new("B", "A", "dialogue", "second"),
            ]),
            &resolver,
        );

        let (edges, roster) = accumulator.finish();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 2);
        // Evidence keeps encounter order even when the endpoints swap.
        let snippets: Vec<&str> = edges[0].interactions.iter().map(|e| e.snippet.as_str()).collect();
        assert_eq!(snippets, vec!["first", "second"]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_weight_counts_interactions_exactly() {
        let table = table();
        let resolver = NameResolver::lenient(&table);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &record(vec![
                RawInteraction::new("A", "B", "dialogue", "1"),
                RawInteraction::new("A", "C", "dialogue", "2"),
                RawInteraction::new("C", "A", "conflict", "3"),
                RawInteraction::new("B", "A", "dialogue", "4"),
                RawInteraction::new("A", "B", "dialogue", "5"),
            ]),
            &resolver,
        );

        let (edges, _) = accumulator.finish();
        assert_eq!(edges.len(), 2);
        // First-seen pair order: A-B before A-C.
        assert_eq!((edges[0].source.as_str(), edges[0].weight), ("A", 3));
        assert_eq!((edges[1].target.as_str(), edges[1].weight), ("C", 2));
    }

    #[test]
    fn test_self_pairs_and_blank_names_are_dropped() {
        let table = table();
        let resolver = NameResolver::lenient(&table);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &record(vec![
                // Self-pair after alias resolution.
                RawInteraction::new("casaubon", "Edward Casaubon", "thought", "..."),
                RawInteraction::new("", "B", "dialogue", "..."),
                RawInteraction::new("A", "  ", "dialogue", "..."),
            ]),
            &resolver,
        );

        let (edges, roster) = accumulator.finish();
        assert!(edges.is_empty());
        // Dropped interactions still seed the roster with their endpoints.
        let names: Vec<&str> = roster.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B", "Edward Casaubon"]);
    }

    #[test]
    fn test_explicit_characters_join_roster() {
        let table = table();
        let resolver = NameResolver::lenient(&table);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &ChapterRecord {
                characters: vec!["casaubon".to_string(), "Will Ladislaw".to_string()],
                interactions: Vec::new(),
            },
            &resolver,
        );

        let (edges, roster) = accumulator.finish();
        assert!(edges.is_empty());
        assert!(roster.contains("Edward Casaubon"));
        assert!(roster.contains("Will Ladislaw"));
    }

    #[test]
    fn test_strict_policy_drops_unknown_endpoints() {
        let table = table();
        let resolver = NameResolver::new(&table, ResolutionPolicy::Strict);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &record(vec![RawInteraction::new("casaubon", "Nobody Known", "dialogue", "...")]),
            &resolver,
        );

        let (edges, roster) = accumulator.finish();
        assert!(edges.is_empty());
        assert_eq!(roster.len(), 1);
        assert!(roster.contains("Edward Casaubon"));
    }

    #[test]
    fn test_prune_keeps_roster() {
        let table = table();
        let resolver = NameResolver::lenient(&table);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &record(vec![
                RawInteraction::new("A", "B", "dialogue", "1"),
                RawInteraction::new("A", "B", "dialogue", "2"),
                RawInteraction::new("A", "C", "dialogue", "3"),
            ]),
            &resolver,
        );
        accumulator.prune(2);

        let (edges, roster) = accumulator.finish();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 2);
        // C lost its only edge but stays a character.
        assert!(roster.contains("C"));
    }

    #[test]
    fn test_aggregation_spans_records() {
        let table = table();
        let resolver = NameResolver::lenient(&table);
        let mut accumulator = InteractionAccumulator::new();

        accumulator.add_record(
            &record(vec![RawInteraction::new("A", "B", "dialogue", "ch1")]),
            &resolver,
        );
        accumulator.add_record(
            &record(vec![RawInteraction::new("B", "A", "letter", "ch2")]),
            &resolver,
        );

        let (edges, _) = accumulator.finish();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 2);
        assert_eq!(edges[0].interactions[1].kind, "letter");
    }
}
