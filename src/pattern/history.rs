/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Duplicate detection history
//!
//! Accepted structures are remembered as (label multiset, coverage graph)
//! pairs. A new candidate is compared by label multiset first; only on a
//! label match does the expensive graph-isomorphism check run, and only
//! against history entries sharing that exact multiset. Label equality is
//! necessary but not sufficient for duplication, with one exception: on a
//! clean starting structure the label multiset alone certifies
//! isomorphism.

use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::UnGraph;

/// How a duplicate was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplicate {
    /// Label multiset match on a clean starting structure
    LabelMatch,
    /// Full graph-isomorphism match
    Isomorphic,
}

/// Append-only history of accepted label multisets and coverage graphs
#[derive(Default)]
pub struct PatternHistory {
    labels: Vec<Vec<String>>,
    graphs: Vec<UnGraph<String, ()>>,
}

impl PatternHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted entries
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Checks a candidate against the history
    ///
    /// # Arguments
    ///
    /// * `labels` - Sorted label multiset of the candidate
    /// * `graph` - Coverage graph of the candidate
    /// * `clean_slab` - Whether generation started from a clean structure,
    ///   enabling the label-only fast path
    pub fn find_duplicate(
        &self,
        labels: &[String],
        graph: &UnGraph<String, ()>,
        clean_slab: bool,
    ) -> Option<Duplicate> {
        let candidates: Vec<&UnGraph<String, ()>> = self
            .labels
            .iter()
            .zip(self.graphs.iter())
            .filter(|(l, _)| l.as_slice() == labels)
            .map(|(_, g)| g)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        if clean_slab {
            return Some(Duplicate::LabelMatch);
        }
        let node_match = |a: &String, b: &String| a == b;
        let edge_match = |_: &(), _: &()| true;
        if candidates
            .iter()
            .any(|h| is_isomorphic_matching(graph, *h, node_match, edge_match))
        {
            return Some(Duplicate::Isomorphic);
        }
        None
    }

    /// Records an accepted candidate
    pub fn push(&mut self, labels: Vec<String>, graph: UnGraph<String, ()>) {
        self.labels.push(labels);
        self.graphs.push(graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(tags: &[&str]) -> UnGraph<String, ()> {
        let mut graph = UnGraph::default();
        let nodes: Vec<_> = tags.iter().map(|t| graph.add_node(t.to_string())).collect();
        for pair in nodes.windows(2) {
            graph.add_edge(pair[0], pair[1], ());
        }
        graph
    }

    fn star_graph(center: &str, leaves: &[&str]) -> UnGraph<String, ()> {
        let mut graph = UnGraph::default();
        let c = graph.add_node(center.to_string());
        for leaf in leaves {
            let l = graph.add_node(leaf.to_string());
            graph.add_edge(c, l, ());
        }
        graph
    }

    #[test]
    fn test_label_mismatch_is_not_duplicate() {
        let mut history = PatternHistory::new();
        history.push(vec!["1CO".into()], path_graph(&["Pt", "CO"]));
        let candidate = path_graph(&["Pt", "OH"]);
        assert_eq!(history.find_duplicate(&["1OH".into()], &candidate, false), None);
    }

    #[test]
    fn test_isomorphic_duplicate_detected() {
        let mut history = PatternHistory::new();
        history.push(vec!["1CO".into()], path_graph(&["Pt", "CO"]));
        let candidate = path_graph(&["Pt", "CO"]);
        assert_eq!(
            history.find_duplicate(&["1CO".into()], &candidate, false),
            Some(Duplicate::Isomorphic)
        );
    }

    #[test]
    fn test_label_match_alone_keeps_both() {
        // Same label multiset, different topology: a 4-node path vs a
        // 4-node star. Both must be retained.
        let mut history = PatternHistory::new();
        history.push(
            vec!["1O".into()],
            path_graph(&["Pt", "Pt", "Pt", "O"]),
        );
        let candidate = star_graph("Pt", &["Pt", "Pt", "O"]);
        assert_eq!(history.find_duplicate(&["1O".into()], &candidate, false), None);
    }

    #[test]
    fn test_clean_slab_fast_path() {
        let mut history = PatternHistory::new();
        history.push(
            vec!["1O".into()],
            path_graph(&["Pt", "Pt", "Pt", "O"]),
        );
        let candidate = star_graph("Pt", &["Pt", "Pt", "O"]);
        assert_eq!(
            history.find_duplicate(&["1O".into()], &candidate, true),
            Some(Duplicate::LabelMatch)
        );
    }
}
