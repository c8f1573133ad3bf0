use crate::graph::{Edge, GraphError, TownGraph};

use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Recomputes the length of a tour from the town positions, without using the
/// cached edge lengths of the graph.
pub fn tour_length(tour: &Tour, graph: &TownGraph) -> Result<f64, GraphError> {
    let mut length = 0.0;
    for (from, to) in tour.iter_edges() {
        match (graph.town(*from), graph.town(*to)) {
            (Some(a), Some(b)) => length += a.distance(b),
            _ => return Err(GraphError::UnknownEdge((*from, *to))),
        }
    }

    Ok(length)
}

/// Ordered list of town indices. A finished tour starts and ends at the same town.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    node_list: Vec<usize>,
}

impl Default for Tour {
    fn default() -> Self {
        Tour::new()
    }
}

impl Tour {
    pub fn new() -> Self {
        Tour {
            node_list: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tour {
            node_list: Vec::with_capacity(capacity),
        }
    }

    pub fn from_nodes(nodes: Vec<usize>) -> Self {
        Tour { node_list: nodes }
    }

    pub fn push_node(&mut self, node: usize) {
        self.node_list.push(node);
    }

    /// Returns to the first town, unless the tour is empty or already closed.
    pub fn close(&mut self) {
        if let Some(&start) = self.node_list.first() {
            if !self.is_closed() {
                self.node_list.push(start);
            }
        }
    }

    pub fn start(&self) -> Option<usize> {
        self.node_list.first().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.node_list.len() > 1 && self.node_list.first() == self.node_list.last()
    }

    /// Number of entries, counting the start town twice on a closed tour.
    pub fn len(&self) -> usize {
        self.node_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_list.is_empty()
    }

    /// Returns true if the tour visits each of the `order` towns exactly once and
    /// returns to its start.
    pub fn is_closed_permutation(&self, order: usize) -> bool {
        if !self.is_closed() || self.node_list.len() != order + 1 {
            return false;
        }

        let mut seen = vec![false; order];
        for &id in &self.node_list[..order] {
            if id >= order || seen[id] {
                return false;
            }
            seen[id] = true;
        }

        true
    }

    pub fn iter_edges(&self) -> Box<dyn Iterator<Item = (&usize, &usize)> + '_> {
        Box::new(self.node_list.iter().zip(self.node_list.iter().skip(1)))
    }

    pub fn nodes(&self) -> &[usize] {
        &self.node_list
    }

    pub fn edges(&self, graph: &TownGraph) -> Result<Vec<Edge>, GraphError> {
        self.iter_edges()
            .map(|(from, to)| graph.edge(*from, *to))
            .collect()
    }

    /// Sums the cached edge lengths along the tour.
    pub fn length(&self, graph: &TownGraph) -> Result<f64, GraphError> {
        let mut length = 0.0;
        for (from, to) in self.iter_edges() {
            length += graph.length(*from, *to)?;
        }

        Ok(length)
    }

    pub fn names<'g>(&self, graph: &'g TownGraph) -> Vec<&'g str> {
        self.node_list
            .iter()
            .filter_map(|&id| graph.town(id).map(|town| town.name()))
            .collect()
    }
}

impl Display for Tour {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.node_list
                .iter()
                .map(|x| format!("{}", x))
                .collect::<Vec<String>>()
                .join(" -> ")
        )
    }
}
