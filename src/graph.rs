mod edge;
mod error;
mod symmetric_matrix;
mod town;
mod town_graph;

pub use edge::Edge;
pub use error::GraphError;
pub use symmetric_matrix::SymmetricMatrix;
pub use town::Town;
pub use town_graph::TownGraph;

/// Returns every unordered pair of the given towns as an edge, indexed by
/// position in the slice. Fewer than two towns give no edges.
pub fn all_edges(towns: &[Town]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(towns.len() * towns.len().saturating_sub(1) / 2);
    for (i, from) in towns.iter().enumerate() {
        for (j, to) in towns.iter().enumerate().skip(i + 1) {
            edges.push(Edge::new(i, j, from.distance(to)));
        }
    }

    edges
}
