use crate::graph::{Edge, GraphError, SymmetricMatrix, Town};

/// Complete graph over a set of towns with precomputed edge lengths.
#[derive(Debug, Clone)]
pub struct TownGraph {
    towns: Vec<Town>,
    lengths: SymmetricMatrix<f64>,
}

impl TownGraph {
    /// Builds the graph for the given towns.
    ///
    /// Towns that are exact duplicates of an earlier town are dropped. Returns an
    /// error if a name is reused for another position, if a position is not finite
    /// or if less than three distinct towns remain.
    pub fn new(towns: Vec<Town>) -> Result<Self, GraphError> {
        let mut distinct: Vec<Town> = Vec::with_capacity(towns.len());
        for town in towns.into_iter() {
            if !town.position().is_finite() {
                return Err(GraphError::InvalidPosition(town.name().to_string()));
            }

            match distinct.iter().position(|known| known.name() == town.name()) {
                Some(idx) if distinct[idx] == town => continue,
                Some(_) => return Err(GraphError::DuplicateTown(town.name().to_string())),
                None => distinct.push(town),
            }
        }

        if distinct.len() < 3 {
            return Err(GraphError::InsufficientTowns(distinct.len()));
        }

        let lengths = SymmetricMatrix::from_fn(distinct.len(), |i, j| {
            distinct[i].distance(&distinct[j])
        });

        Ok(TownGraph {
            towns: distinct,
            lengths,
        })
    }

    /// Returns the number of towns.
    pub fn order(&self) -> usize {
        self.towns.len()
    }

    /// Returns the number of edges.
    pub fn size(&self) -> usize {
        self.lengths.size()
    }

    pub fn towns(&self) -> &[Town] {
        &self.towns
    }

    pub fn town(&self, id: usize) -> Option<&Town> {
        self.towns.get(id)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.towns.iter().position(|town| town.name() == name)
    }

    pub fn length(&self, from: usize, to: usize) -> Result<f64, GraphError> {
        self.lengths.get(from, to).map(|length| *length)
    }

    pub fn edge(&self, from: usize, to: usize) -> Result<Edge, GraphError> {
        Ok(Edge::new(from, to, self.length(from, to)?))
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.lengths
            .iter()
            .map(|((from, to), length)| Edge::new(from, to, *length))
    }
}
