use crate::graph::{Edge, GraphError};

/// Dense storage for values attached to unordered pairs of distinct nodes.
///
/// Only the lower triangle of the adjacency matrix is kept, the entry for
/// `(i, j)` with `i < j` lives at `j * (j - 1) / 2 + i`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix<T> {
    values: Vec<T>,
    order: usize,
}

fn triangle(order: usize) -> usize {
    order * order.saturating_sub(1) / 2
}

impl<T: Clone> SymmetricMatrix<T> {
    /// Creates a matrix for `order` nodes with every pair set to `value`.
    pub fn with_value(order: usize, value: T) -> Self {
        SymmetricMatrix {
            values: vec![value; triangle(order)],
            order,
        }
    }
}

impl<T> SymmetricMatrix<T> {
    /// Creates a matrix by evaluating `f(i, j)` with `i < j` for every pair.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(order: usize, mut f: F) -> Self {
        let mut values = Vec::with_capacity(triangle(order));
        for j in 1..order {
            for i in 0..j {
                values.push(f(i, j));
            }
        }

        SymmetricMatrix { values, order }
    }

    fn index(&self, a: usize, b: usize) -> Result<usize, GraphError> {
        let (i, j) = if a <= b { (a, b) } else { (b, a) };
        if i == j || j >= self.order {
            return Err(GraphError::UnknownEdge((a, b)));
        }

        Ok(j * (j - 1) / 2 + i)
    }

    /// Returns the number of nodes.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the number of stored pairs.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, a: usize, b: usize) -> Result<&T, GraphError> {
        let idx = self.index(a, b)?;
        Ok(&self.values[idx])
    }

    pub fn get_mut(&mut self, a: usize, b: usize) -> Result<&mut T, GraphError> {
        let idx = self.index(a, b)?;
        Ok(&mut self.values[idx])
    }

    pub fn get_edge(&self, edge: &Edge) -> Result<&T, GraphError> {
        self.get(edge.from(), edge.to())
    }

    /// Iterates over all pairs `(i, j)` with `i < j` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        (1..self.order)
            .flat_map(|j| (0..j).map(move |i| (i, j)))
            .zip(self.values.iter())
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Applies `f` to every value and returns a matrix of the results.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> SymmetricMatrix<U> {
        SymmetricMatrix {
            values: self.values.iter().map(f).collect(),
            order: self.order,
        }
    }
}
