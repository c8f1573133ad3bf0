use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum GraphError {
    /// Fewer than three distinct towns, no closed tour can be formed.
    InsufficientTowns(usize),
    /// Two towns share a name but not a position.
    DuplicateTown(String),
    InvalidPosition(String),
    /// The pair of town indices is not an edge of the graph.
    UnknownEdge((usize, usize)),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientTowns(count) => write!(
                f,
                "At least 3 distinct towns are needed for a tour, got {}.",
                count
            ),
            Self::DuplicateTown(name) => {
                write!(f, "Town {} appears with different positions.", name)
            }
            Self::InvalidPosition(name) => {
                write!(f, "Town {} has a non finite position.", name)
            }
            Self::UnknownEdge((from, to)) => {
                write!(f, "Edge ({}, {}) is not part of the graph.", from, to)
            }
        }
    }
}

impl Error for GraphError {}
