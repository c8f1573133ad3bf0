use crate::graph::GraphError;

use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum AcoError {
    Graph(GraphError),
    /// A finished tour has zero or non finite length, its deposit would not be finite.
    DegenerateTour(f64),
    /// The selection weights of the remaining candidates sum to zero or are not finite.
    ProbabilityCollapse(f64),
    InvalidDeposit(f64),
    InvalidConfig(String),
    WorkerPanicked,
}

impl AcoError {
    /// Returns true for errors the colony recovers from inside a generation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DegenerateTour(_) | Self::ProbabilityCollapse(_)
        )
    }
}

impl From<GraphError> for AcoError {
    fn from(error: GraphError) -> Self {
        Self::Graph(error)
    }
}

impl fmt::Display for AcoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph(error) => write!(f, "{}", error),
            Self::DegenerateTour(length) => {
                write!(f, "Tour of length {} can not deposit pheromones.", length)
            }
            Self::ProbabilityCollapse(sum) => write!(
                f,
                "Selection weights sum to {}, no probability distribution exists.",
                sum
            ),
            Self::InvalidDeposit(amount) => {
                write!(f, "Pheromone deposit of {} is not allowed.", amount)
            }
            Self::InvalidConfig(msg) => write!(f, "{}", msg),
            Self::WorkerPanicked => write!(f, "An ant worker thread panicked."),
        }
    }
}

impl Error for AcoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Graph(error) => Some(error),
            _ => None,
        }
    }
}
