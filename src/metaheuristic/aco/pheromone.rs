use crate::graph::{Edge, GraphError, SymmetricMatrix, TownGraph};
use crate::metaheuristic::aco::AcoError;

use decorum::R64;
use num_traits::identities::Zero;
use oorandom::Rand64;

/// Smallest trail a randomly initialized edge starts with.
const MIN_INITIAL_TRAIL: f64 = 1e-6;

/// Pheromone for a tour of the given length, shared by each of its edges.
pub fn deposit_amount(q: f64, tour_length: f64) -> Result<f64, AcoError> {
    if tour_length <= 0.0 || !tour_length.is_finite() {
        return Err(AcoError::DegenerateTour(tour_length));
    }

    let amount = q / tour_length;
    if !amount.is_finite() {
        return Err(AcoError::DegenerateTour(tour_length));
    }

    Ok(amount)
}

/// Trail strength of every edge of a town graph.
///
/// Values are kept as `R64`, which can not represent NaN or infinity. Every
/// operation checks its result before storing it.
#[derive(Debug, Clone)]
pub struct PheromoneTable {
    trails: SymmetricMatrix<R64>,
}

impl PheromoneTable {
    pub fn uniform(graph: &TownGraph, value: f64) -> Result<Self, AcoError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AcoError::InvalidConfig(format!(
                "Initial pheromone {} must be finite and non-negative.",
                value
            )));
        }

        Ok(PheromoneTable {
            trails: SymmetricMatrix::with_value(graph.order(), R64::from_inner(value)),
        })
    }

    /// Draws every trail uniformly from [0, 1).
    pub fn random(graph: &TownGraph, rng: &mut Rand64) -> Self {
        PheromoneTable {
            trails: SymmetricMatrix::from_fn(graph.order(), |_, _| {
                R64::from_inner(rng.rand_float().max(MIN_INITIAL_TRAIL))
            }),
        }
    }

    pub fn order(&self) -> usize {
        self.trails.order()
    }

    pub fn size(&self) -> usize {
        self.trails.size()
    }

    pub fn get(&self, edge: &Edge) -> Result<f64, AcoError> {
        Ok(self.trails.get_edge(edge)?.into_inner())
    }

    /// Multiplies every trail with `rho` and returns the amount that evaporated.
    pub fn decay_all(&mut self, rho: f64) -> Result<f64, AcoError> {
        if !(0.0..1.0).contains(&rho) {
            return Err(AcoError::InvalidConfig(format!(
                "Decay factor {} is not in [0, 1).",
                rho
            )));
        }

        let factor = R64::from_inner(rho);
        let mut evaporated = R64::zero();
        for weight in self.trails.values_mut() {
            let after_decay = *weight * factor;
            evaporated += *weight - after_decay;
            *weight = after_decay;
        }

        Ok(evaporated.into_inner())
    }

    /// Adds `amount` to the trail of `edge`.
    pub fn deposit(&mut self, edge: &Edge, amount: f64) -> Result<(), AcoError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AcoError::InvalidDeposit(amount));
        }

        let weight = self.trails.get_mut(edge.from(), edge.to())?;
        let updated = weight.into_inner() + amount;
        if !updated.is_finite() {
            return Err(AcoError::InvalidDeposit(amount));
        }
        *weight = R64::from_inner(updated);

        Ok(())
    }

    /// Copies the current trails. Ants only ever read from a snapshot.
    pub fn snapshot(&self) -> PheromoneSnapshot {
        PheromoneSnapshot {
            trails: self.trails.map(|weight| weight.into_inner()),
        }
    }

    pub fn total(&self) -> f64 {
        self.trails
            .values()
            .iter()
            .fold(0.0, |acc, weight| acc + weight.into_inner())
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.trails
            .iter()
            .map(|(ids, weight)| (ids, weight.into_inner()))
    }
}

/// Frozen copy of the trails taken at the start of a generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneSnapshot {
    trails: SymmetricMatrix<f64>,
}

impl PheromoneSnapshot {
    pub fn get(&self, from: usize, to: usize) -> Result<f64, GraphError> {
        self.trails.get(from, to).map(|weight| *weight)
    }
}
