use crate::metaheuristic::aco::AcoError;
use crate::rng::os_random_seed;

use serde::{Deserialize, Serialize};

/// Where the ants of a run start their tours.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartTown {
    /// Every ant starts at the town with this index.
    Fixed(usize),
    /// One town is drawn when the colony is created and used for the whole run.
    Random,
    /// Every ant draws its own start town.
    PerAgent,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialPheromone {
    Uniform(f64),
    /// Every trail is drawn from [0, 1) with the colony's generator.
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    pub q: f64,
    pub seed: u128,
    pub ant_count: usize,
    pub generations: usize,
    pub start: StartTown,
    pub initial_pheromone: InitialPheromone,
    pub workers: usize,
}

impl Params {
    pub fn new(
        alpha: f64,
        beta: f64,
        rho: f64,
        q: f64,
        seed: Option<u128>,
        ant_count: usize,
        generations: usize,
    ) -> Self {
        Params {
            alpha,
            beta,
            rho,
            q,
            seed: seed.unwrap_or_else(os_random_seed),
            ant_count,
            generations,
            start: StartTown::Random,
            initial_pheromone: InitialPheromone::Uniform(1.0),
            workers: 1,
        }
    }

    pub fn with_start(mut self, start: StartTown) -> Self {
        self.start = start;
        self
    }

    pub fn with_initial_pheromone(mut self, initial_pheromone: InitialPheromone) -> Self {
        self.initial_pheromone = initial_pheromone;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn validate(&self) -> Result<(), AcoError> {
        let invalid = |msg: String| Err(AcoError::InvalidConfig(msg));

        if !(0.0..1.0).contains(&self.rho) {
            return invalid(format!("rho must be in [0, 1), got {}.", self.rho));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return invalid(format!("alpha must be non-negative, got {}.", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return invalid(format!("beta must be non-negative, got {}.", self.beta));
        }
        if !self.q.is_finite() || self.q < 0.0 {
            return invalid(format!("q must be non-negative, got {}.", self.q));
        }
        if self.ant_count == 0 {
            return invalid("ant_count must be at least 1.".to_string());
        }
        if self.generations == 0 {
            return invalid("generations must be at least 1.".to_string());
        }
        if self.workers == 0 {
            return invalid("workers must be at least 1.".to_string());
        }
        if let InitialPheromone::Uniform(value) = self.initial_pheromone {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!(
                    "initial pheromone must be non-negative, got {}.",
                    value
                ));
            }
        }

        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::new(1.0, 5.0, 0.4, 10.0, None, 5, 100)
    }
}
