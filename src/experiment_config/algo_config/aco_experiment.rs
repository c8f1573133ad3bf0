use serde::{Deserialize, Serialize};

use crate::experiment_config::{ExperimentConfigError, Fix};
use crate::metaheuristic::aco::{InitialPheromone, Params, StartTown};
use crate::rng::os_random_seed;

fn default_q() -> f64 {
    10.0
}

fn default_start() -> StartTown {
    StartTown::Random
}

fn default_initial_pheromone() -> InitialPheromone {
    InitialPheromone::Uniform(1.0)
}

fn default_workers() -> usize {
    1
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct AcoExperiment {
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    #[serde(default = "default_q")]
    pub q: f64,
    /// Kept to 64 bits, the untagged algorithm config can not buffer wider
    /// integers. Colony parameters built in code may use the full `u128`.
    pub seed: u64,
    pub ant_count: usize,
    pub generations: usize,
    #[serde(default = "default_start")]
    pub start: StartTown,
    #[serde(default = "default_initial_pheromone")]
    pub initial_pheromone: InitialPheromone,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl AcoExperiment {
    /// Converts into colony parameters, rejecting invalid values.
    pub fn params(&self) -> Result<Params, ExperimentConfigError> {
        let params = Params::new(
            self.alpha,
            self.beta,
            self.rho,
            self.q,
            Some(self.seed as u128),
            self.ant_count,
            self.generations,
        )
        .with_start(self.start)
        .with_initial_pheromone(self.initial_pheromone)
        .with_workers(self.workers);

        params
            .validate()
            .map_err(|error| ExperimentConfigError::InvalidAlgorithmConfig(error.to_string()))?;

        Ok(params)
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct UnseededAcoExperiment {
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    #[serde(default = "default_q")]
    pub q: f64,
    pub ant_count: usize,
    pub generations: usize,
    #[serde(default = "default_start")]
    pub start: StartTown,
    #[serde(default = "default_initial_pheromone")]
    pub initial_pheromone: InitialPheromone,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Fix<AcoExperiment> for UnseededAcoExperiment {
    fn to_fixed(&self) -> AcoExperiment {
        AcoExperiment {
            alpha: self.alpha,
            beta: self.beta,
            rho: self.rho,
            q: self.q,
            ant_count: self.ant_count,
            generations: self.generations,
            start: self.start,
            initial_pheromone: self.initial_pheromone,
            workers: self.workers,
            seed: os_random_seed() as u64,
        }
    }
}
