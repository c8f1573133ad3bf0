mod algo_config;
mod general_experiment_config;
mod town_config;

pub use algo_config::{AcoExperiment, AlgoConfig, UnseededAcoExperiment};
pub use general_experiment_config::GeneralExperimentConfig;
pub use town_config::TownConfig;

use crate::graph::{GraphError, Town};
use crate::metaheuristic::aco::AcoError;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::io::Read;

pub trait Fix<CorrectType> {
    fn to_fixed(&self) -> CorrectType;
}

/// Complete description of a run, usually read from a yaml file.
#[derive(Deserialize, Serialize, Debug)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub experiment: GeneralExperimentConfig,
    pub algorithm: AlgoConfig,
    pub towns: Vec<TownConfig>,
}

impl ExperimentConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ExperimentConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExperimentConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn to_yaml(&self) -> Result<String, ExperimentConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolves the algorithm seed once, see `AlgoConfig::fix`.
    pub fn fix(&mut self) -> AcoExperiment {
        self.algorithm.fix()
    }

    pub fn towns(&self) -> Vec<Town> {
        self.towns.iter().map(TownConfig::to_town).collect()
    }
}

#[derive(Debug)]
pub enum ExperimentConfigError {
    InvalidAlgorithmConfig(String),
    Parse(serde_yaml::Error),
    Run(AcoError),
}

impl fmt::Display for ExperimentConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlgorithmConfig(msg) => write!(f, "{}", msg),
            Self::Parse(error) => write!(f, "Config could not be parsed: {}", error),
            Self::Run(error) => write!(f, "{}", error),
        }
    }
}

impl Error for ExperimentConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Run(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for ExperimentConfigError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Parse(error)
    }
}

impl From<AcoError> for ExperimentConfigError {
    fn from(error: AcoError) -> Self {
        Self::Run(error)
    }
}

impl From<GraphError> for ExperimentConfigError {
    fn from(error: GraphError) -> Self {
        Self::Run(AcoError::Graph(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metaheuristic::aco::{InitialPheromone, StartTown};

    const SEEDED: &str = "
experiment:
  aggregation_rate: 5
algorithm:
  alpha: 1.0
  beta: 2.0
  rho: 0.3
  seed: 42
  ant_count: 10
  generations: 20
  start:
    fixed: 1
towns:
  - { name: A, x: 0.0, y: 0.0 }
  - { name: B, x: 10.0, y: 0.0 }
  - { name: C, x: 0.0, y: 10.0 }
";

    const UNSEEDED: &str = "
algorithm:
  alpha: 1.0
  beta: 5.0
  rho: 0.4
  q: 20.0
  ant_count: 5
  generations: 100
  initial_pheromone: random
towns:
  - { name: A, x: 1.0, y: 2.0 }
";

    #[test]
    fn seeded_config_is_parsed() {
        let mut config = ExperimentConfig::from_yaml(SEEDED).unwrap();
        let aco = config.fix();

        assert_eq!(config.experiment.aggregation_rate, 5);
        assert_eq!(aco.seed, 42);
        assert_eq!(aco.q, 10.0, "q should fall back to its default.");
        assert_eq!(aco.start, StartTown::Fixed(1));
        assert_eq!(aco.initial_pheromone, InitialPheromone::Uniform(1.0));
        assert_eq!(aco.workers, 1);
        assert_eq!(config.towns().len(), 3);
        assert_eq!(config.towns()[1], Town::new("B", 10.0, 0.0));
    }

    #[test]
    fn unseeded_config_is_fixed() {
        let mut config = ExperimentConfig::from_yaml(UNSEEDED).unwrap();

        assert!(matches!(config.algorithm, AlgoConfig::UnseededAco(_)));
        assert_eq!(config.experiment, GeneralExperimentConfig::default());

        let aco = config.fix();
        assert_eq!(aco.q, 20.0);
        assert_eq!(aco.start, StartTown::Random);
        assert_eq!(aco.initial_pheromone, InitialPheromone::Random);
        assert_eq!(config.algorithm, AlgoConfig::Aco(aco));
    }

    #[test]
    fn unseeded_config_draws_its_seed_once() {
        let mut config = ExperimentConfig::from_yaml(UNSEEDED).unwrap();
        let first = config.fix();
        let second = config.fix();

        assert_eq!(first.seed, second.seed);

        let mut reparsed = ExperimentConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert!(matches!(reparsed.algorithm, AlgoConfig::Aco(_)));
        assert_eq!(reparsed.fix(), first);
    }

    #[test]
    fn widest_config_seed_is_kept() {
        let yaml = SEEDED.replace("seed: 42", &format!("seed: {}", u64::MAX));
        let mut config = ExperimentConfig::from_yaml(&yaml).unwrap();
        let params = config.fix().params().unwrap();

        assert_eq!(params.seed, u64::MAX as u128);
    }

    #[test]
    fn params_are_validated() {
        let mut config =
            ExperimentConfig::from_yaml(&SEEDED.replace("rho: 0.3", "rho: 1.5")).unwrap();

        assert!(matches!(
            config.fix().params(),
            Err(ExperimentConfigError::InvalidAlgorithmConfig(_))
        ));
    }

    #[test]
    fn params_carry_all_fields() {
        let mut config = ExperimentConfig::from_yaml(SEEDED).unwrap();
        let params = config.fix().params().unwrap();

        assert_eq!(params.seed, 42);
        assert_eq!(params.ant_count, 10);
        assert_eq!(params.generations, 20);
        assert_eq!(params.start, StartTown::Fixed(1));
    }

    #[test]
    fn broken_yaml_is_reported() {
        assert!(matches!(
            ExperimentConfig::from_yaml("algorithm: [1, 2"),
            Err(ExperimentConfigError::Parse(_))
        ));
    }

    #[test]
    fn yaml_round_trip_keeps_towns() {
        let mut config = ExperimentConfig::from_yaml(SEEDED).unwrap();
        let mut reparsed = ExperimentConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();

        assert_eq!(reparsed.towns, config.towns);
        assert_eq!(reparsed.fix(), config.fix());
    }
}
