mod aco_experiment;

use serde::{Deserialize, Serialize};

use crate::experiment_config::Fix;
pub use aco_experiment::{AcoExperiment, UnseededAcoExperiment};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum AlgoConfig {
    Aco(AcoExperiment),
    UnseededAco(UnseededAcoExperiment),
}

impl AlgoConfig {
    /// Returns the seeded configuration. An unseeded one draws its seed here
    /// and is replaced by the seeded result, so later calls reuse that seed.
    pub fn fix(&mut self) -> AcoExperiment {
        let fixed = match self {
            AlgoConfig::Aco(aco) => *aco,
            AlgoConfig::UnseededAco(usaco) => usaco.to_fixed(),
        };
        *self = AlgoConfig::Aco(fixed);
        fixed
    }
}
