use serde::{Deserialize, Serialize};

fn default_aggregation_rate() -> usize {
    1
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GeneralExperimentConfig {
    /// Number of generations summed up in one statistics record.
    #[serde(default = "default_aggregation_rate")]
    pub aggregation_rate: usize,
}

impl Default for GeneralExperimentConfig {
    fn default() -> Self {
        GeneralExperimentConfig {
            aggregation_rate: default_aggregation_rate(),
        }
    }
}
