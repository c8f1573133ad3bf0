use csv::Writer;
use std::io::Write;

use crate::experiment_config::{ExperimentConfig, ExperimentConfigError};
use crate::graph::TownGraph;
use crate::metaheuristic::aco::{ColonyResult, Observer, Supervisor};
use crate::metaheuristic::{Aco, Metaheuristic};

pub struct Experiment {}

impl Experiment {
    /// Builds a colony for the given config. Statistics go to `writer`.
    ///
    /// An unseeded config is fixed first, afterwards it holds the seed the
    /// colony runs with.
    pub fn build<W: Write>(
        config: &mut ExperimentConfig,
        writer: Writer<W>,
    ) -> Result<Aco<W>, ExperimentConfigError> {
        let params = config.fix().params()?;
        let graph = TownGraph::new(config.towns())?;
        let supervisor = Supervisor::new(config.experiment.aggregation_rate, writer);

        Ok(Aco::new(graph, params, supervisor)?)
    }

    /// Runs the configured colony to completion.
    pub fn run<W: Write>(
        config: &mut ExperimentConfig,
        writer: Writer<W>,
        observer: &mut dyn Observer,
    ) -> Result<ColonyResult, ExperimentConfigError> {
        let mut aco = Self::build(config, writer)?;
        Ok(aco.run(observer)?)
    }
}
