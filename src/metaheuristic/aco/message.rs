use crate::metaheuristic::supervisor;
use crate::metaheuristic::supervisor::MessageInfo;

use std::time::Duration;

/// Statistics an ant, or the colony itself with id 0, reports for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub ant_id: usize,
    pub generation: usize,
    pub evaluations: usize,
    pub fallbacks: usize,
    pub degenerate_tours: usize,
    pub n_improvements: usize,
    pub cpu_time: Duration,
    pub distance: f64,
    pub evaporated: f64,
}

impl Message {
    /// Report of a finished ant.
    pub fn from_ant(
        ant_id: usize,
        generation: usize,
        evaluations: usize,
        fallbacks: usize,
        cpu_time: Duration,
        distance: f64,
    ) -> Self {
        Self {
            ant_id,
            generation,
            evaluations,
            fallbacks,
            degenerate_tours: 0,
            n_improvements: 0,
            cpu_time,
            distance,
            evaporated: 0.0,
        }
    }

    /// Report of the pheromone update phase.
    pub fn from_colony(
        generation: usize,
        degenerate_tours: usize,
        n_improvements: usize,
        cpu_time: Duration,
        evaporated: f64,
    ) -> Self {
        Self {
            ant_id: 0,
            generation,
            evaluations: 0,
            fallbacks: 0,
            degenerate_tours,
            n_improvements,
            cpu_time,
            distance: 0.0,
            evaporated,
        }
    }

    pub fn id(&self) -> usize {
        self.ant_id
    }

    pub fn is_from_ant(&self) -> bool {
        self.ant_id != 0
    }
}

impl supervisor::Message for Message {
    fn get_info(&self) -> MessageInfo {
        MessageInfo {
            ants: if self.is_from_ant() { 1 } else { 0 },
            evaluations: self.evaluations,
            fallbacks: self.fallbacks,
            degenerate_tours: self.degenerate_tours,
            n_improvements: self.n_improvements,
            cpu_time: self.cpu_time,
            distance: self.distance,
            evaporated: self.evaporated,
        }
    }
}
