use crate::metaheuristic::Tour;

use serde::Serialize;

/// Outcome of one generation as handed to an observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub generation: usize,
    /// Shortest tour built in this generation.
    pub tour: Tour,
    pub towns: Vec<String>,
    pub length: f64,
    /// Shortest length seen since the start of the run.
    pub best_length: f64,
    pub fallbacks: usize,
    pub degenerate_tours: usize,
}

/// Receives the report of every finished generation, e.g. to print or plot it.
pub trait Observer {
    fn observe(&mut self, report: &GenerationReport);
}

impl<F: FnMut(&GenerationReport)> Observer for F {
    fn observe(&mut self, report: &GenerationReport) {
        self(report)
    }
}

pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _report: &GenerationReport) {}
}
