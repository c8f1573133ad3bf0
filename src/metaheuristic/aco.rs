mod ant;
mod error;
mod message;
mod observer;
mod params;
mod pheromone;
mod supervisor;

pub use ant::{Ant, AntSolution};
pub use error::AcoError;
pub use message::Message;
pub use observer::{GenerationReport, NoopObserver, Observer};
pub use params::{InitialPheromone, Params, StartTown};
pub use pheromone::{deposit_amount, PheromoneSnapshot, PheromoneTable};
pub use supervisor::{Record, Supervisor};

use crate::graph::{Town, TownGraph};
use crate::metaheuristic::supervisor::Supervisor as _;
use crate::metaheuristic::{Metaheuristic, Tour};
use crate::rng::{rand_index, rng64, split_seed};

use oorandom::Rand64;
use std::io::Write;
use std::thread;
use std::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColonyState {
    Initialized,
    Running,
    Completed,
}

/// Best tour of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColonyResult {
    pub best_tour: Tour,
    pub best_length: f64,
    pub generations: usize,
    pub fallbacks: usize,
    pub degenerate_tours: usize,
    /// Seed the run was started from, enough to replay it.
    pub seed: u128,
}

/// Ant colony over a complete town graph.
///
/// Each generation the ants build their tours against a frozen snapshot of the
/// trails. Only afterwards the table is decayed and every ant deposits
/// `q / tour_length` on each edge it used.
pub struct Aco<W: Write> {
    graph: TownGraph,
    pheromones: PheromoneTable,
    params: Params,
    state: ColonyState,
    generation: usize,
    run_start: usize,
    best_tour: Option<Tour>,
    best_length: f64,
    fallbacks: usize,
    degenerate_tours: usize,
    pub supervisor: Supervisor<W>,
    rng: Rand64,
}

impl<W: Write> Aco<W> {
    /// Builds the town graph and the colony in one step.
    pub fn from_towns(
        towns: Vec<Town>,
        params: Params,
        supervisor: Supervisor<W>,
    ) -> Result<Self, AcoError> {
        Self::new(TownGraph::new(towns)?, params, supervisor)
    }

    pub fn graph(&self) -> &TownGraph {
        &self.graph
    }

    pub fn pheromones(&self) -> &PheromoneTable {
        &self.pheromones
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn state(&self) -> ColonyState {
        self.state
    }

    /// Number of finished generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn best(&self) -> Option<(&Tour, f64)> {
        self.best_tour.as_ref().map(|tour| (tour, self.best_length))
    }

    pub fn result(&self) -> Option<ColonyResult> {
        self.best_tour.as_ref().map(|tour| ColonyResult {
            best_tour: tour.clone(),
            best_length: self.best_length,
            generations: self.generation,
            fallbacks: self.fallbacks,
            degenerate_tours: self.degenerate_tours,
            seed: self.params.seed,
        })
    }

    /// Runs all remaining generations and hands each report to the observer.
    pub fn run(&mut self, observer: &mut dyn Observer) -> Result<ColonyResult, AcoError> {
        while let Some(report) = self.single_iteration()? {
            observer.observe(&report);
        }

        self.result().ok_or_else(|| {
            AcoError::InvalidConfig("The colony finished without building a tour.".to_string())
        })
    }

    /// Decays all trails, then lets every ant deposit on its edges. Tours that
    /// can not deposit a finite amount are skipped and counted.
    fn pheromone_update(&mut self, solutions: &[AntSolution]) -> Result<(f64, usize), AcoError> {
        let evaporated = self.pheromones.decay_all(self.params.rho)?;

        let mut degenerate = 0;
        for solution in solutions {
            match deposit_amount(self.params.q, solution.length) {
                Ok(amount) => {
                    for edge in solution.edges.iter() {
                        self.pheromones.deposit(edge, amount)?;
                    }
                }
                Err(error) if error.is_recoverable() => degenerate += 1,
                Err(error) => return Err(error),
            }
        }

        Ok((evaporated, degenerate))
    }
}

fn start_town(start: StartTown, run_start: usize, order: usize, rng: &mut Rand64) -> usize {
    match start {
        StartTown::Fixed(id) => id,
        StartTown::Random => run_start,
        StartTown::PerAgent => rand_index(rng, order),
    }
}

/// Runs the ants of one generation, on `workers` scoped threads if more than one.
/// Solutions are returned in ant order either way.
fn run_ants(ants: Vec<Ant<'_>>, workers: usize) -> Result<Vec<AntSolution>, AcoError> {
    if workers <= 1 || ants.len() <= 1 {
        return ants.iter().map(Ant::get_solution).collect();
    }

    let ant_count = ants.len();
    let batch_size = (ant_count + workers - 1) / workers;
    let mut batches: Vec<Vec<Ant<'_>>> = Vec::with_capacity(workers);
    for (i, ant) in ants.into_iter().enumerate() {
        if i % batch_size == 0 {
            batches.push(Vec::with_capacity(batch_size));
        }
        if let Some(batch) = batches.last_mut() {
            batch.push(ant);
        }
    }

    thread::scope(|scope| {
        let handles: Vec<_> = batches
            .into_iter()
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(Ant::get_solution)
                        .collect::<Result<Vec<_>, AcoError>>()
                })
            })
            .collect();

        let mut solutions = Vec::with_capacity(ant_count);
        for handle in handles {
            match handle.join() {
                Ok(batch) => solutions.extend(batch?),
                Err(_) => return Err(AcoError::WorkerPanicked),
            }
        }

        Ok(solutions)
    })
}

impl<W: Write> Metaheuristic for Aco<W> {
    type Params = Params;
    type SupervisorType = Supervisor<W>;
    type Report = GenerationReport;
    type Error = AcoError;

    fn new(graph: TownGraph, params: Params, supervisor: Supervisor<W>) -> Result<Self, AcoError> {
        params.validate()?;
        if let StartTown::Fixed(id) = params.start {
            if id >= graph.order() {
                return Err(AcoError::InvalidConfig(format!(
                    "Start town {} is not part of the graph with {} towns.",
                    id,
                    graph.order()
                )));
            }
        }

        let mut rng = rng64(params.seed);
        let pheromones = match params.initial_pheromone {
            InitialPheromone::Uniform(value) => PheromoneTable::uniform(&graph, value)?,
            InitialPheromone::Random => PheromoneTable::random(&graph, &mut rng),
        };
        let run_start = rand_index(&mut rng, graph.order());

        Ok(Aco {
            graph,
            pheromones,
            params,
            state: ColonyState::Initialized,
            generation: 0,
            run_start,
            best_tour: None,
            best_length: f64::INFINITY,
            fallbacks: 0,
            degenerate_tours: 0,
            supervisor,
            rng,
        })
    }

    fn single_iteration(&mut self) -> Result<Option<GenerationReport>, AcoError> {
        if self.state == ColonyState::Completed {
            return Ok(None);
        }
        self.state = ColonyState::Running;

        let snapshot = self.pheromones.snapshot();
        let mut ants = Vec::with_capacity(self.params.ant_count);
        for _ in 0..self.params.ant_count {
            let (sender, id) = self.supervisor.new_ant();
            let start = start_town(
                self.params.start,
                self.run_start,
                self.graph.order(),
                &mut self.rng,
            );
            let seed = split_seed(&mut self.rng);
            ants.push(Ant::new(
                &self.graph,
                &snapshot,
                start,
                self.params.alpha,
                self.params.beta,
                seed,
                self.generation,
                sender,
                id,
            ));
        }
        let mut solutions = run_ants(ants, self.params.workers)?;

        let start_time = Instant::now();
        let (evaporated, degenerate) = self.pheromone_update(&solutions)?;

        let mut generation_best = 0;
        for (i, solution) in solutions.iter().enumerate() {
            if solution.length < solutions[generation_best].length {
                generation_best = i;
            }
        }
        let fallbacks: usize = solutions.iter().map(|solution| solution.fallbacks).sum();
        let best = solutions.swap_remove(generation_best);

        let mut improvements = 0;
        if self.best_tour.is_none() || best.length < self.best_length {
            improvements += 1;
            self.best_tour = Some(best.tour.clone());
            self.best_length = best.length;
        }

        if fallbacks > 0 {
            eprintln!(
                "warning: generation {} fell back to uniform selection {} times",
                self.generation, fallbacks
            );
        }
        self.fallbacks += fallbacks;
        self.degenerate_tours += degenerate;

        let _ = self.supervisor.sender.send(Message::from_colony(
            self.generation,
            degenerate,
            improvements,
            start_time.elapsed(),
            evaporated,
        ));
        self.supervisor
            .finish_generation(self.generation, best.length, self.best_length);

        let report = GenerationReport {
            generation: self.generation,
            towns: best
                .tour
                .names(&self.graph)
                .into_iter()
                .map(String::from)
                .collect(),
            tour: best.tour,
            length: best.length,
            best_length: self.best_length,
            fallbacks,
            degenerate_tours: degenerate,
        };

        self.generation += 1;
        if self.generation >= self.params.generations {
            self.state = ColonyState::Completed;
            self.supervisor.flush(self.generation - 1, self.best_length);
        }

        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;
    use crate::metaheuristic::tour_length;
    use csv::Writer;
    use float_cmp::approx_eq;

    fn supervisor() -> Supervisor<Vec<u8>> {
        Supervisor::new(1, Writer::from_writer(Vec::new()))
    }

    fn triangle() -> Vec<Town> {
        vec![
            Town::new("A", 0.0, 0.0),
            Town::new("B", 10.0, 0.0),
            Town::new("C", 0.0, 10.0),
        ]
    }

    fn scattered() -> Vec<Town> {
        vec![
            Town::new("0", 12.0, 81.0),
            Town::new("1", 55.0, 3.0),
            Town::new("2", 97.0, 40.0),
            Town::new("3", 31.0, 27.0),
            Town::new("4", 70.0, 66.0),
            Town::new("5", 8.0, 49.0),
            Town::new("6", 84.0, 95.0),
            Town::new("7", 43.0, 58.0),
        ]
    }

    fn hexagon() -> Vec<Town> {
        (0..6)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::PI / 3.0;
                Town::new(format!("{}", i), 10.0 * angle.cos(), 10.0 * angle.sin())
            })
            .collect()
    }

    fn params(seed: u128) -> Params {
        Params::new(1.0, 2.0, 0.3, 10.0, Some(seed), 10, 20)
    }

    fn run_collecting(aco: &mut Aco<Vec<u8>>) -> (ColonyResult, Vec<GenerationReport>) {
        let mut reports = Vec::new();
        let result = aco
            .run(&mut |report: &GenerationReport| reports.push(report.clone()))
            .unwrap();

        (result, reports)
    }

    #[test]
    fn three_towns_converge_to_optimum() {
        let mut aco = Aco::from_towns(triangle(), params(1), supervisor()).unwrap();
        let result = aco.run(&mut NoopObserver).unwrap();
        let optimum = 20.0 + 10.0 * 2f64.sqrt();

        assert!((result.best_length - optimum).abs() <= optimum * 0.01);
        assert_eq!(result.generations, 20);
        assert_eq!(result.seed, 1);
    }

    #[test]
    fn two_towns_are_rejected() {
        let towns = vec![Town::new("A", 0.0, 0.0), Town::new("B", 1.0, 0.0)];
        let result = Aco::from_towns(towns, params(1), supervisor());

        assert_eq!(
            result.err(),
            Some(AcoError::Graph(GraphError::InsufficientTowns(2)))
        );
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut invalid = params(1);
        invalid.rho = 1.0;
        assert!(Aco::from_towns(triangle(), invalid, supervisor()).is_err());

        let invalid = params(1).with_start(StartTown::Fixed(3));
        assert!(Aco::from_towns(triangle(), invalid, supervisor()).is_err());
    }

    #[test]
    fn every_tour_is_a_closed_permutation() {
        let mut aco = Aco::from_towns(scattered(), params(5), supervisor()).unwrap();
        let (_, reports) = run_collecting(&mut aco);

        assert_eq!(reports.len(), 20);
        for report in reports.iter() {
            assert!(report.tour.is_closed_permutation(8), "{}", report.tour);
            assert_eq!(report.towns.len(), 9);
            assert_eq!(report.towns.first(), report.towns.last());
        }
    }

    #[test]
    fn reported_lengths_match_recomputed_lengths() {
        let mut aco = Aco::from_towns(scattered(), params(6), supervisor()).unwrap();
        let (result, reports) = run_collecting(&mut aco);

        for report in reports.iter() {
            let recomputed = tour_length(&report.tour, aco.graph()).unwrap();
            assert!(approx_eq!(f64, report.length, recomputed, epsilon = 1e-9));
        }
        let recomputed = tour_length(&result.best_tour, aco.graph()).unwrap();
        assert!(approx_eq!(f64, result.best_length, recomputed, epsilon = 1e-9));
    }

    #[test]
    fn best_length_never_increases() {
        let mut aco = Aco::from_towns(scattered(), params(7), supervisor()).unwrap();
        let (result, reports) = run_collecting(&mut aco);

        for pair in reports.windows(2) {
            assert!(pair[1].best_length <= pair[0].best_length);
        }
        for report in reports.iter() {
            assert!(report.best_length <= report.length);
        }
        assert_eq!(result.best_length, reports[19].best_length);
    }

    #[test]
    fn pheromones_stay_finite_and_non_negative() {
        for &rho in [0.0, 0.3, 0.99].iter() {
            let mut p = params(8);
            p.rho = rho;
            p.generations = 200;
            let mut aco = Aco::from_towns(scattered(), p, supervisor()).unwrap();
            aco.run(&mut NoopObserver).unwrap();

            for (_, weight) in aco.pheromones().iter() {
                assert!(weight.is_finite() && weight >= 0.0, "rho {}: {}", rho, weight);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_tours() {
        let mut first = Aco::from_towns(scattered(), params(9), supervisor()).unwrap();
        let mut second = Aco::from_towns(scattered(), params(9), supervisor()).unwrap();
        let (_, first_reports) = run_collecting(&mut first);
        let (_, second_reports) = run_collecting(&mut second);

        assert_eq!(first_reports, second_reports);
    }

    #[test]
    fn workers_give_same_tours_as_sequential_run() {
        let mut sequential = Aco::from_towns(scattered(), params(10), supervisor()).unwrap();
        let mut parallel =
            Aco::from_towns(scattered(), params(10).with_workers(4), supervisor()).unwrap();
        let (_, sequential_reports) = run_collecting(&mut sequential);
        let (_, parallel_reports) = run_collecting(&mut parallel);

        assert_eq!(sequential_reports, parallel_reports);
    }

    #[test]
    fn hexagon_finds_perimeter() {
        let p = Params::new(1.0, 5.0, 0.4, 10.0, Some(11), 10, 30);
        let mut aco = Aco::from_towns(hexagon(), p, supervisor()).unwrap();
        let result = aco.run(&mut NoopObserver).unwrap();

        assert!(approx_eq!(f64, result.best_length, 60.0, epsilon = 1e-6));
    }

    #[test]
    fn fixed_start_is_used_by_every_ant() {
        let p = params(12).with_start(StartTown::Fixed(3));
        let mut aco = Aco::from_towns(scattered(), p, supervisor()).unwrap();
        let (_, reports) = run_collecting(&mut aco);

        assert!(reports.iter().all(|report| report.tour.start() == Some(3)));
    }

    #[test]
    fn random_start_is_kept_for_the_whole_run() {
        let mut aco = Aco::from_towns(scattered(), params(13), supervisor()).unwrap();
        let (_, reports) = run_collecting(&mut aco);
        let start = reports[0].tour.start();

        assert!(reports.iter().all(|report| report.tour.start() == start));
    }

    #[test]
    fn per_agent_start_varies() {
        let p = params(14).with_start(StartTown::PerAgent);
        let mut aco = Aco::from_towns(scattered(), p, supervisor()).unwrap();
        let (_, reports) = run_collecting(&mut aco);
        let first = reports[0].tour.start();

        assert!(reports.iter().any(|report| report.tour.start() != first));
    }

    #[test]
    fn deposit_goes_to_traversed_edges_only() {
        let mut p = Params::new(1.0, 2.0, 0.5, 10.0, Some(15), 1, 1);
        p.start = StartTown::Fixed(0);
        let mut aco = Aco::from_towns(scattered(), p, supervisor()).unwrap();
        let report = aco.single_iteration().unwrap().unwrap();
        let edges = report.tour.edges(aco.graph()).unwrap();
        let deposit = 10.0 / report.length;

        for edge in aco.graph().iter_edges() {
            let expected = if edges.contains(&edge) {
                0.5 + deposit
            } else {
                0.5
            };
            assert!(approx_eq!(
                f64,
                aco.pheromones().get(&edge).unwrap(),
                expected,
                epsilon = 1e-12
            ));
        }
    }

    #[test]
    fn state_moves_from_initialized_to_completed() {
        let mut p = params(16);
        p.generations = 2;
        let mut aco = Aco::from_towns(triangle(), p, supervisor()).unwrap();
        assert_eq!(aco.state(), ColonyState::Initialized);
        assert!(aco.result().is_none());

        assert!(aco.single_iteration().unwrap().is_some());
        assert_eq!(aco.state(), ColonyState::Running);

        assert!(aco.single_iteration().unwrap().is_some());
        assert_eq!(aco.state(), ColonyState::Completed);
        assert!(aco.single_iteration().unwrap().is_none());
        assert_eq!(aco.generation(), 2);
    }

    #[test]
    fn coincident_towns_keep_pheromones_finite() {
        let mut towns = scattered();
        towns.push(Town::new("8", 12.0, 81.0));
        let mut aco = Aco::from_towns(towns, params(17), supervisor()).unwrap();
        let (result, reports) = run_collecting(&mut aco);

        assert!(result.fallbacks > 0);
        assert_eq!(result.fallbacks, reports.iter().map(|r| r.fallbacks).sum::<usize>());
        assert!(result.best_length.is_finite());
        for (_, weight) in aco.pheromones().iter() {
            assert!(weight.is_finite() && weight >= 0.0);
        }
    }

    #[test]
    fn zero_length_tours_are_skipped_in_deposit() {
        let towns = vec![
            Town::new("A", 1.0, 1.0),
            Town::new("B", 1.0, 1.0),
            Town::new("C", 1.0, 1.0),
        ];
        let mut aco = Aco::from_towns(towns, params(18), supervisor()).unwrap();
        let result = aco.run(&mut NoopObserver).unwrap();

        assert_eq!(result.degenerate_tours, 10 * 20);
        assert_eq!(result.best_length, 0.0);
        for (_, weight) in aco.pheromones().iter() {
            assert!(weight.is_finite() && weight >= 0.0);
        }
    }

    #[test]
    fn supervisor_writes_one_record_per_generation() {
        let mut aco = Aco::from_towns(scattered(), params(19), supervisor()).unwrap();
        let result = aco.run(&mut NoopObserver).unwrap();
        let records = aco.supervisor.records();

        assert_eq!(records.len(), 20);
        assert!(records.iter().all(|record| record.ants == 10));
        assert_eq!(records[19].best_length, result.best_length);
        assert!(records.iter().map(|r| r.improvements).sum::<usize>() >= 1);
    }
}
