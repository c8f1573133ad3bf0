use crate::graph::{Edge, TownGraph};
use crate::metaheuristic::aco::{AcoError, Message, PheromoneSnapshot};
use crate::metaheuristic::Tour;
use crate::rng::{rand_index, rng64};

use std::sync::mpsc::Sender;
use std::time::Instant;

/// Builds one tour over all towns of a graph, reading trails from a snapshot.
pub struct Ant<'a> {
    graph: &'a TownGraph,
    pheromones: &'a PheromoneSnapshot,
    start: usize,
    alpha: f64,
    beta: f64,
    rng_seed: u128,
    generation: usize,
    sender: Sender<Message>,
    id: usize,
}

impl<'a> Ant<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        graph: &'a TownGraph,
        pheromones: &'a PheromoneSnapshot,
        start: usize,
        alpha: f64,
        beta: f64,
        rng_seed: u128,
        generation: usize,
        sender: Sender<Message>,
        id: usize,
    ) -> Self {
        Ant {
            graph,
            pheromones,
            start,
            alpha,
            beta,
            rng_seed,
            generation,
            sender,
            id,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// `tau^alpha * (1 / length)^beta` for the edge between `from` and `to`.
    fn weight(&self, from: usize, to: usize) -> Result<f64, AcoError> {
        let pheromone = self.pheromones.get(from, to)?;
        let length = self.graph.length(from, to)?;

        Ok(pheromone.powf(self.alpha) * (1.0 / length).powf(self.beta))
    }

    /// Picks the next town by walking the candidates in the given order and
    /// subtracting each probability from `draw` until it drops below zero.
    fn select(
        &self,
        current: usize,
        candidates: &[usize],
        draw: f64,
        evaluations: &mut usize,
    ) -> Result<usize, AcoError> {
        let mut weights = Vec::with_capacity(candidates.len());
        for &candidate in candidates {
            weights.push(self.weight(current, candidate)?);
            *evaluations += 1;
        }

        let weight_sum: f64 = weights.iter().sum();
        if !weight_sum.is_finite() || weight_sum <= 0.0 {
            return Err(AcoError::ProbabilityCollapse(weight_sum));
        }

        let mut remaining = draw;
        for (&candidate, weight) in candidates.iter().zip(weights.iter()) {
            remaining -= weight / weight_sum;
            if remaining < 0.0 {
                return Ok(candidate);
            }
        }

        // rounding left a tiny rest of the draw, the last candidate absorbs it
        candidates
            .last()
            .copied()
            .ok_or(AcoError::ProbabilityCollapse(weight_sum))
    }

    /// Walks from the start town through every other town and back.
    ///
    /// A collapsed probability distribution is not fatal, the next town is then
    /// drawn uniformly from the unvisited ones and the fallback is counted.
    pub fn get_solution(&self) -> Result<AntSolution, AcoError> {
        let start_time = Instant::now();
        let order = self.graph.order();
        if self.start >= order {
            return Err(AcoError::InvalidConfig(format!(
                "Start town {} is not part of the graph.",
                self.start
            )));
        }

        let mut rng = rng64(self.rng_seed);
        let mut evaluations = 0;
        let mut fallbacks = 0;
        let mut visited = vec![false; order];
        let mut tour = Tour::with_capacity(order + 1);
        let mut edges: Vec<Edge> = Vec::with_capacity(order);
        let mut length = 0.0;
        let mut candidates = Vec::with_capacity(order);

        visited[self.start] = true;
        tour.push_node(self.start);
        let mut current = self.start;

        for _ in 1..order {
            candidates.clear();
            candidates.extend((0..order).filter(|&id| !visited[id]));

            let draw = rng.rand_float();
            let next = match self.select(current, &candidates, draw, &mut evaluations) {
                Ok(next) => next,
                Err(error) if error.is_recoverable() => {
                    fallbacks += 1;
                    candidates[rand_index(&mut rng, candidates.len())]
                }
                Err(error) => return Err(error),
            };

            let edge = self.graph.edge(current, next)?;
            length += edge.length();
            edges.push(edge);
            visited[next] = true;
            tour.push_node(next);
            current = next;
        }

        let closing = self.graph.edge(current, self.start)?;
        length += closing.length();
        edges.push(closing);
        tour.close();

        let _res = self.sender.send(Message::from_ant(
            self.id,
            self.generation,
            evaluations,
            fallbacks,
            start_time.elapsed(),
            length,
        ));

        Ok(AntSolution {
            tour,
            length,
            edges,
            fallbacks,
            evaluations,
        })
    }
}

/// Result of one ant, folded into the pheromone table and then dropped.
#[derive(Debug, Clone)]
pub struct AntSolution {
    pub tour: Tour,
    pub length: f64,
    pub edges: Vec<Edge>,
    pub fallbacks: usize,
    pub evaluations: usize,
}
