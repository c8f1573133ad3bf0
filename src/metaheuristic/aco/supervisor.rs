use crate::metaheuristic::aco;
use crate::metaheuristic::supervisor;
use crate::metaheuristic::supervisor::{Message, MessageInfo};

use csv::Writer;
use serde::{Deserialize, Serialize};
use std::io::{stderr, Stderr, Write};
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};

/// One row of the statistics written by the supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub generation: usize,
    pub ants: usize,
    pub evaluations: usize,
    pub fallbacks: usize,
    pub degenerate_tours: usize,
    pub improvements: usize,
    pub cpu_time_us: u64,
    pub evaporated: f64,
    pub mean_length: f64,
    pub generation_best: f64,
    pub best_length: f64,
}

/// Collects the messages of all ants and writes one csv record every
/// `aggregation_rate` generations.
pub struct Supervisor<W: Write> {
    pub sender: Sender<aco::Message>,
    receiver: Receiver<aco::Message>,
    ants: usize,
    aggregation_rate: usize,
    pending: MessageInfo,
    pending_generations: usize,
    generation_best: f64,
    records: Vec<Record>,
    writer: Writer<W>,
}

impl<W: Write> Supervisor<W> {
    pub fn new(aggregation_rate: usize, writer: Writer<W>) -> Self {
        let (tx, rx) = mpsc::channel();
        Supervisor {
            sender: tx,
            receiver: rx,
            ants: 0,
            aggregation_rate: aggregation_rate.max(1),
            pending: MessageInfo::default(),
            pending_generations: 0,
            generation_best: f64::INFINITY,
            records: Vec::new(),
            writer,
        }
    }

    /// Drains all messages of the finished generation. Every `aggregation_rate`
    /// generations the aggregate is written out.
    pub fn finish_generation(&mut self, generation: usize, generation_best: f64, best_length: f64) {
        for message in self.receiver.try_iter() {
            self.pending += message.get_info();
        }
        self.pending_generations += 1;
        if generation_best < self.generation_best {
            self.generation_best = generation_best;
        }

        if self.pending_generations >= self.aggregation_rate {
            self.write_record(generation, best_length);
        }
    }

    /// Writes whatever has been aggregated since the last record.
    pub fn flush(&mut self, generation: usize, best_length: f64) {
        if self.pending_generations > 0 {
            self.write_record(generation, best_length);
        }
        if let Err(err) = self.writer.flush() {
            eprintln!("{:?}", err);
        }
    }

    fn write_record(&mut self, generation: usize, best_length: f64) {
        let info = self.pending;
        let record = Record {
            generation,
            ants: info.ants,
            evaluations: info.evaluations,
            fallbacks: info.fallbacks,
            degenerate_tours: info.degenerate_tours,
            improvements: info.n_improvements,
            cpu_time_us: info.cpu_time.as_micros() as u64,
            evaporated: info.evaporated,
            mean_length: if info.ants > 0 {
                info.distance / info.ants as f64
            } else {
                0.0
            },
            generation_best: self.generation_best,
            best_length,
        };

        let res = self.writer.serialize(&record);
        if let Err(err) = res {
            eprintln!("{:?}", err);
        }

        self.records.push(record);
        self.pending = MessageInfo::default();
        self.pending_generations = 0;
        self.generation_best = f64::INFINITY;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn ants(&self) -> usize {
        self.ants
    }

    /// Returns the underlying writer, flushing it first.
    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }
}

impl<W: Write> supervisor::Supervisor<aco::Message> for Supervisor<W> {
    fn new_ant(&mut self) -> (Sender<aco::Message>, usize) {
        self.ants += 1;
        let id = self.ants;

        (self.sender.clone(), id)
    }
}

impl Default for Supervisor<Stderr> {
    fn default() -> Self {
        Supervisor::new(1, Writer::from_writer(stderr()))
    }
}
