use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::time::Duration;

pub trait Supervisor<MessageType: Message> {
    /// Hands out a sender for a new ant together with its id.
    fn new_ant(&mut self) -> (std::sync::mpsc::Sender<MessageType>, usize);
}

pub trait Message {
    fn get_info(&self) -> MessageInfo;
}

/// Counters collected from the messages of one or more generations.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub ants: usize,
    pub evaluations: usize,
    pub fallbacks: usize,
    pub degenerate_tours: usize,
    pub n_improvements: usize,
    pub cpu_time: Duration,
    pub distance: f64,
    pub evaporated: f64,
}

impl Add for MessageInfo {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            ants: self.ants + other.ants,
            evaluations: self.evaluations + other.evaluations,
            fallbacks: self.fallbacks + other.fallbacks,
            degenerate_tours: self.degenerate_tours + other.degenerate_tours,
            n_improvements: self.n_improvements + other.n_improvements,
            cpu_time: self.cpu_time + other.cpu_time,
            distance: self.distance + other.distance,
            evaporated: self.evaporated + other.evaporated,
        }
    }
}

impl AddAssign for MessageInfo {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
