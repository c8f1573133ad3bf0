pub mod aco;
mod supervisor;
mod tour;

use crate::graph::TownGraph;
pub use aco::Aco;
pub use supervisor::{Message, MessageInfo, Supervisor};
pub use tour::{tour_length, Tour};

pub trait Metaheuristic: Sized {
    type Params;
    type SupervisorType;
    type Report;
    type Error;

    fn new(
        graph: TownGraph,
        params: Self::Params,
        supervisor: Self::SupervisorType,
    ) -> Result<Self, Self::Error>;

    /// Runs one iteration, returns `None` once the iteration budget is used up.
    fn single_iteration(&mut self) -> Result<Option<Self::Report>, Self::Error>;
}
