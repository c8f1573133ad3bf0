use serde::{Deserialize, Serialize};

use crate::graph::Town;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TownConfig {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl TownConfig {
    pub fn to_town(&self) -> Town {
        Town::new(self.name.clone(), self.x, self.y)
    }
}
