use crate::util::{Distance, Point};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Town {
    name: String,
    position: Point,
}

impl Town {
    pub fn new<S: Into<String>>(name: S, x: f64, y: f64) -> Self {
        Town {
            name: name.into(),
            position: Point::new(x, y),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn distance(&self, other: &Town) -> f64 {
        Point::distance(self.position, other.position)
    }
}

impl PartialEq for Town {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.position == other.position
    }
}

impl Eq for Town {}

// Equal towns always share a name, so hashing the name alone is consistent with Eq.
impl Hash for Town {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.name.hash(hasher)
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
