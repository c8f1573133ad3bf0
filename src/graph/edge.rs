use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Undirected edge between two towns, identified by their indices.
///
/// The lower index is always stored first, so `Edge::new(a, b, l)` and
/// `Edge::new(b, a, l)` are the same key. The length is computed once when the
/// graph is built and does not take part in equality or hashing.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Edge {
    from: usize,
    to: usize,
    length: f64,
}

impl Edge {
    pub fn new(a: usize, b: usize, length: f64) -> Self {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        Edge { from, to, length }
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn ids(&self) -> (usize, usize) {
        (self.from, self.to)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn contains(&self, id: usize) -> bool {
        self.from == id || self.to == id
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.ids() == other.ids()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.ids().hash(hasher)
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.from
            .cmp(&other.from)
            .then(self.to.cmp(&other.to))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn edges_are_canonical() {
        let ab = Edge::new(0, 3, 2.0);
        let ba = Edge::new(3, 0, 2.0);

        assert_eq!(ab, ba);
        assert_eq!(ba.ids(), (0, 3));
    }

    #[test]
    fn hashing_ignores_direction() {
        let mut set = HashSet::new();
        set.insert(Edge::new(1, 2, 1.0));
        set.insert(Edge::new(2, 1, 1.0));

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn contains_works() {
        let edge = Edge::new(4, 1, 1.0);

        assert!(edge.contains(1));
        assert!(edge.contains(4));
        assert!(!edge.contains(2));
    }
}
