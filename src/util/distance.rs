use crate::util::Point;

pub trait Distance<T> {
    fn distance(p1: T, p2: T) -> f64;
}

impl Distance<Point> for Point {
    /// Euclidean distance in the plane.
    fn distance(p1: Point, p2: Point) -> f64 {
        (p1.x - p2.x).hypot(p1.y - p2.y)
    }
}
