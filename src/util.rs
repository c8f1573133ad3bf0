mod distance;
mod point;

pub use distance::Distance;
pub use point::Point;
