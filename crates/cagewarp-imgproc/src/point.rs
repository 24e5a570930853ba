use std::ops::{Add, Sub};

/// A 2-dimensional point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point<T> {
    /// x-coordinate.
    pub x: T,
    /// y-coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Construct a point at (x, y).
    pub fn new(x: T, y: T) -> Point<T> {
        Point::<T> { x, y }
    }
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Self;

    fn add(self, other: Point<T>) -> Point<T> {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Sub<Output = T>> Sub for Point<T> {
    type Output = Self;

    fn sub(self, other: Point<T>) -> Point<T> {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A 2D point with floating-point coordinates, used for cage vertices
/// and generic geometry.
pub type Point2f = Point<f32>;

/// A 2D point with integer coordinates, used for pixel addressing.
pub type Point2i = Point<i32>;

impl Point2f {
    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2f) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2f, Point2i};

    #[test]
    fn point_ops() {
        let a = Point2i::new(1, 2);
        let b = Point2i::new(3, 5);
        assert_eq!(a + b, Point2i::new(4, 7));
        assert_eq!(b - a, Point2i::new(2, 3));
    }

    #[test]
    fn point_distance() {
        let a = Point2f::new(0.0, 0.0);
        let b = Point2f::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }
}
