use std::ops::{Add, Sub};

/// Integer screen coordinate in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half of the size, rounded down, as an offset.
    pub fn half(self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

/// Axis aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Right and bottom edges are exclusive, so an empty rect contains nothing.
    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x as i64 - self.origin.x as i64;
        let dy = point.y as i64 - self.origin.y as i64;
        dx >= 0 && dy >= 0 && dx < self.size.width as i64 && dy < self.size.height as i64
    }
}
