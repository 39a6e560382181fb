/// Screen-space point in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on `center`
    pub fn centered_on(center: Point, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2;
        self.y = center.y - self.height / 2;
    }

    pub fn set_center_x(&mut self, x: i32) {
        self.x = x - self.width / 2;
    }

    pub fn set_bottom(&mut self, y: i32) {
        self.y = y - self.height;
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
