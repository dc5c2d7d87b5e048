//! Small geometry types shared between the controller and the GUI

/// Window or image dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Top-left window position in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle (used for the primary screen's work area)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Position that centers `size` inside this rectangle.
    /// Windows larger than the area end up with a negative offset, same as the desktop would.
    pub fn center_of(&self, size: Size) -> Point {
        let dx = (self.width as i64 - size.width as i64) / 2;
        let dy = (self.height as i64 - size.height as i64) / 2;
        Point::new(self.x + dx as i32, self.y + dy as i32)
    }
}
