use serde::{Serialize, Deserialize};

/// Screen-space coordinate produced by perspective projection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer pixel coordinate handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for Point {
    /// Truncates toward zero and saturates at the `i16` range (NaN maps to 0).
    fn from(v: Vec2) -> Self {
        Self {
            x: v.x as i16,
            y: v.y as i16,
        }
    }
}
