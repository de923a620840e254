use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in image pixel coordinates, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_well_formed(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Inclusive test against the box grown by `radius` on every side.
    pub fn contains_expanded(&self, click: Click, radius: u32) -> bool {
        let r = radius as i64;
        let (x, y) = (click.x as i64, click.y as i64);
        x >= self.x1 as i64 - r
            && x <= self.x2 as i64 + r
            && y >= self.y1 as i64 - r
            && y <= self.y2 as i64 + r
    }
}

impl From<[i32; 4]> for Rect {
    fn from(v: [i32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [i32; 4] {
    fn from(r: Rect) -> Self {
        [r.x1, r.y1, r.x2, r.y2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Click {
    pub x: i32,
    pub y: i32,
}

impl Click {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Click {
    fn from(v: [i32; 2]) -> Self {
        Click::new(v[0], v[1])
    }
}

impl From<Click> for [i32; 2] {
    fn from(c: Click) -> Self {
        [c.x, c.y]
    }
}
