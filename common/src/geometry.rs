// SPDX-License-Identifier: AGPL-3.0-or-later

//! Geometry primitives: points, rectangles, and axis-aligned road strips.
//! Pure value types, no behavior beyond the handful of predicates the
//! motion constrainer and collision resolver need.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Half-width of a road strip, in world units. Part of the game contract,
/// not a tuning knob.
pub const ROAD_HALF_WIDTH: f32 = 0.4;

/// Collision radius for item pickups.
pub const ITEM_PICKUP_RADIUS: f32 = 0.3;

/// Collision radius for office returns.
pub const OFFICE_RETURN_RADIUS: f32 = 0.55;

/// An integer grid point, used for office positions and road endpoints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Orientation of a road segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An axis-aligned road segment. `end` is the coordinate along the road's
/// own axis opposite `start` (an x for a horizontal road, a y for a
/// vertical one).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub orientation: Orientation,
    pub start: Point,
    pub end: i32,
}

impl Road {
    /// The rectangle swept by this road's axis segment, widened by
    /// [`ROAD_HALF_WIDTH`] on every side — the Minkowski sum described in
    /// spec §4.1.
    pub fn strip(&self) -> RoadStrip {
        let (lo, hi) = match self.orientation {
            Orientation::Horizontal => {
                let y = self.start.y as f32;
                let x0 = self.start.x as f32;
                let x1 = self.end as f32;
                (
                    Vec2::new(x0.min(x1), y - ROAD_HALF_WIDTH),
                    Vec2::new(x0.max(x1), y + ROAD_HALF_WIDTH),
                )
            }
            Orientation::Vertical => {
                let x = self.start.x as f32;
                let y0 = self.start.y as f32;
                let y1 = self.end as f32;
                (
                    Vec2::new(x - ROAD_HALF_WIDTH, y0.min(y1)),
                    Vec2::new(x + ROAD_HALF_WIDTH, y0.max(y1)),
                )
            }
        };
        RoadStrip {
            rect: Rect { min: lo, max: hi },
        }
    }
}

/// An axis-aligned rectangle, informational for buildings and derived for
/// road strips.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// A road strip: the rectangle a dog may walk within while "on" a
/// particular road.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadStrip {
    pub rect: Rect,
}

impl RoadStrip {
    pub fn contains(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        self.rect.clamp(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_strip_has_half_width_margin() {
        let road = Road {
            orientation: Orientation::Horizontal,
            start: Point::new(0, 0),
            end: 10,
        };
        let strip = road.strip();
        assert!(strip.contains(Vec2::new(5.0, 0.0)));
        assert!(strip.contains(Vec2::new(0.0, ROAD_HALF_WIDTH)));
        assert!(!strip.contains(Vec2::new(0.0, ROAD_HALF_WIDTH + 0.01)));
        assert!(!strip.contains(Vec2::new(-0.01, 0.0)));
    }

    #[test]
    fn vertical_strip_has_half_width_margin() {
        let road = Road {
            orientation: Orientation::Vertical,
            start: Point::new(3, 0),
            end: 10,
        };
        let strip = road.strip();
        assert!(strip.contains(Vec2::new(3.0, 5.0)));
        assert!(strip.contains(Vec2::new(3.0 - ROAD_HALF_WIDTH, 5.0)));
        assert!(!strip.contains(Vec2::new(3.0 - ROAD_HALF_WIDTH - 0.01, 5.0)));
    }
}
