//! Arena bounds and the geometry that respects them.

use std::f32::consts::{PI, TAU};

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What happens to an entity that crosses an arena edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Positions are clipped to the edge.
    #[default]
    Clamp,
    /// Toroidal topology: leaving one edge re-enters at the opposite one.
    Wrap,
}

/// Rectangular simulation area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Left edge.
    pub x_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Bottom edge.
    pub y_min: f32,
    /// Top edge.
    pub y_max: f32,
    /// Edge policy.
    pub boundary: Boundary,
}

impl Arena {
    /// Arena width.
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// Arena height.
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Draws a uniformly distributed position inside the arena.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f32> {
        let x = rng.gen_range(self.x_min..self.x_max);
        let y = rng.gen_range(self.y_min..self.y_max);
        Array1::from_vec(vec![x, y])
    }

    /// Brings a position back inside the arena according to the edge policy.
    pub fn confine(&self, pos: &mut Array1<f32>) {
        match self.boundary {
            Boundary::Clamp => {
                pos[0] = pos[0].clamp(self.x_min, self.x_max);
                pos[1] = pos[1].clamp(self.y_min, self.y_max);
            }
            Boundary::Wrap => {
                pos[0] = wrap_into(pos[0], self.x_min, self.width());
                pos[1] = wrap_into(pos[1], self.y_min, self.height());
            }
        }
    }

    /// Whether a position lies inside the arena.
    pub fn contains(&self, pos: &Array1<f32>) -> bool {
        (self.x_min..=self.x_max).contains(&pos[0]) && (self.y_min..=self.y_max).contains(&pos[1])
    }

    /// Displacement from `from` to `to`.
    ///
    /// Under [`Boundary::Wrap`] this is the shortest displacement across the
    /// torus.
    pub fn delta(&self, from: &Array1<f32>, to: &Array1<f32>) -> (f32, f32) {
        let mut dx = to[0] - from[0];
        let mut dy = to[1] - from[1];
        if self.boundary == Boundary::Wrap {
            dx = shortest(dx, self.width());
            dy = shortest(dy, self.height());
        }
        (dx, dy)
    }
}

fn wrap_into(value: f32, min: f32, span: f32) -> f32 {
    let wrapped = min + (value - min).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative offsets
    if wrapped >= min + span { min } else { wrapped }
}

fn shortest(d: f32, span: f32) -> f32 {
    let half = span * 0.5;
    if d > half {
        d - span
    } else if d < -half {
        d + span
    } else {
        d
    }
}

/// Wraps an angle into `[-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Bearing of a displacement `(dx, dy)` relative to `heading`, scaled to `[-1, 1]`.
pub fn bearing(heading: f32, dx: f32, dy: f32) -> f32 {
    wrap_angle(dy.atan2(dx) - heading) / PI
}
