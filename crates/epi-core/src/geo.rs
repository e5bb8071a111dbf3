//! Planar geometry for the simulation world.
//!
//! The world is an axis-aligned rectangle in abstract units (the default is
//! the unit square).  Positions and headings share the [`Vec2`] type; roaming
//! areas are [`Bounds`].

use crate::{EpiError, EpiResult};

/// A 2-D vector: a position, a displacement, or a heading.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Heading used when a zero-length vector has to be normalized.
    pub const EAST: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared Euclidean distance; cheaper than [`distance`](Self::distance)
    /// for radius checks.
    #[inline]
    pub fn distance_2(self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Unit vector in the same direction.  Zero-length (or non-finite)
    /// vectors normalize to [`Vec2::EAST`] instead of producing NaN.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len > f64::EPSILON && len.is_finite() {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::EAST
        }
    }

    /// Unit heading at `angle` radians from the +x axis.
    #[inline]
    pub fn from_angle(angle: f64) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`.
///
/// Construct through [`Bounds::new`] (validated) or the config helpers; the
/// fields are `pub` for hot-path reads.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// The unit square.
    pub const UNIT: Bounds = Bounds {
        min: Vec2 { x: 0.0, y: 0.0 },
        max: Vec2 { x: 1.0, y: 1.0 },
    };

    /// Build a rectangle, rejecting degenerate or non-finite corners.
    ///
    /// `field` names the configuration entry the rectangle came from, for
    /// the error message.
    pub fn new(field: &'static str, min: Vec2, max: Vec2) -> EpiResult<Self> {
        let finite = [min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite());
        if !finite {
            return Err(EpiError::config(field, "bounds must be finite"));
        }
        if min.x >= max.x || min.y >= max.y {
            return Err(EpiError::config(
                field,
                format!("malformed bounds: min {min} must be below max {max} on both axes"),
            ));
        }
        Ok(Self { min, max })
    }

    /// Build from per-axis `[min, max]` pairs.
    pub fn from_axes(field: &'static str, x: [f64; 2], y: [f64; 2]) -> EpiResult<Self> {
        Self::new(field, Vec2::new(x[0], y[0]), Vec2::new(x[1], y[1]))
    }

    /// Build from `[x_min, y_min, x_max, y_max]`.
    pub fn from_corners(field: &'static str, c: [f64; 4]) -> EpiResult<Self> {
        Self::new(field, Vec2::new(c[0], c[1]), Vec2::new(c[2], c[3]))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment check.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// `true` if `other` lies entirely inside `self`.
    #[inline]
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Nearest point inside the rectangle.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    /// `[min, max]` along x, the layout of the snapshot's wander columns.
    #[inline]
    pub fn x_range(&self) -> [f64; 2] {
        [self.min.x, self.max.x]
    }

    #[inline]
    pub fn y_range(&self) -> [f64; 2] {
        [self.min.y, self.max.y]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::UNIT
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}
