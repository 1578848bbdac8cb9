use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Wraps an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// A point or direction in the plane, in grid units.
///
/// `Vector2D` is a plain value type: every operation returns a new vector and
/// nothing is ever shared mutably. Headings are measured in degrees from the
/// +x axis, counter-clockwise, and always reported in `[0, 360)`.
///
/// # Examples
/// ```
/// use retina_data::Vector2D;
///
/// let soma = Vector2D::zero();
/// let tip = soma + Vector2D::from_heading(90.0) * 15.0;
/// assert!((soma.angle_heading_to(tip) - 90.0).abs() < 1e-9);
/// assert!((soma.distance_to(tip) - 15.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `degrees`.
    #[inline]
    pub fn from_heading(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) * 0.5
    }

    /// Normalized direction from `self` towards `other`.
    ///
    /// Returns the zero vector when both points coincide.
    pub fn unit_heading_to(self, other: Self) -> Self {
        let delta = other - self;
        let length = delta.length();
        if length <= f64::EPSILON {
            Self::zero()
        } else {
            delta * (1.0 / length)
        }
    }

    /// Heading in degrees, `[0, 360)`, from `self` towards `other`.
    pub fn angle_heading_to(self, other: Self) -> f64 {
        let delta = other - self;
        normalize_heading(delta.y.atan2(delta.x).to_degrees())
    }

    /// Snaps to the nearest integer grid location.
    #[inline]
    pub fn rounded(self) -> GridPoint {
        GridPoint::new(self.x.round() as i32, self.y.round() as i32)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2D {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// An integer grid location produced by discretization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vector(self) -> Vector2D {
        Vector2D::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Collision proxy for one grown edge: a disk through both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingCircle {
    pub radius: f64,
    pub center: Vector2D,
}

impl BoundingCircle {
    /// Circle spanning the edge `a -> b`.
    pub fn spanning(a: Vector2D, b: Vector2D) -> Self {
        Self {
            radius: a.distance_to(b) * 0.5,
            center: a.midpoint(b),
        }
    }

    /// Whether a disk of `radius` around `point` touches this circle.
    #[inline]
    pub fn intersects_disk(&self, point: Vector2D, radius: f64) -> bool {
        self.center.distance_to(point) <= self.radius + radius
    }
}
