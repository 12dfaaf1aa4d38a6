//! Value types shared by the kernel: vectors, points, bounds and tolerances.

/// A direction or displacement in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// World up.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero or non-finite
    /// vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len.is_finite() && len > 0.0).then(|| self.div_scalar(len))
    }

    #[must_use]
    pub const fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[must_use]
    pub const fn div_scalar(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s)
    }

    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    #[must_use]
    pub const fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A location in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    #[must_use]
    pub const fn sub_vec(self, v: Vec3) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    /// Displacement from `rhs` to `self`.
    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn midpoint(self, rhs: Self) -> Self {
        Self::new(
            (self.x + rhs.x) * 0.5,
            (self.y + rhs.y) * 0.5,
            (self.z + rhs.z) * 0.5,
        )
    }

    #[must_use]
    pub const fn with_z(self, z: f64) -> Self {
        Self::new(self.x, self.y, z)
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }

    #[must_use]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point3,
    pub max: Point3,
}

impl BBox {
    /// Bounds of `points`, `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self { min: *first, max: *first }, |b, p| Self {
            min: Point3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
            max: Point3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
        }))
    }
}

/// An absolute comparison threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Kernel default for welding and triangulation (1e-9).
    pub const DEFAULT: Self = Self::new(1e-9);
    /// Degenerate vector detection (1e-12).
    pub const ZERO_LENGTH: Self = Self::new(1e-12);
    /// Layout comparisons in model units (1e-6).
    pub const LOOSE: Self = Self::new(1e-6);

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn default_geom() -> Self {
        Self::DEFAULT
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        a.sub_point(b).length_squared() <= self.eps_squared()
    }

    #[must_use]
    pub fn is_zero_vec3(self, v: Vec3) -> bool {
        v.length_squared() <= self.eps_squared()
    }

    /// `true` when `value` is not meaningfully positive.
    #[must_use]
    pub fn is_non_positive(self, value: f64) -> bool {
        value <= self.eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_up_cross_forward_points_left() {
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
        assert_eq!(Vec3::Z.cross(Vec3::Y), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(Vec3::Z.cross(Vec3::Z), Vec3::ZERO);
    }

    #[test]
    fn normalized_rejects_zero_and_nan() {
        assert!(Vec3::ZERO.normalized().is_none());
        assert!(Vec3::new(f64::NAN, 0.0, 0.0).normalized().is_none());
        let n = Vec3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert_eq!(n, Vec3::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn point_helpers() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(4.0, 6.0, 3.0);
        assert_eq!(q.sub_point(p), Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(p.distance_to(q), 5.0);
        assert_eq!(p.midpoint(q), Point3::new(2.5, 4.0, 3.0));
        assert_eq!(p.with_z(9.0).add_vec(Vec3::Z), Point3::new(1.0, 2.0, 10.0));
    }

    #[test]
    fn bbox_spans_all_points() {
        let bbox = BBox::from_points(&[
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(2.0, 0.0, 6.0),
            Point3::new(1.0, 1.0, -1.0),
        ])
        .unwrap();
        assert_eq!(bbox.min, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(bbox.max, Point3::new(2.0, 4.0, 6.0));
        assert!(BBox::from_points(&[]).is_none());
    }

    #[test]
    fn tolerance_comparisons() {
        let tol = Tolerance::LOOSE;
        assert!(tol.is_non_positive(1e-7));
        assert!(tol.is_non_positive(-3.0));
        assert!(!tol.is_non_positive(1e-5));
        assert!(tol.approx_eq_f64(1.0, 1.0 + 1e-7));
        assert!(Tolerance::ZERO_LENGTH.is_zero_vec3(Vec3::new(1e-13, 0.0, 0.0)));
    }
}
