use super::{Point3, Vec3};

/// An oriented plane: origin plus a right-handed orthonormal frame.
///
/// `z_axis` is always `x_axis × y_axis`, so extruding "along the plane"
/// means extruding along `z_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
}

impl Plane {
    /// The world XY plane at the origin.
    pub const WORLD_XY: Self = Self {
        origin: Point3::ORIGIN,
        x_axis: Vec3::X,
        y_axis: Vec3::Y,
        z_axis: Vec3::Z,
    };

    /// Builds a plane from an origin and two in-plane directions.
    ///
    /// `x_dir` is kept (normalized), `y_dir` only selects the half-plane:
    /// the normal is `normalize(x × y)` and the final y axis is recomputed as
    /// `z × x`. Returns `None` if the directions are zero, non-finite or
    /// parallel.
    #[must_use]
    pub fn from_axes(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        let x_axis = x_dir.normalized()?;
        let z_axis = x_axis.cross(y_dir).normalized()?;
        let y_axis = z_axis.cross(x_axis);
        Some(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Point at plane coordinates `(u, v)`.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin
            .add_vec(self.x_axis.mul_scalar(u))
            .add_vec(self.y_axis.mul_scalar(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_axes_orthonormalizes_y() {
        let plane = Plane::from_axes(Point3::ORIGIN, Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.0))
            .expect("valid plane");
        assert_eq!(plane.x_axis, Vec3::X);
        assert_eq!(plane.y_axis, Vec3::Y);
        assert_eq!(plane.z_axis, Vec3::Z);
    }

    #[test]
    fn from_axes_rejects_parallel_directions() {
        assert!(Plane::from_axes(Point3::ORIGIN, Vec3::X, Vec3::new(-4.0, 0.0, 0.0)).is_none());
        assert!(Plane::from_axes(Point3::ORIGIN, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn vertical_x_axis_gives_horizontal_normal() {
        let plane = Plane::from_axes(Point3::ORIGIN, Vec3::Z, Vec3::Y).expect("valid plane");
        assert_eq!(plane.z_axis, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn point_at_maps_plane_coordinates() {
        let plane = Plane::from_axes(Point3::new(10.0, 0.0, 5.0), Vec3::Y, Vec3::new(-1.0, 0.0, 0.0))
            .expect("valid plane");
        assert_eq!(plane.point_at(2.0, 3.0), Point3::new(7.0, 2.0, 5.0));
        assert_eq!(plane.z_axis, Vec3::Z);
    }
}
