use nalgebra::{Point3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn azimuth_cardinal_directions() {
        assert_relative_eq!(from_azimuth_angle(0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(
            from_azimuth_angle(90.0),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            from_azimuth_angle(180.0),
            Vector3::new(0.0, -1.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            from_azimuth_angle(270.0),
            Vector3::new(-1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn azimuth_wraps_modulo_360() {
        assert_relative_eq!(
            from_azimuth_angle(450.0),
            from_azimuth_angle(90.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            from_azimuth_angle(-90.0),
            from_azimuth_angle(270.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn azimuth_is_unit_and_horizontal() {
        for deg in [0.0, 13.0, 45.0, 137.5, 222.0, 359.9] {
            let v = from_azimuth_angle(deg);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
            assert_eq!(v.z, 0.0);
        }
    }

    #[test]
    fn rotation_is_counter_clockwise_about_z() {
        let pivot = Point3::new(1.0, 1.0, 0.0);
        let point = Point3::new(2.0, 1.0, 0.0);
        let rotated = rotate_about(&point, &Vector3::z(), 90.0, &pivot);
        assert_relative_eq!(rotated, Point3::new(1.0, 2.0, 0.0), epsilon = 1e-12);

        let rotated = rotate_about(&point, &Vector3::z(), -90.0, &pivot);
        assert_relative_eq!(rotated, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_keeps_pivot_distance() {
        let pivot = Point3::new(-3.0, 7.5, 2.0);
        let point = Point3::new(4.0, -1.0, 2.0);
        let before = (point - pivot).norm();
        for angle in [-45.0, 45.0, 123.0, 300.0] {
            let rotated = rotate_about(&point, &Vector3::z(), angle, &pivot);
            assert_relative_eq!((rotated - pivot).norm(), before, epsilon = 1e-9);
            assert_relative_eq!(rotated.z, point.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn non_unit_axis_is_normalised() {
        let pivot = Point3::origin();
        let point = Point3::new(1.0, 0.0, 0.0);
        let a = rotate_about(&point, &Vector3::new(0.0, 0.0, 5.0), 30.0, &pivot);
        let b = rotate_about(&point, &Vector3::z(), 30.0, &pivot);
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn horizontal_plane_drops_z() {
        let plane = Plane::horizontal(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(1.0, 0.0, 0.4),
            Vector3::new(0.0, 1.0, -2.0),
        );
        assert_eq!(plane.origin, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(plane.normal, Vector3::z());
        assert_eq!(plane.x_axis, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(plane.y_axis, Vector3::new(0.0, 1.0, 0.0));
    }
}

/// Converts a compass azimuth in degrees to a horizontal unit vector.
///
/// North (0°) maps to +Y and East (90°) to +X, with angles increasing clockwise
/// when viewed from above. Angles outside `[0, 360)` wrap around.
pub fn from_azimuth_angle(azimuth: f64) -> Vector3<f64> {
    let theta = azimuth.rem_euclid(360.0).to_radians();
    Vector3::new(theta.sin(), theta.cos(), 0.0)
}

/// Rotates `point` by `angle` degrees about `axis` passing through `pivot`.
/// Positive angles follow the right-hand rule. The axis must be non-zero.
pub fn rotate_about(
    point: &Point3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
    pivot: &Point3<f64>,
) -> Point3<f64> {
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle.to_radians());
    pivot + rotation * (point - pivot)
}

/// Projects a vector onto the XY plane.
pub fn flatten(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.y, 0.0)
}

/// Represents an oriented plane, defined by an origin, a normal and two
/// in-plane basis vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub normal: Vector3<f64>,
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
}

impl Plane {
    pub fn from_basis(
        origin: Point3<f64>,
        normal: Vector3<f64>,
        x_axis: Vector3<f64>,
        y_axis: Vector3<f64>,
    ) -> Self {
        Self {
            origin,
            normal,
            x_axis,
            y_axis,
        }
    }

    /// Builds a plane facing +Z whose basis vectors are the XY projections of
    /// `x_dir` and `y_dir`.
    pub fn horizontal(origin: Point3<f64>, x_dir: Vector3<f64>, y_dir: Vector3<f64>) -> Self {
        Self::from_basis(origin, Vector3::z(), flatten(&x_dir), flatten(&y_dir))
    }
}
