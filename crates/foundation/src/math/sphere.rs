//! Placement of geographic coordinates on a reference sphere.
//!
//! Convention (right-handed, y up):
//! - polar angle `phi = (90 - lat)` degrees, measured from +y
//! - azimuth `theta = (lon + 180)` degrees
//! - `x = -r sin(phi) cos(theta)`, `y = r cos(phi)`, `z = r sin(phi) sin(theta)`
//!
//! So `(lat 0, lon 0)` lands on +x and the north pole on +y.

use super::{LatLon, Vec3};

/// Projects a coordinate onto a sphere of `reference_radius` centered at the
/// origin, lifted by `altitude_offset` along the surface normal.
///
/// The result is always at distance `reference_radius + altitude_offset` from
/// the origin.
pub fn project(reference_radius: f64, coord: LatLon, altitude_offset: f64) -> Vec3 {
    let phi = (90.0 - coord.lat_deg()).to_radians();
    let theta = (coord.lon_deg() + 180.0).to_radians();
    let r = reference_radius + altitude_offset;

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(
        -r * sin_phi * cos_theta,
        r * cos_phi,
        r * sin_phi * sin_theta,
    )
}

/// [`project`] with no altitude offset.
pub fn project_surface(reference_radius: f64, coord: LatLon) -> Vec3 {
    project(reference_radius, coord, 0.0)
}

#[cfg(test)]
mod tests {
    use super::{project, project_surface};
    use crate::math::{LatLon, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        assert_close(a.x, b.x, eps);
        assert_close(a.y, b.y, eps);
        assert_close(a.z, b.z, eps);
    }

    fn ll(lat: f64, lon: f64) -> LatLon {
        LatLon::new(lat, lon).unwrap()
    }

    #[test]
    fn equator_reference_meridian_is_positive_x() {
        let p = project(1.0, ll(0.0, 0.0), 0.0);
        assert_vec_close(p, Vec3::new(1.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn defaults_place_point_on_equator() {
        let p = project_surface(2.5, LatLon::default());
        assert_vec_close(p, Vec3::new(2.5, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn poles_lie_on_y_axis() {
        assert_vec_close(project(1.0, ll(90.0, 0.0), 0.0), Vec3::new(0.0, 1.0, 0.0), 1e-12);
        assert_vec_close(project(1.0, ll(-90.0, 45.0), 0.0), Vec3::new(0.0, -1.0, 0.0), 1e-12);
    }

    #[test]
    fn east_ninety_is_negative_z() {
        // theta = 270 degrees: sin(theta) = -1, cos(theta) = 0.
        let p = project(1.0, ll(0.0, 90.0), 0.0);
        assert_vec_close(p, Vec3::new(0.0, 0.0, -1.0), 1e-12);
    }

    #[test]
    fn antimeridian_is_negative_x_from_both_sides() {
        assert_vec_close(project(1.0, ll(0.0, 180.0), 0.0), Vec3::new(-1.0, 0.0, 0.0), 1e-12);
        assert_vec_close(project(1.0, ll(0.0, -180.0), 0.0), Vec3::new(-1.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn distance_equals_radius_plus_altitude_over_grid() {
        for &(radius, alt) in &[(1.0, 0.0), (0.6, 0.0), (0.6, 0.5), (6_371.0, 400.0)] {
            let mut lat = -90.0;
            while lat <= 90.0 {
                let mut lon = -180.0;
                while lon <= 180.0 {
                    let p = project(radius, ll(lat, lon), alt);
                    assert_close(p.length(), radius + alt, 1e-9 * (radius + alt));
                    lon += 15.0;
                }
                lat += 7.5;
            }
        }
    }

    #[test]
    fn altitude_lifts_along_the_surface_normal() {
        let coord = ll(18.840_555_555_55, 8.759_722_222);
        let surface = project(0.6, coord, 0.0);
        let lifted = project(0.6, coord, 0.5);
        let scaled = surface * (1.1 / 0.6);
        assert_vec_close(lifted, scaled, 1e-12);
    }
}
