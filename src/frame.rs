//! Inertial to Earth fixed and geodetic coordinates
use map_3d::{ecef2geodetic, Ellipsoid};
use nalgebra::Matrix3;
use std::f64::consts::TAU;

use crate::{
    prelude::{Epoch, Vector3},
    time::julian_centuries_ut1,
};

/// Earth fixed and geodetic coordinates of a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    /// ECEF coordinates (km)
    pub ecef: Vector3<f64>,
    /// Geodetic latitude (degrees), [-90, 90]
    pub lat: f64,
    /// Longitude (degrees), (-180, 180]
    pub lon: f64,
    /// Altitude above the WGS84 ellipsoid (km)
    pub alt: f64,
}

/// Greenwich Mean Sidereal Time (IAU-1982) in radians, within [0, 2π[.
pub fn gmst(t: Epoch) -> f64 {
    let tut1 = julian_centuries_ut1(t);
    // seconds of time
    let theta = -6.2E-6 * tut1.powi(3)
        + 0.093104 * tut1.powi(2)
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841;
    // 1s of time = 1/240 deg
    (theta.to_radians() / 240.0).rem_euclid(TAU)
}

/// Rotation matrix about the Z axis
fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Rotates an inertial (TEME) position into the Earth fixed frame.
/// Polar motion is neglected.
pub fn eci_to_ecef(position_inertial: &Vector3<f64>, t: Epoch) -> Vector3<f64> {
    rot_z(gmst(t)) * position_inertial
}

/// Wraps a longitude (degrees) into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Converts ECEF coordinates (km) to geodetic coordinates on the WGS84 ellipsoid.
pub fn ecef_to_geodetic(ecef: &Vector3<f64>) -> Geodetic {
    let (x_m, y_m, z_m) = (ecef[0] * 1.0E3, ecef[1] * 1.0E3, ecef[2] * 1.0E3);
    let (lat_rad, lon_rad, alt_m) = ecef2geodetic(x_m, y_m, z_m, Ellipsoid::WGS84);
    Geodetic {
        ecef: *ecef,
        lat: lat_rad.to_degrees().clamp(-90.0, 90.0),
        lon: normalize_longitude(lon_rad.to_degrees()),
        alt: alt_m / 1.0E3,
    }
}

/// Converts an inertial position (km) at [Epoch] to Earth fixed and geodetic coordinates.
/// This is a pure function of its inputs.
pub fn to_earth_fixed_and_geodetic(position_inertial: &Vector3<f64>, t: Epoch) -> Geodetic {
    let ecef = eci_to_ecef(position_inertial, t);
    ecef_to_geodetic(&ecef)
}

#[cfg(test)]
mod test {
    use super::{ecef_to_geodetic, gmst, normalize_longitude, rot_z};
    use crate::prelude::{Epoch, Vector3};

    #[test]
    fn longitude_wrapping() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(540.0), 180.0);
    }

    #[test]
    fn gmst_j2000() {
        // 18h41m50.548s at J2000
        let t = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        let expected = (18.0 + 41.0 / 60.0 + 50.54841 / 3600.0) * 15.0;
        assert!((gmst(t).to_degrees() - expected).abs() < 1.0E-6);
    }

    #[test]
    fn z_rotation() {
        let r = rot_z(std::f64::consts::FRAC_PI_2) * Vector3::new(1.0, 0.0, 0.0);
        assert!((r - Vector3::new(0.0, -1.0, 0.0)).norm() < 1.0E-12);
    }

    #[test]
    fn equatorial_points() {
        let geo = ecef_to_geodetic(&Vector3::new(6378.137 + 400.0, 0.0, 0.0));
        assert!(geo.lat.abs() < 1.0E-6);
        assert!(geo.lon.abs() < 1.0E-6);
        assert!((geo.alt - 400.0).abs() < 1.0E-3);

        let geo = ecef_to_geodetic(&Vector3::new(0.0, -(6378.137 + 400.0), 0.0));
        assert!((geo.lon + 90.0).abs() < 1.0E-6);
    }
}
