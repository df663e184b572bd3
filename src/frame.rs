//! Reference frame transforms: inertial (ECI) to Earth fixed (ECF),
//! and Earth fixed to the observer topocentric (South East Zenith) frame.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use map_3d::{geodetic2ecef, Ellipsoid};
use nalgebra::{Matrix3, Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{cfg::Error, time::sidereal_time};

/// Rotates an inertial position into the Earth fixed frame,
/// at given sidereal angle (rad). The polar (z) component is unchanged.
pub fn eci_to_ecf(position: &Vector3<f64>, sidereal_angle: f64) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -sidereal_angle) * position
}

/// Earth fixed position (km) of geodetic coordinates (rad, rad, km),
/// on the WGS-72 ellipsoid the element sets are expressed against.
pub fn geodetic_to_ecf(latitude: f64, longitude: f64, height_km: f64) -> Vector3<f64> {
    let (x, y, z) = geodetic2ecef(latitude, longitude, height_km * 1.0E3, Ellipsoid::WGS72);
    Vector3::new(x, y, z) / 1.0E3
}

/// Observation geometry, from the ground site to the target
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LookAngles {
    /// Azimuth (rad), clockwise from north, within [0, 2π)
    pub azimuth: f64,
    /// Elevation above the local horizon (rad), within [-π/2, π/2]
    pub elevation: f64,
    /// Slant range (km)
    pub range: f64,
}

impl LookAngles {
    /// Azimuth, in degrees within [0, 360)
    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth.to_degrees().rem_euclid(360.0)
    }

    /// Elevation, in degrees within [-90, 90]
    pub fn elevation_deg(&self) -> f64 {
        self.elevation.to_degrees()
    }

    /// True when both angles are resolved
    pub fn is_finite(&self) -> bool {
        self.azimuth.is_finite() && self.elevation.is_finite() && self.range.is_finite()
    }
}

/// Ground [Observer]. Everything the topocentric projection needs
/// is computed once, the [Observer] is then reused for all evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic latitude (rad)
    latitude: f64,
    /// Longitude (rad)
    longitude: f64,
    /// Height above ellipsoid (km)
    height_km: f64,
    sin_lat: f64,
    cos_lat: f64,
    /// Site coordinates, Earth fixed (km)
    ecf: Vector3<f64>,
    /// Earth fixed to South East Zenith projection
    ecf_to_sez: Matrix3<f64>,
}

impl Observer {
    /// Builds a new [Observer] from geodetic coordinates in radians
    /// and height above the ellipsoid in kilometers.
    /// Latitude must lie within [-π/2, π/2], longitude within [-π, 2π).
    pub fn new(latitude: f64, longitude: f64, height_km: f64) -> Result<Self, Error> {
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&latitude) {
            return Err(Error::InvalidLatitude(latitude.to_degrees()));
        }
        if !(-PI..TAU).contains(&longitude) {
            return Err(Error::InvalidLongitude(longitude.to_degrees()));
        }
        if !height_km.is_finite() {
            return Err(Error::InvalidHeight(height_km));
        }

        let (sin_lat, cos_lat) = latitude.sin_cos();
        let (sin_lon, cos_lon) = longitude.sin_cos();

        #[rustfmt::skip]
        let ecf_to_sez = Matrix3::new(
            sin_lat * cos_lon, sin_lat * sin_lon, -cos_lat,
            -sin_lon,          cos_lon,           0.0,
            cos_lat * cos_lon, cos_lat * sin_lon, sin_lat,
        );

        Ok(Self {
            latitude,
            longitude,
            height_km,
            sin_lat,
            cos_lat,
            ecf: geodetic_to_ecf(latitude, longitude, height_km),
            ecf_to_sez,
        })
    }

    /// Builds a new [Observer] from latitude and longitude in degrees,
    /// and height above the ellipsoid in kilometers.
    /// Longitude must lie within [-180, 360).
    pub fn from_degrees(
        latitude_deg: f64,
        longitude_deg: f64,
        height_km: f64,
    ) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(Error::InvalidLatitude(latitude_deg));
        }
        if !(-180.0..360.0).contains(&longitude_deg) {
            return Err(Error::InvalidLongitude(longitude_deg));
        }
        Self::new(latitude_deg.to_radians(), longitude_deg.to_radians(), height_km)
    }

    /// Geodetic latitude (rad)
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude (rad)
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Height above ellipsoid (km)
    pub fn height_km(&self) -> f64 {
        self.height_km
    }

    pub fn sin_latitude(&self) -> f64 {
        self.sin_lat
    }

    pub fn cos_latitude(&self) -> f64 {
        self.cos_lat
    }

    /// Site coordinates, Earth fixed (km)
    pub fn ecf(&self) -> Vector3<f64> {
        self.ecf
    }

    /// [LookAngles] to given Earth fixed position (km).
    pub fn look_angles(&self, ecf: &Vector3<f64>) -> LookAngles {
        let sez = self.ecf_to_sez * (ecf - self.ecf);
        let (south, east, zenith) = (sez[0], sez[1], sez[2]);

        let range = sez.norm();
        let elevation = (zenith / range).clamp(-1.0, 1.0).asin();
        let azimuth = ((-east).atan2(south) + PI).rem_euclid(TAU);

        LookAngles {
            azimuth,
            elevation,
            range,
        }
    }

    /// [LookAngles] to given inertial position (km), at given Julian Date.
    pub fn look_at(&self, eci: &Vector3<f64>, jd: f64) -> LookAngles {
        let ecf = eci_to_ecf(eci, sidereal_time(jd));
        self.look_angles(&ecf)
    }
}
