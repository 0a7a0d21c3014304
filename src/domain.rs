//! The wind-tunnel simulation domain as produced by domain construction.
//!
//! A [`Domain`] is read-only input to the annotation builders. It is usually
//! deserialized from a JSON document where points are `[x, y, z]` arrays.

use std::{fs::File, io::BufReader, path::Path};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[cfg(test)]
mod tests {

    use super::*;

    fn box_corners(x: f64, y: f64, z: f64) -> Vec<Point3<f64>> {
        let (hx, hy) = (x / 2.0, y / 2.0);
        let ring = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];
        ring.iter()
            .map(|&(px, py)| Point3::new(px, py, 0.0))
            .chain(ring.iter().map(|&(px, py)| Point3::new(px, py, z)))
            .collect()
    }

    fn domain() -> Domain {
        Domain {
            center: Point3::new(0.0, 0.0, 0.0),
            x: 100.0,
            y: 80.0,
            z: 30.0,
            wind_direction: 0.0,
            wind_speed: 10.0,
            corners: box_corners(100.0, 80.0, 30.0),
            subdomain_corners: box_corners(40.0, 30.0, 15.0),
        }
    }

    #[test]
    fn valid_domain_passes() {
        assert!(domain().validate().is_ok());
    }

    #[test]
    fn zero_depth_is_accepted() {
        let mut d = domain();
        d.y = 0.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn negative_wind_speed_is_rejected() {
        let mut d = domain();
        d.wind_speed = -1.0;
        assert!(matches!(d.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        let mut d = domain();
        d.wind_speed = f64::INFINITY;
        assert!(d.validate().is_err());

        let mut d = domain();
        d.x = f64::NAN;
        assert!(d.validate().is_err());

        let mut d = domain();
        d.wind_direction = f64::NAN;
        assert!(d.validate().is_err());

        let mut d = domain();
        d.center = Point3::new(0.0, f64::NEG_INFINITY, 0.0);
        assert!(d.validate().is_err());
    }

    #[test]
    fn negative_depth_is_rejected() {
        let mut d = domain();
        d.y = -5.0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn azimuth_is_normalised() {
        let mut d = domain();
        d.wind_direction = 370.0;
        assert_eq!(d.azimuth(), 10.0);
        d.wind_direction = -90.0;
        assert_eq!(d.azimuth(), 270.0);
    }

    #[test]
    fn parses_point_arrays() {
        let json = r#"{
            "center": [1.0, 2.0, 3.0],
            "x": 10.0, "y": 20.0, "z": 5.0,
            "wind_direction": 45.0,
            "wind_speed": 12.5,
            "corners": [[0,0,0],[1,0,0],[1,1,0],[0,1,0],[0,0,1],[1,0,1],[1,1,1],[0,1,1]],
            "subdomain_corners": [[0,0,0],[1,0,0],[1,1,0],[0,1,0],[0,0,1],[1,0,1],[1,1,1],[0,1,1]]
        }"#;
        let d = Domain::from_json(json).unwrap();
        assert_eq!(d.center, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(d.corners.len(), 8);
        assert_eq!(d.corners[6], Point3::new(1.0, 1.0, 1.0));
    }
}

/// Rectangular simulation volume with the wind condition attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub center: Point3<f64>,
    pub x: f64, // full extent along X
    pub y: f64, // full extent along Y
    pub z: f64, // full extent along Z
    pub wind_direction: f64, // azimuth in degrees, North = 0, East = 90
    pub wind_speed: f64,     // m/s
    /// Floor ring (0..4) followed by ceiling ring (4..8); corner `i` lies below `i + 4`.
    pub corners: Vec<Point3<f64>>,
    /// Inner region of interest, same layout as `corners`.
    pub subdomain_corners: Vec<Point3<f64>>,
}

impl Domain {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Wind direction wrapped into `[0, 360)`.
    pub fn azimuth(&self) -> f64 {
        self.wind_direction.rem_euclid(360.0)
    }

    /// Checks the numeric fields read by the wind indicator.
    ///
    /// Corner counts are checked by the wireframe builder itself.
    pub fn validate(&self) -> Result<()> {
        if !self.center.iter().all(|c| c.is_finite()) {
            return Err(Error::invalid(format!(
                "domain center must be finite, got {}",
                self.center
            )));
        }
        for (name, value) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !value.is_finite() {
                return Err(Error::invalid(format!(
                    "domain extent {} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.y < 0.0 {
            return Err(Error::invalid(format!(
                "domain extent y must be non-negative, got {}",
                self.y
            )));
        }
        if !self.wind_direction.is_finite() {
            return Err(Error::invalid(format!(
                "wind direction must be finite, got {}",
                self.wind_direction
            )));
        }
        if !self.wind_speed.is_finite() || self.wind_speed < 0.0 {
            return Err(Error::invalid(format!(
                "wind speed must be a finite non-negative number, got {}",
                self.wind_speed
            )));
        }
        Ok(())
    }
}
