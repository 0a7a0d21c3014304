//! Wind direction arrow and speed label.
//!
//! The indicator sits outside the domain on its upstream side. It is made of
//! a shaft, an arrowhead outline pointing back toward the wind source, and a
//! horizontal text label with the wind speed, laid out along the wind
//! direction so it reads consistently for any azimuth.
//!
//! All offsets are in model units and fixed for the rendering scale the
//! annotations are drawn at.

use std::f64::consts::SQRT_2;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Domain;
use crate::error::Result;
use crate::geom::{from_azimuth_angle, rotate_about, Plane};
use crate::primitive::{DisplayStyle, Polyline, Primitive, Text};


/// Distance from the domain's upstream boundary to the arrow tip.
pub const ANCHOR_OFFSET: f64 = 5.0;
/// Length of each arrowhead wing.
pub const WING_LENGTH: f64 = 2.0;
/// Angle of each wing from the shaft, in degrees.
pub const WING_ANGLE: f64 = 45.0;
/// Distance from the tip to the start of the shaft.
pub const SHAFT_START: f64 = SQRT_2;
/// Distance from the tip to the end of the shaft.
pub const SHAFT_END: f64 = 10.0;
/// Distance from the left wing to the label origin.
pub const LABEL_OFFSET: f64 = 20.0;
/// Height of the label text.
pub const LABEL_HEIGHT: f64 = 2.5;

/// Arrow and label describing the wind condition of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindIndicator {
    pub arrow_line: Polyline, // shaft
    pub arrow: Polyline,      // arrowhead outline
    pub text: Text,
}

impl WindIndicator {
    pub fn into_primitives(self) -> Vec<Primitive> {
        vec![self.arrow_line.into(), self.arrow.into(), self.text.into()]
    }
}

/// Builds the wind arrow and speed label for a domain.
///
/// **Context**: The annotated result shows where the wind comes from. The
/// arrow is placed past the domain's half-depth on the upstream side and
/// points back toward the source.
///
/// **How it Works**: The azimuth is turned into the downstream wind vector
/// and reversed. The tip sits `y / 2 + 5` upstream of the center. The two
/// wings are the point 2 units further upstream swung ±45° about the tip
/// around +Z. The shaft runs from `sqrt(2)` to 10 units upstream of the tip.
/// The label lies on a horizontal plane 20 units upstream of the left wing,
/// its x-axis along the downstream wind direction.
pub fn build_wind_indicator(domain: &Domain) -> Result<WindIndicator> {
    domain.validate()?;

    let wind_vector = from_azimuth_angle(domain.wind_direction);
    let vector = -wind_vector;

    let mid = domain.center + vector * (domain.y / 2.0);
    let mid = mid + vector * ANCHOR_OFFSET;

    let up = Vector3::z();
    let wing = mid + vector * WING_LENGTH;
    let point_left = rotate_about(&wing, &up, WING_ANGLE, &mid);
    let point_right = rotate_about(&wing, &up, -WING_ANGLE, &mid);

    let offset_mid_2 = mid + vector * SHAFT_START;
    let offset_mid_10 = mid + vector * SHAFT_END;

    let arrow_line = Polyline::open(vec![offset_mid_2, offset_mid_10]);
    let arrow = Polyline::open(vec![mid, point_left, point_right, mid]);

    let text = speed_label(domain.wind_speed, &vector, &point_left);

    debug!(
        azimuth = domain.azimuth(),
        wind_speed = domain.wind_speed,
        tip = %mid,
        "built wind indicator"
    );

    Ok(WindIndicator {
        arrow_line,
        arrow,
        text,
    })
}

/// Lays out the speed label upstream of the left wing.
fn speed_label(wind_speed: f64, upstream: &Vector3<f64>, point_left: &Point3<f64>) -> Text {
    let x_dir = -upstream;
    let y_dir = -x_dir.cross(&Vector3::z());
    let text_v = point_left + upstream * LABEL_OFFSET;
    let plane = Plane::horizontal(text_v, x_dir, y_dir);

    // -0.0 would print as "-0"
    let wind_speed = wind_speed + 0.0;

    Text::new(
        format!("{} m/s", wind_speed),
        LABEL_HEIGHT,
        plane,
        DisplayStyle::solid_black(),
    )
}
