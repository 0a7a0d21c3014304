//! Full annotation set for one simulated domain.
//!
//! Bundles everything drawn on top of the solver result:
//! - the outline of the whole domain
//! - the outline of the subdomain (region of interest)
//! - the wind arrow and speed label
//! - the anchor point where the result surface mesh is placed
//!
//! The parts do not depend on each other and are built concurrently.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Domain;
use crate::error::Result;
use crate::indicator::{build_wind_indicator, WindIndicator};
use crate::primitive::Primitive;
use crate::wireframe::build_domain_wireframe;


/// Gap between the domain boundary and the result mesh anchor.
pub const RESULT_MARGIN: f64 = 2.0;

/// Every annotation drawn for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub result_anchor: Point3<f64>,
    pub domain_lines: Vec<Primitive>,
    pub subdomain_lines: Vec<Primitive>,
    pub wind_indicator: WindIndicator,
}

impl Annotations {
    /// Returns the primitive groups in drawing order: domain, subdomain, wind.
    pub fn into_groups(self) -> Vec<Vec<Primitive>> {
        vec![
            self.domain_lines,
            self.subdomain_lines,
            self.wind_indicator.into_primitives(),
        ]
    }
}

/// Point where the result surface mesh is inserted: just outside the domain's
/// south-east corner, at the height of the center.
pub fn result_anchor(domain: &Domain) -> Point3<f64> {
    domain.center
        + Vector3::new(
            domain.x / 2.0 + RESULT_MARGIN,
            -domain.y / 2.0 - RESULT_MARGIN,
            0.0,
        )
}

/// Builds all annotations for a domain.
///
/// The wireframes and the wind indicator are built on the rayon pool. The
/// indicator validates the domain's numeric fields and each wireframe its
/// corner count; any invalid-input error fails the whole set.
pub fn annotate(domain: &Domain) -> Result<Annotations> {
    let ((domain_lines, subdomain_lines), wind_indicator) = rayon::join(
        || {
            rayon::join(
                || build_domain_wireframe(&domain.corners),
                || build_domain_wireframe(&domain.subdomain_corners),
            )
        },
        || build_wind_indicator(domain),
    );

    let annotations = Annotations {
        result_anchor: result_anchor(domain),
        domain_lines: domain_lines?,
        subdomain_lines: subdomain_lines?,
        wind_indicator: wind_indicator?,
    };

    debug!(anchor = %annotations.result_anchor, "annotated domain");

    Ok(annotations)
}
