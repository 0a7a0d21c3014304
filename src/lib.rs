//! Wind-tunnel annotation synthesis for CFD result visualization.
//!
//! Given a simulation [`Domain`](domain::Domain) this crate builds the
//! geometry drawn over the solver output:
//! - wireframes of the domain and its subdomain ([`wireframe`])
//! - a wind direction arrow with a speed label ([`indicator`])
//! - the insertion point of the result surface mesh ([`annotate`])
//!
//! The builders are pure functions over nalgebra points and vectors. The
//! [`batch`] module drives them over domain description files.

pub mod annotate;
pub mod batch;
pub mod domain;
pub mod error;
pub mod geom;
pub mod indicator;
pub mod output;
pub mod primitive;
pub mod settings;
pub mod wireframe;

pub use annotate::{annotate, Annotations};
pub use domain::Domain;
pub use error::{Error, Result};
pub use indicator::{build_wind_indicator, WindIndicator};
pub use primitive::{DisplayStyle, Line, Polyline, Primitive, Text};
pub use wireframe::build_domain_wireframe;
