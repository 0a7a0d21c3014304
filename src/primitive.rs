//! Drawable geometry primitives handed to the rendering layer.
//!
//! Every primitive is a plain value built in one step by its constructor.
//! Display metadata such as a [`DisplayStyle`] is passed in at construction
//! and never attached afterwards.
//!
//! - [`Line`]: a straight segment between two points
//! - [`Polyline`]: an ordered point sequence, open or closed
//! - [`Text`]: a label laid out on a [`Plane`]
//! - [`Primitive`]: the tagged union of the above

use itertools::Itertools;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::geom::Plane;
use crate::settings::UNITS;


/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub units: String,
}

impl Line {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self {
            start,
            end,
            units: UNITS.to_string(),
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// An ordered sequence of points. A closed polyline implies a final segment
/// from the last point back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
    pub closed: bool,
    pub units: String,
}

impl Polyline {
    pub fn open(points: Vec<Point3<f64>>) -> Self {
        Self {
            points,
            closed: false,
            units: UNITS.to_string(),
        }
    }

    pub fn closed(points: Vec<Point3<f64>>) -> Self {
        Self {
            closed: true,
            ..Self::open(points)
        }
    }

    /// Returns every drawn segment, including the implicit closing one.
    pub fn segments(&self) -> Vec<(Point3<f64>, Point3<f64>)> {
        if self.points.len() < 2 {
            return Vec::new();
        }
        if self.closed {
            self.points.iter().copied().circular_tuple_windows().collect()
        } else {
            self.points.iter().copied().tuple_windows().collect()
        }
    }

    pub fn length(&self) -> f64 {
        self.segments().iter().map(|(a, b)| (b - a).norm()).sum()
    }
}

/// Colour and stroke settings for a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub color: i32, // packed ARGB
    pub line_type: String,
    pub line_weight: f64,
    pub units: String,
}

impl DisplayStyle {
    pub fn solid_black() -> Self {
        Self {
            color: 0xFF000000_u32 as i32,
            line_type: "Continuous".to_string(),
            line_weight: 0.0,
            units: UNITS.to_string(),
        }
    }
}

/// A text label laid out on a plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    pub height: f64,
    pub plane: Plane,
    pub units: String,
    pub display_style: DisplayStyle,
}

impl Text {
    pub fn new(value: String, height: f64, plane: Plane, display_style: DisplayStyle) -> Self {
        Self {
            value,
            height,
            plane,
            units: UNITS.to_string(),
            display_style,
        }
    }
}

/// Any drawable geometry emitted by the builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    Line(Line),
    Polyline(Polyline),
    Text(Text),
}

impl Primitive {
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Primitive::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&Polyline> {
        match self {
            Primitive::Polyline(polyline) => Some(polyline),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Primitive::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Primitive::Line(line)
    }
}

impl From<Polyline> for Primitive {
    fn from(polyline: Polyline) -> Self {
        Primitive::Polyline(polyline)
    }
}

impl From<Text> for Primitive {
    fn from(text: Text) -> Self {
        Primitive::Text(text)
    }
}
