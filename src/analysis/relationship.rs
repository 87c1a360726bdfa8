use chrono::NaiveDate;

use crate::data::model::{IpoTable, NumericField, Status};

/// What a scatter point's colour encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDimension {
    #[default]
    Status,
    Numeric(NumericField),
}

/// Colour value of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorKey {
    Status(Status),
    /// `None` when the row lacks the colouring column.
    Numeric(Option<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub x: f64,
    pub y: f64,
    /// Marker size driver (issue size).
    pub size: Option<f64>,
    pub color: ColorKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub x: NumericField,
    pub y: NumericField,
    pub color: ColorDimension,
    pub points: Vec<ScatterPoint>,
}

impl ScatterPlot {
    /// Min and max of the numeric colour values, if colouring by a number.
    pub fn color_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| match p.color {
                ColorKey::Numeric(v) => v,
                ColorKey::Status(_) => None,
            })
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

pub const DEFAULT_X: NumericField = NumericField::IssueSize;
pub const DEFAULT_Y: NumericField = NumericField::ListingGainsPercent;

/// Scatter input for "y vs x": one point per row with both values present.
pub fn relationship_points(
    table: &IpoTable,
    x: NumericField,
    y: NumericField,
    color: ColorDimension,
) -> ScatterPlot {
    let points = table
        .records()
        .iter()
        .filter_map(|r| {
            let (px, py) = (r.value(x)?, r.value(y)?);
            Some(ScatterPoint {
                name: r.ipo_name.clone(),
                date: r.date,
                x: px,
                y: py,
                size: r.issue_size,
                color: match color {
                    ColorDimension::Status => ColorKey::Status(r.status()),
                    ColorDimension::Numeric(field) => ColorKey::Numeric(r.value(field)),
                },
            })
        })
        .collect();

    ScatterPlot { x, y, color, points }
}
