use std::fmt;

use super::company::{company_profile, CompanyProfile};
use super::correlation::{correlation_matrix, CorrelationMatrix};
use super::distribution::{distribution_input, DistributionVariable, Histogram};
use super::relationship::{relationship_points, ColorDimension, ScatterPlot};
use crate::data::model::{IpoTable, NumericField};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Chart selection → aggregation
// ---------------------------------------------------------------------------

/// The chart layouts the user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    DistributionAnalysis,
    VariableRelationships,
    SubscriptionHeatmap,
    CompanySpecific,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::DistributionAnalysis,
        ChartKind::VariableRelationships,
        ChartKind::SubscriptionHeatmap,
        ChartKind::CompanySpecific,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::DistributionAnalysis => "Distribution Analysis",
            ChartKind::VariableRelationships => "Variable Relationships (Scatter)",
            ChartKind::SubscriptionHeatmap => "Subscription Heatmap",
            ChartKind::CompanySpecific => "Company Specific Analysis",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully parameterised chart request.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartRequest {
    Distribution {
        variable: DistributionVariable,
        bins: usize,
    },
    Relationships {
        x: NumericField,
        y: NumericField,
        color: ColorDimension,
    },
    SubscriptionHeatmap {
        columns: Vec<NumericField>,
    },
    Company {
        name: String,
    },
}

impl ChartRequest {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartRequest::Distribution { .. } => ChartKind::DistributionAnalysis,
            ChartRequest::Relationships { .. } => ChartKind::VariableRelationships,
            ChartRequest::SubscriptionHeatmap { .. } => ChartKind::SubscriptionHeatmap,
            ChartRequest::Company { .. } => ChartKind::CompanySpecific,
        }
    }
}

/// Chart-ready data for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutput {
    Distribution(Histogram),
    Relationships(ScatterPlot),
    Heatmap(CorrelationMatrix),
    Company(Box<CompanyProfile>),
}

/// Run the aggregation a request asks for.
///
/// `filtered` is the year-filtered view every chart draws from; `full` is the
/// whole table, used only for the company view's market average.
pub fn build_chart(full: &IpoTable, filtered: &IpoTable, request: &ChartRequest) -> Result<ChartOutput, AnalysisError> {
    let output = match request {
        ChartRequest::Distribution { variable, bins } => {
            ChartOutput::Distribution(distribution_input(filtered, *variable, *bins))
        }
        ChartRequest::Relationships { x, y, color } => {
            ChartOutput::Relationships(relationship_points(filtered, *x, *y, *color))
        }
        ChartRequest::SubscriptionHeatmap { columns } => {
            ChartOutput::Heatmap(correlation_matrix(filtered, columns)?)
        }
        ChartRequest::Company { name } => {
            ChartOutput::Company(Box::new(company_profile(full, filtered, name)?))
        }
    };
    Ok(output)
}
