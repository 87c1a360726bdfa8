use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::company::company_names;
use crate::analysis::dispatch::{build_chart, ChartKind, ChartOutput, ChartRequest};
use crate::analysis::distribution::{clamp_bins, DistributionVariable};
use crate::analysis::kpi::{summary_kpis, SummaryKpis};
use crate::analysis::relationship::{ColorDimension, DEFAULT_X, DEFAULT_Y};
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::filter::{available_years, filter_by_year, YearSelection};
use crate::data::loader::LoadOutcome;
use crate::data::model::{IpoTable, NumericField};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Per-chart user selections
// ---------------------------------------------------------------------------

/// Sub-selections solicited for each chart kind. Kept across chart switches.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSelections {
    pub dist_variable: DistributionVariable,
    pub bins: usize,
    pub x: NumericField,
    pub y: NumericField,
    pub color: ColorDimension,
    pub heatmap_columns: Vec<NumericField>,
    pub company: Option<String>,
}

impl ChartSelections {
    fn from_config(config: &DashboardConfig) -> Self {
        Self {
            dist_variable: DistributionVariable::default(),
            bins: config.bins(),
            x: DEFAULT_X,
            y: DEFAULT_Y,
            color: ColorDimension::Status,
            heatmap_columns: config.heatmap_fields(),
            company: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    cache: DatasetCache,

    /// Currently loaded source.
    pub source: PathBuf,

    /// Memoized load result (possibly an empty table plus an error).
    pub outcome: Arc<LoadOutcome>,

    /// Selectable listing years of the loaded table.
    pub years: Vec<i32>,

    /// Selected years; empty means "all rows".
    pub selected_years: YearSelection,

    /// Rows passing the year filter (cached).
    pub filtered: IpoTable,

    /// Snapshot metrics of `filtered` (cached).
    pub kpis: SummaryKpis,

    pub chart_kind: ChartKind,
    pub selections: ChartSelections,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and load the configured data file.
    pub fn new(config: DashboardConfig) -> Self {
        let mut cache = DatasetCache::new();
        let source = config.data_path.clone();
        let outcome = cache.get_or_load(&source);
        let selections = ChartSelections::from_config(&config);

        let mut state = Self {
            cache,
            source,
            outcome: Arc::new(LoadOutcome {
                table: IpoTable::empty(),
                error: None,
            }),
            years: Vec::new(),
            selected_years: YearSelection::new(),
            filtered: IpoTable::empty(),
            kpis: SummaryKpis::default(),
            chart_kind: ChartKind::default(),
            selections,
            status_message: None,
        };
        state.set_outcome(outcome);
        state
    }

    /// The whole loaded table, unfiltered.
    pub fn full(&self) -> &IpoTable {
        &self.outcome.table
    }

    pub fn has_data(&self) -> bool {
        !self.full().is_empty()
    }

    /// Switch to another data file.
    pub fn open(&mut self, path: &Path) {
        self.source = path.to_path_buf();
        let outcome = self.cache.get_or_load(path);
        self.set_outcome(outcome);
    }

    /// Drop the memoized table and read the current source again.
    pub fn reload(&mut self) {
        let outcome = self.cache.reload(&self.source);
        self.set_outcome(outcome);
    }

    /// Ingest a load result: every year selected, filters and caches rebuilt.
    pub fn set_outcome(&mut self, outcome: Arc<LoadOutcome>) {
        self.status_message = outcome.error.as_ref().map(|e| e.to_string());
        if outcome.is_ok() {
            log::info!("{} IPOs available", outcome.table.len());
        }
        self.years = available_years(&outcome.table);
        self.selected_years = self.years.iter().copied().collect();
        self.outcome = outcome;
        self.refilter();
    }

    /// Recompute `filtered` and `kpis` after a selection change.
    pub fn refilter(&mut self) {
        self.filtered = filter_by_year(self.full(), &self.selected_years);
        self.kpis = summary_kpis(&self.filtered);

        // Keep the company choice valid for the new view.
        let names = company_names(&self.filtered);
        let still_there = self
            .selections
            .company
            .as_ref()
            .is_some_and(|c| names.contains(c));
        if !still_there {
            self.selections.company = names.into_iter().next();
        }
    }

    /// Toggle a single year in the filter.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.selected_years.remove(&year) {
            self.selected_years.insert(year);
        }
        self.refilter();
    }

    /// Select all years.
    pub fn select_all_years(&mut self) {
        self.selected_years = self.years.iter().copied().collect();
        self.refilter();
    }

    /// Clear the selection, which shows every row.
    pub fn select_no_years(&mut self) {
        self.selected_years.clear();
        self.refilter();
    }

    pub fn set_bins(&mut self, bins: usize) {
        self.selections.bins = clamp_bins(bins);
    }

    /// Numeric columns available as scatter axes / colours.
    pub fn numeric_columns(&self) -> Vec<NumericField> {
        self.filtered.columns().iter().copied().collect()
    }

    pub fn company_options(&self) -> Vec<String> {
        company_names(&self.filtered)
    }

    /// Request for the active chart kind; `None` when the company view has no
    /// company to show.
    pub fn chart_request(&self) -> Option<ChartRequest> {
        let s = &self.selections;
        let request = match self.chart_kind {
            ChartKind::DistributionAnalysis => ChartRequest::Distribution {
                variable: s.dist_variable,
                bins: s.bins,
            },
            ChartKind::VariableRelationships => ChartRequest::Relationships {
                x: s.x,
                y: s.y,
                color: s.color,
            },
            ChartKind::SubscriptionHeatmap => ChartRequest::SubscriptionHeatmap {
                columns: s.heatmap_columns.clone(),
            },
            ChartKind::CompanySpecific => ChartRequest::Company {
                name: s.company.clone()?,
            },
        };
        Some(request)
    }

    pub fn current_chart(&self) -> Option<Result<ChartOutput, AnalysisError>> {
        let request = self.chart_request()?;
        log::trace!("Building {} chart", request.kind());
        Some(build_chart(self.full(), &self.filtered, &request))
    }
}
