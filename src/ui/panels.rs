use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::analysis::dispatch::ChartKind;
use crate::analysis::distribution::{DistributionVariable, MAX_BINS, MIN_BINS};
use crate::analysis::relationship::ColorDimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year filter
// ---------------------------------------------------------------------------

/// Render the left configuration panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Configuration");
    ui.separator();

    if !state.has_data() {
        ui.label("No dataset loaded.");
        return;
    }

    let years = state.years.clone();
    let n_selected = state.selected_years.len();

    ui.strong(format!("Select Year(s)  ({n_selected}/{})", years.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_years();
        }
        if ui.small_button("None").clicked() {
            state.select_no_years();
        }
    });

    ScrollArea::vertical()
        .max_height(ui.available_height() - 40.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for year in years {
                let mut checked = state.selected_years.contains(&year);
                if ui.checkbox(&mut checked, year.to_string()).changed() {
                    state.toggle_year(year);
                }
            }
        });

    ui.separator();
    ui.label(
        RichText::new(format!("Showing {} IPOs", state.filtered.len()))
            .color(Color32::LIGHT_BLUE),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if state.has_data() {
            ui.label(format!(
                "{} IPOs loaded from {}, {} in view",
                state.full().len(),
                state.source.display(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

/// "Market Snapshot": four headline metrics of the filtered view.
pub fn kpi_strip(ui: &mut Ui, state: &AppState) {
    let k = &state.kpis;
    let avg = k
        .avg_gain
        .map_or_else(|| "no data".to_string(), |g| format!("{g:.2}%"));

    ui.columns(4, |cols| {
        metric(&mut cols[0], "Total IPOs", &k.count.to_string());
        metric(&mut cols[1], "Avg Listing Gain", &avg);
        metric(&mut cols[2], "Profitable IPOs", &k.profitable_count.to_string());
        metric(&mut cols[3], "Success Rate", &format!("{:.1}%", k.win_rate_pct));
    });
}

pub fn metric(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(label);
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Chart controls
// ---------------------------------------------------------------------------

/// Chart layout picker plus the sub-selections of the active layout.
pub fn chart_controls(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Choose Chart Layout");
        egui::ComboBox::from_id_salt("chart_kind")
            .selected_text(state.chart_kind.label())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut state.chart_kind, kind, kind.label());
                }
            });

        ui.separator();

        match state.chart_kind {
            ChartKind::DistributionAnalysis => distribution_controls(ui, state),
            ChartKind::VariableRelationships => relationship_controls(ui, state),
            ChartKind::SubscriptionHeatmap => {
                ui.label("Correlation between different subscription categories and listing gains.");
            }
            ChartKind::CompanySpecific => company_controls(ui, state),
        }
    });
}

fn distribution_controls(ui: &mut Ui, state: &mut AppState) {
    let s = &mut state.selections;
    egui::ComboBox::from_id_salt("dist_variable")
        .selected_text(s.dist_variable.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for v in DistributionVariable::ALL {
                ui.selectable_value(&mut s.dist_variable, v, v.to_string());
            }
        });

    let mut bins = s.bins;
    if ui
        .add(egui::Slider::new(&mut bins, MIN_BINS..=MAX_BINS).text("Number of Bins"))
        .changed()
    {
        state.set_bins(bins);
    }
}

fn relationship_controls(ui: &mut Ui, state: &mut AppState) {
    let columns = state.numeric_columns();
    let s = &mut state.selections;

    for (id, label, axis) in [("x_axis", "X-Axis", &mut s.x), ("y_axis", "Y-Axis", &mut s.y)] {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(axis.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for &c in &columns {
                    ui.selectable_value(&mut *axis, c, c.to_string());
                }
            });
    }

    ui.label("Color By");
    let current = match s.color {
        ColorDimension::Status => "Status".to_string(),
        ColorDimension::Numeric(f) => f.to_string(),
    };
    egui::ComboBox::from_id_salt("color_by")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut s.color, ColorDimension::Status, "Status");
            for &c in &columns {
                ui.selectable_value(&mut s.color, ColorDimension::Numeric(c), c.to_string());
            }
        });
}

fn company_controls(ui: &mut Ui, state: &mut AppState) {
    let options = state.company_options();
    let s = &mut state.selections;
    ui.label("Select Company");
    egui::ComboBox::from_id_salt("company")
        .selected_text(s.company.clone().unwrap_or_default())
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            for name in options {
                let selected = s.company.as_deref() == Some(name.as_str());
                if ui.selectable_label(selected, &name).clicked() {
                    s.company = Some(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open IPO data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
        match &state.outcome.error {
            None => log::info!("Opened {}", path.display()),
            Some(e) => log::error!("Failed to load file: {e}"),
        }
    }
}
