use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IpoDashboardApp {
    pub state: AppState,
}

impl IpoDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for IpoDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: snapshot, chart, raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Indian IPO Market Analysis");
            ui.label("Analyze historical IPO performance, listing gains, and subscription trends in the Indian Market.");

            if !self.state.has_data() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a CSV to view IPOs  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.separator();
                ui.strong("Market Snapshot");
                panels::kpi_strip(ui, &self.state);

                ui.separator();
                ui.strong("Custom Visualization");
                panels::chart_controls(ui, &mut self.state);
                ui.allocate_ui(egui::vec2(ui.available_width(), 480.0), |ui| {
                    plot::chart_area(ui, &self.state);
                });

                ui.separator();
                egui::CollapsingHeader::new("Raw Data Explorer")
                    .default_open(false)
                    .show(ui, |ui| {
                        table::raw_data_table(ui, &self.state.filtered);
                    });
            });
        });
    }
}
