use std::collections::BTreeMap;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::analysis::company::CompanyProfile;
use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::dispatch::ChartOutput;
use crate::analysis::distribution::Histogram;
use crate::analysis::relationship::{ColorKey, ScatterPlot};
use crate::color::{contrast_text, diverging, generate_palette, sequential, status_color};
use crate::data::model::Status;
use crate::error::AnalysisError;
use crate::state::AppState;
use crate::ui::panels::metric;

// ---------------------------------------------------------------------------
// Chart area (central panel)
// ---------------------------------------------------------------------------

/// Render the active chart of the central panel.
pub fn chart_area(ui: &mut Ui, state: &AppState) {
    match state.current_chart() {
        None => {
            ui.label("No company available in the current selection.");
        }
        Some(Err(AnalysisError::InsufficientColumns)) => {
            ui.label(RichText::new("⚠ Not enough subscription columns found.").color(Color32::YELLOW));
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
        }
        Some(Ok(ChartOutput::Distribution(h))) => histogram(ui, &h),
        Some(Ok(ChartOutput::Relationships(s))) => scatter(ui, &s),
        Some(Ok(ChartOutput::Heatmap(m))) => heatmap(ui, &m),
        Some(Ok(ChartOutput::Company(p))) => company(ui, &p),
    }
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

fn histogram(ui: &mut Ui, h: &Histogram) {
    ui.strong(format!("Distribution of {} ({} values)", h.variable, h.total()));
    if h.counts.is_empty() {
        ui.label("No data for this variable.");
        return;
    }

    let width = h.bin_width();
    let centre = |i: usize| h.edges[i] + width / 2.0;
    let bars = |counts: &[usize]| -> Vec<Bar> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(centre(i), c as f64).width(width))
            .collect()
    };

    let box_height = 60.0;
    if let Some(s) = h.spread {
        Plot::new("distribution_box")
            .height(box_height)
            .show_axes([false, false])
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let elem = BoxElem::new(0.0, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                    .whisker_width(0.0)
                    .box_width(0.6);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal().name(h.variable.to_string()));
            });
    }

    Plot::new("distribution_plot")
        .legend(Legend::default())
        .x_axis_label(h.variable.to_string())
        .y_axis_label("count")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| match &h.by_status {
            Some(split) => {
                let loss = BarChart::new(bars(split.for_status(Status::Loss)))
                    .name(Status::Loss.label())
                    .color(status_color(Status::Loss));
                let profit = BarChart::new(bars(split.for_status(Status::Profit)))
                    .name(Status::Profit.label())
                    .color(status_color(Status::Profit))
                    .stack_on(&[&loss]);
                plot_ui.bar_chart(loss);
                plot_ui.bar_chart(profit);
            }
            None => {
                plot_ui.bar_chart(BarChart::new(bars(&h.counts)).name("count").color(Color32::LIGHT_BLUE));
            }
        });
}

// ---------------------------------------------------------------------------
// Variable relationships
// ---------------------------------------------------------------------------

/// Number of marker sizes for the issue-size encoding.
const SIZE_CLASSES: u8 = 4;

fn scatter(ui: &mut Ui, s: &ScatterPlot) {
    ui.strong(format!("{} vs {}", s.y, s.x));
    if s.points.is_empty() {
        ui.label("No rows have both values.");
        return;
    }

    let range = s.color_range();
    let max_size = s.points.iter().filter_map(|p| p.size).fold(0.0, f64::max);

    // egui_plot colours a whole series, so group points by colour and size.
    let mut series: BTreeMap<(String, [u8; 4], u8), Vec<[f64; 2]>> = BTreeMap::new();
    for p in &s.points {
        let (label, color) = match p.color {
            ColorKey::Status(st) => (st.label().to_string(), status_color(st)),
            ColorKey::Numeric(Some(v)) => {
                let t = match range {
                    Some((lo, hi)) if hi > lo => (v - lo) / (hi - lo),
                    _ => 0.5,
                };
                // Ten colour steps keep the legend readable.
                let step = (t * 9.0).round() / 9.0;
                (String::new(), sequential(step))
            }
            ColorKey::Numeric(None) => ("missing".to_string(), Color32::GRAY),
        };
        let size_class = match p.size {
            Some(sz) if max_size > 0.0 => ((sz / max_size) * (SIZE_CLASSES - 1) as f64).round() as u8,
            _ => 0,
        };
        series
            .entry((label, color.to_array(), size_class))
            .or_default()
            .push([p.x, p.y]);
    }

    Plot::new("relationship_plot")
        .legend(Legend::default())
        .x_axis_label(s.x.to_string())
        .y_axis_label(s.y.to_string())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for ((label, [r, g, b, a], size_class), pts) in series {
                let points = Points::new(PlotPoints::from(pts))
                    .radius(2.5 + 2.0 * size_class as f32)
                    .color(Color32::from_rgba_premultiplied(r, g, b, a))
                    .name(label);
                plot_ui.points(points);
            }
        });

    if let Some((lo, hi)) = range {
        ui.label(format!("Colour: low = {lo:.2}, high = {hi:.2}"));
    }
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, m: &CorrelationMatrix) {
    ui.strong("Correlation Matrix: Subscription & Gains");
    let cell = Vec2::new(110.0, 28.0);

    egui::Grid::new("heatmap").spacing([2.0, 2.0]).show(ui, |ui: &mut Ui| {
        ui.label("");
        for c in &m.columns {
            ui.label(RichText::new(c.column_name()).small());
        }
        ui.end_row();

        for (i, row_col) in m.columns.iter().enumerate() {
            ui.label(RichText::new(row_col.column_name()).small());
            for j in 0..m.columns.len() {
                let (rect, _) = ui.allocate_exact_size(cell, Sense::hover());
                let (fill, text) = match m.get(i, j) {
                    Some(r) => (diverging(r), format!("{r:.2}")),
                    None => (Color32::DARK_GRAY, "n/a".to_string()),
                };
                ui.painter().rect_filled(rect, 2.0, fill);
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::monospace(13.0),
                    contrast_text(fill),
                );
            }
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Company explorer
// ---------------------------------------------------------------------------

fn company(ui: &mut Ui, p: &CompanyProfile) {
    let card = &p.scorecard;
    let fmt = |v: Option<f64>, prefix: &str, suffix: &str| match v {
        Some(v) => format!("{prefix}{v}{suffix}"),
        None => "n/a".to_string(),
    };
    let gain = match card.listing_gains_percent {
        Some(g) => format!("{g:.2}%"),
        None => "n/a".to_string(),
    };
    let status = Status::from_profit(card.listing_gains_profit);

    ui.heading(&card.name);
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Issue Price", &fmt(card.issue_price, "₹", ""));
        metric(&mut cols[1], "Issue Size", &fmt(card.issue_size, "₹", " Cr"));
        metric(&mut cols[2], &format!("Listing Gains ({status})"), &gain);
        metric(&mut cols[3], "Total Subscription", &fmt(card.subscription_total, "", "x"));
    });

    ui.columns(2, |cols| {
        let palette = generate_palette(p.breakdown.len());
        cols[0].strong(format!("Subscription Breakdown for {}", card.name));
        Plot::new("subscription_breakdown")
            .legend(Legend::default())
            .y_axis_label("subscription (x)")
            .show(&mut cols[0], |plot_ui| {
                for (i, ((cat, value), color)) in p.breakdown.iter().zip(palette).enumerate() {
                    let bar = Bar::new(i as f64, *value).width(0.7);
                    plot_ui.bar_chart(BarChart::new(vec![bar]).name(cat.label()).color(color));
                }
            });

        cols[1].strong("Performance vs Market Average");
        Plot::new("market_comparison")
            .legend(Legend::default())
            .y_axis_label("Listing Gain (%)")
            .show(&mut cols[1], |plot_ui| {
                let colors = [Color32::from_rgb(0x00, 0xCC, 0x96), Color32::from_rgb(0x63, 0x6E, 0xFA)];
                for (i, (entry, color)) in p.comparison.iter().zip(colors).enumerate() {
                    let Some(value) = entry.value else { continue };
                    let bar = Bar::new(i as f64, value).width(0.7);
                    plot_ui.bar_chart(BarChart::new(vec![bar]).name(&entry.label).color(color));
                }
            });
    });
}
