use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::status_color;
use crate::data::filter::sorted_by_date_desc;
use crate::data::model::IpoTable;

const HEADERS: [&str; 11] = [
    "Date",
    "IPOName",
    "Issue_Size",
    "Subscription_QIB",
    "Subscription_HNI",
    "Subscription_RII",
    "Subscription_Total",
    "Issue_Price",
    "Listing_Gains_Percent",
    "Year",
    "Status",
];

/// Raw rows of the filtered view, newest listing first.
pub fn raw_data_table(ui: &mut Ui, table: &IpoTable) {
    let sorted = sorted_by_date_desc(table);
    let rows = sorted.records();
    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 2)
        .header(20.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                let values = [
                    r.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                    r.ipo_name.clone(),
                    cell(r.issue_size),
                    cell(r.subscription_qib),
                    cell(r.subscription_hni),
                    cell(r.subscription_rii),
                    cell(r.subscription_total),
                    cell(r.issue_price),
                    cell(r.listing_gains_percent),
                    r.year().map(|y| y.to_string()).unwrap_or_default(),
                ];
                for v in values {
                    row.col(|ui| {
                        ui.label(v);
                    });
                }
                let status = r.status();
                row.col(|ui| {
                    ui.label(RichText::new(status.label()).color(status_color(status)));
                });
            });
        });
}
