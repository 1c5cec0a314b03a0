use std::hash::Hash;

use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::CompanyRecord;
use crate::present::TableColumn;

const ROW_HEIGHT: f32 = 20.0;

/// Striped, scrollable table of companies. `id_salt` keeps several tables
/// on one page apart.
pub fn company_table(
    ui: &mut Ui,
    id_salt: impl Hash,
    rows: &[&CompanyRecord],
    columns: &[TableColumn],
) {
    if rows.is_empty() {
        ui.weak("No companies match the current selection.");
        return;
    }

    ui.push_id(id_salt, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .min_scrolled_height(0.0)
            .max_scroll_height(320.0);

        for col in columns {
            builder = match col {
                TableColumn::Company => builder.column(Column::auto().at_least(160.0)),
                _ => builder.column(Column::auto().at_least(60.0)),
            };
        }

        builder
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col.header());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let rec = rows[row.index()];
                    for col in columns {
                        row.col(|ui: &mut Ui| {
                            let text = col.cell(rec);
                            if col.is_numeric() {
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    ui.label(text);
                                });
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });
}
