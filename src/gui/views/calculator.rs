//! Calculator view implementation
//!
//! The main form: the expense list with its add/remove controls and currency
//! dropdown, the markup form with the three readouts, and the markup
//! projection chart.

use crate::expenses::RowId;
use crate::gui::app::MargoApp;
use crate::gui::helpers::{markup_label, markup_warning};
use eframe::egui::{self, RichText};
use egui_plot::{Bar, BarChart, Plot};

impl MargoApp {
    /// Main calculator view
    pub(crate) fn view_calculator(&mut self, ui: &mut egui::Ui) {
        self.render_section_header(ui, "Cost Breakdown & Pricing");
        ui.add_space(self.theme.spacing_md);

        let total_width = ui.available_width();
        let list_width = total_width * 0.36;
        let form_width = total_width * 0.22;

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(list_width);
                self.render_expense_list(ui);
                ui.add_space(self.theme.spacing_sm);
                self.render_expense_controls(ui);
                ui.add_space(self.theme.spacing_md);
                self.render_readout(ui, "Total Expenses", self.quote.total.clone());
            });

            ui.add_space(self.theme.spacing_md);

            ui.vertical(|ui| {
                ui.set_width(form_width);
                self.render_pricing_form(ui);
            });

            ui.add_space(self.theme.spacing_md);

            ui.vertical(|ui| {
                self.render_projection_chart(ui);
            });
        });
    }

    fn render_expense_list(&mut self, ui: &mut egui::Ui) {
        // Edits are collected during rendering and applied afterwards so the
        // sheet is only mutated through its event methods.
        let mut pending_edits: Vec<(RowId, String)> = Vec::new();

        self.theme.frame_panel().show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("expense_list")
                .auto_shrink([false, true])
                .max_height(460.0)
                .show(ui, |ui| {
                    if self.sheet.is_empty() {
                        ui.label(
                            RichText::new("No expenses. Use [+] to add one.")
                                .color(self.theme.text_secondary),
                        );
                    }
                    for row in self.sheet.rows() {
                        ui.label(RichText::new(&row.label).color(self.theme.text_secondary));
                        ui.horizontal(|ui| {
                            // Currency prefix, relabeled for every row when the
                            // dropdown selection changes
                            egui::Frame::none()
                                .fill(self.theme.secondary)
                                .rounding(3.0)
                                .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                                .show(ui, |ui| {
                                    ui.label(
                                        RichText::new(&self.selected_symbol)
                                            .strong()
                                            .color(self.theme.accent_amber),
                                    );
                                });
                            let mut amount = row.amount_text.clone();
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut amount)
                                    .hint_text("Amount")
                                    .desired_width(ui.available_width() - 8.0),
                            );
                            if response.changed() {
                                pending_edits.push((row.id, amount));
                            }
                        });
                        ui.add_space(self.theme.spacing_sm);
                    }
                });
        });

        for (id, text) in pending_edits {
            self.on_edit_amount(id, text);
        }
    }

    fn render_expense_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add(self.theme.button_small("+"))
                .on_hover_text("Add an expense row")
                .clicked()
            {
                self.on_add_row();
            }
            if ui
                .add(self.theme.button_small("-"))
                .on_hover_text("Remove the last expense row")
                .clicked()
            {
                self.on_remove_row();
            }

            let mut chosen: Option<String> = None;
            egui::ComboBox::from_id_source("currency_selector")
                .selected_text(&self.selected_symbol)
                .width(70.0)
                .show_ui(ui, |ui| {
                    ui.set_min_width(220.0);
                    for entry in self.currency_table.entries() {
                        let is_selected = entry.symbol == self.selected_symbol;
                        if ui.selectable_label(is_selected, entry.display()).clicked() {
                            chosen = Some(entry.symbol.clone());
                        }
                    }
                });
            if let Some(symbol) = chosen {
                self.on_select_currency(&symbol);
            }

            ui.add(
                egui::TextEdit::singleline(&mut self.new_expense_label)
                    .hint_text("Expense")
                    .desired_width(ui.available_width() - 8.0),
            );
        });
    }

    fn render_pricing_form(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Price Markup")
                .size(16.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_xs);
        ui.horizontal(|ui| {
            if ui
                .add(
                    egui::DragValue::new(&mut self.markup_percent)
                        .speed(1.0)
                        .clamp_range(-100.0..=1000.0)
                        .suffix(" %"),
                )
                .changed()
            {
                self.on_edit_markup();
            }
            ui.label(
                RichText::new(markup_label(self.markup_percent))
                    .small()
                    .color(self.theme.accent_teal),
            );
        });
        if let Some(warning) = markup_warning(self.markup_percent) {
            ui.label(RichText::new(warning).small().color(self.theme.warning));
        }

        ui.add_space(self.theme.spacing_md);
        self.render_readout(ui, "Profit Margin", self.quote.margin.clone());
        ui.add_space(self.theme.spacing_md);
        self.render_readout(ui, "Profit Price", self.quote.price.clone());

        ui.add_space(self.theme.spacing_lg);
        if ui
            .add_sized(
                [ui.available_width(), 44.0],
                self.theme.button_large("Calculate"),
            )
            .clicked()
        {
            self.on_calculate();
        }
    }

    /// One labeled readout card (total, margin or price).
    fn render_readout(&self, ui: &mut egui::Ui, title: &str, value: String) {
        ui.label(
            RichText::new(title)
                .size(16.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_xs);
        self.theme.frame_readout().show(ui, |ui| {
            ui.set_min_width(ui.available_width() - 8.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(value)
                        .size(28.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
            });
        });
    }

    fn render_projection_chart(&self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Markup Projection")
                    .size(16.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new("Illustrative only - not derived from your expenses")
                    .small()
                    .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_sm);

            let bars: Vec<Bar> = self
                .projection
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    Bar::new(i as f64, point.markup_percent)
                        .width(0.7)
                        .name(point.month_label())
                        .fill(self.theme.accent_teal)
                })
                .collect();
            let chart = BarChart::new(bars);

            Plot::new("projection_chart")
                .height(420.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .show_grid(true)
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(chart);
                });
        });
    }
}
