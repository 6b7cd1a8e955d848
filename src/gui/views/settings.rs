//! Settings view implementation
//!
//! Contains the settings panel rendering including:
//! - Form defaults (currency symbol and markup)
//! - Currency table management
//! - Quote log
//! - About section

use crate::currency::{CurrencyTable, DEFAULT_SYMBOL};
use crate::gui::app::{CurrencySource, MargoApp};
use crate::gui::helpers::{markup_label, markup_warning};
use crate::gui::notifications::NotificationEntry;
use crate::quote_log;
use crate::user_settings::UserSettings;
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

impl MargoApp {
    /// Render the settings view
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        self.render_section_header(ui, "Settings");
        ui.add_space(self.theme.spacing_md);

        self.render_defaults_panel(ui);
        ui.add_space(self.theme.spacing_lg);
        self.render_currency_table_panel(ui);
        ui.add_space(self.theme.spacing_lg);
        self.render_quote_log_panel(ui);
        ui.add_space(self.theme.spacing_lg);
        self.render_about_panel(ui);
    }

    fn render_defaults_panel(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Form Defaults")
                    .size(18.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.add_space(self.theme.spacing_sm);

            ui.label("Values the form opens with on the next launch:");
            ui.add_space(self.theme.spacing_xs);

            egui::Grid::new("defaults_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label("Default currency:");
                    let selected_text = self
                        .currency_table
                        .get(&self.settings_pending_symbol)
                        .map(|e| e.display())
                        .unwrap_or_else(|| self.settings_pending_symbol.clone());
                    egui::ComboBox::from_id_source("default_currency")
                        .selected_text(selected_text)
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for entry in self.currency_table.entries() {
                                let is_selected = entry.symbol == self.settings_pending_symbol;
                                if ui.selectable_label(is_selected, entry.display()).clicked() {
                                    self.settings_pending_symbol = entry.symbol.clone();
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Default markup:");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Slider::new(&mut self.settings_pending_markup, 0.0..=250.0)
                                .suffix("%")
                                .step_by(5.0),
                        );
                        ui.label(
                            RichText::new(markup_label(self.settings_pending_markup))
                                .small()
                                .color(self.theme.accent_teal),
                        );
                    });
                    ui.end_row();
                });

            if let Some(warning) = markup_warning(self.settings_pending_markup) {
                ui.label(RichText::new(warning).small().color(self.theme.warning));
            }

            let dirty = self.settings_pending_symbol != self.user_settings.default_symbol
                || (self.settings_pending_markup - self.user_settings.default_markup).abs() > 0.01;
            if dirty {
                ui.add_space(self.theme.spacing_xs);
                ui.horizontal(|ui| {
                    if ui.add(self.theme.button_primary("Save Defaults")).clicked() {
                        self.user_settings.default_symbol = self.settings_pending_symbol.clone();
                        self.user_settings.default_markup = self.settings_pending_markup;
                        if let Err(e) = self.user_settings.save() {
                            self.notifications.push_back(NotificationEntry::new(format!(
                                "Failed to save settings: {}",
                                e
                            )));
                        } else {
                            self.notifications
                                .push_back(NotificationEntry::new("Defaults saved."));
                        }
                    }
                    ui.label(
                        RichText::new("(unsaved changes)")
                            .small()
                            .color(self.theme.warning),
                    );
                });
            }
        });
    }

    fn render_currency_table_panel(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Currency Table")
                    .size(18.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.add_space(self.theme.spacing_sm);

            ui.horizontal(|ui| {
                ui.label(RichText::new("Source:").color(self.theme.text_secondary));
                ui.label(
                    RichText::new(self.currency_source.display())
                        .small()
                        .color(self.theme.accent_teal),
                );
                ui.label(
                    RichText::new(format!("({} entries)", self.currency_table.len()))
                        .small()
                        .color(self.theme.text_secondary),
                );
            });
            ui.add_space(self.theme.spacing_sm);

            egui::ScrollArea::vertical()
                .id_source("currency_table")
                .max_height(220.0)
                .show(ui, |ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .column(Column::auto().at_least(70.0))
                        .column(Column::remainder())
                        .header(20.0, |mut header| {
                            header.col(|ui| {
                                ui.strong("Symbol");
                            });
                            header.col(|ui| {
                                ui.strong("Country and Currency");
                            });
                        })
                        .body(|mut body| {
                            for entry in self.currency_table.entries() {
                                body.row(18.0, |mut row| {
                                    row.col(|ui| {
                                        ui.label(
                                            RichText::new(&entry.symbol)
                                                .color(self.theme.accent_amber),
                                        );
                                    });
                                    row.col(|ui| {
                                        ui.label(&entry.name);
                                    });
                                });
                            }
                        });
                });

            ui.add_space(self.theme.spacing_sm);
            ui.horizontal(|ui| {
                if ui
                    .add(self.theme.button_secondary("Load custom table..."))
                    .clicked()
                {
                    self.pick_currency_table();
                }
                if self.currency_source != CurrencySource::Embedded
                    && ui
                        .add(self.theme.button_secondary("Use built-in table"))
                        .clicked()
                {
                    self.restore_embedded_table();
                }
            });
            ui.add_space(self.theme.spacing_xs);
            ui.label(
                RichText::new("Two columns separated by ';': symbol, country and currency name.")
                    .small()
                    .color(self.theme.text_secondary),
            );
        });
    }

    /// Pick and load a replacement table. A bad file leaves the active table
    /// untouched.
    fn pick_currency_table(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Delimited text", &["csv", "txt"])
            .pick_file()
        else {
            return;
        };
        match CurrencyTable::load_from_path(&path) {
            Ok(table) => {
                self.apply_table(table, CurrencySource::File(path.display().to_string()));
                self.user_settings
                    .set_currencies_file(path.display().to_string());
                if let Err(e) = self.user_settings.save() {
                    self.notifications.push_back(NotificationEntry::new(format!(
                        "Failed to save settings: {}",
                        e
                    )));
                }
                self.notifications.push_back(NotificationEntry::new(format!(
                    "Loaded currency table from {}",
                    path.display()
                )));
            }
            Err(e) => {
                tracing::warn!("Rejected currency table {}: {}", path.display(), e);
                self.notifications
                    .push_back(NotificationEntry::new(format!("Currency table rejected: {}", e)));
            }
        }
    }

    fn restore_embedded_table(&mut self) {
        match CurrencyTable::embedded() {
            Ok(table) => {
                self.apply_table(table, CurrencySource::Embedded);
                self.user_settings.set_currencies_file(String::new());
                if let Err(e) = self.user_settings.save() {
                    self.notifications.push_back(NotificationEntry::new(format!(
                        "Failed to save settings: {}",
                        e
                    )));
                }
                self.notifications
                    .push_back(NotificationEntry::new("Using the built-in currency table."));
            }
            Err(e) => {
                self.notifications
                    .push_back(NotificationEntry::new(format!("Failed to restore table: {}", e)));
            }
        }
    }

    fn apply_table(&mut self, table: CurrencyTable, source: CurrencySource) {
        self.currency_table = table;
        self.currency_source = source;
        // The selection must stay within the table, falling back to "$"
        if !self.currency_table.contains_symbol(&self.selected_symbol) {
            self.selected_symbol = DEFAULT_SYMBOL.to_string();
            self.refresh_quote();
        }
        if !self
            .currency_table
            .contains_symbol(&self.settings_pending_symbol)
        {
            self.settings_pending_symbol = DEFAULT_SYMBOL.to_string();
        }
    }

    fn render_quote_log_panel(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Quote Log")
                        .size(18.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(self.theme.button_small("Clear")).clicked() {
                        if let Err(e) = quote_log::clear_log() {
                            self.notifications.push_back(NotificationEntry::new(format!(
                                "Failed to clear quote log: {}",
                                e
                            )));
                        }
                        self.refresh_log();
                    }
                    if ui.add(self.theme.button_small("Refresh")).clicked() {
                        self.refresh_log();
                    }
                });
            });
            ui.add_space(self.theme.spacing_xs);

            if let Some(err) = &self.log_view.error {
                ui.colored_label(self.theme.error, err);
            }

            self.theme.frame_surface().show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("quote_log")
                    .auto_shrink([false, true])
                    .max_height(240.0)
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.monospace(&self.log_view.content);
                    });
            });
        });
    }

    fn render_about_panel(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("About Margo")
                    .size(16.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.add_space(self.theme.spacing_sm);

            egui::Grid::new("about_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label(RichText::new("Version:").color(self.theme.text_secondary));
                    ui.label(
                        RichText::new(env!("CARGO_PKG_VERSION"))
                            .strong()
                            .color(self.theme.accent_teal),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Settings file:").color(self.theme.text_secondary));
                    let settings_path = UserSettings::settings_path_display();
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&settings_path)
                                .small()
                                .color(self.theme.text_secondary),
                        );
                        if ui
                            .add(egui::Button::new("📋").small())
                            .on_hover_text("Copy path")
                            .clicked()
                        {
                            ui.output_mut(|o| o.copied_text = settings_path.clone());
                        }
                    });
                    ui.end_row();

                    ui.label(RichText::new("Quote log:").color(self.theme.text_secondary));
                    let log_path = quote_log::log_file_path();
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&log_path)
                                .small()
                                .color(self.theme.text_secondary),
                        );
                        if ui
                            .add(egui::Button::new("📋").small())
                            .on_hover_text("Copy path")
                            .clicked()
                        {
                            ui.output_mut(|o| o.copied_text = log_path.clone());
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(self.theme.spacing_sm);
            if ui
                .link(RichText::new("📖 README").color(self.theme.accent_teal))
                .clicked()
            {
                if let Err(e) = open::that("https://github.com/margo-app/margo#readme") {
                    self.notifications
                        .push_back(NotificationEntry::new(format!("Failed to open URL: {}", e)));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // ==================== restore_embedded_table tests ====================

    #[test]
    fn test_restore_embedded_table_saves_and_notifies() {
        // Route the settings file into a scratch dir for the duration
        let scratch = std::env::temp_dir().join("margo_restore_table_test");
        let _ = fs::remove_dir_all(&scratch);
        fs::create_dir_all(&scratch).unwrap();
        let previous = std::env::var_os("XDG_CONFIG_HOME");
        std::env::set_var("XDG_CONFIG_HOME", &scratch);

        let mut app = MargoApp::test_fixture();
        app.currency_source = CurrencySource::File("/tmp/custom.csv".to_string());
        app.user_settings.currencies_file = Some("/tmp/custom.csv".to_string());

        app.restore_embedded_table();

        match previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(app.currency_source, CurrencySource::Embedded);
        assert!(app.user_settings.currencies_file.is_none());
        assert!(scratch.join("margo").join("margo_settings.json").exists());
        let messages: Vec<String> =
            app.notifications.iter().map(|n| n.message.clone()).collect();
        assert!(messages.iter().any(|m| m.contains("built-in currency table")));
        // A failed save would surface here instead of disappearing
        assert!(!messages.iter().any(|m| m.contains("Failed to save settings")));
        let _ = fs::remove_dir_all(&scratch);
    }
}
