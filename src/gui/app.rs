//! Main GUI application module
//!
//! Contains the MargoApp struct and all its implementations.

use std::collections::VecDeque;

use anyhow::{anyhow, Context, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};

use crate::{
    config::Config,
    currency::{CurrencyTable, DEFAULT_SYMBOL},
    expenses::{ExpenseSheet, RowId},
    pricing::{self, Quote},
    projection::{projection_series, ProjectionPoint},
    quote_log,
    user_settings::UserSettings,
};

use super::helpers::truncate_message;
use super::notifications::NotificationEntry;
use super::theme::{configure_style, AppTheme};

/// GUI section enum for navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiSection {
    Calculator,
    Settings,
}

/// Where the active currency table came from, for display in Settings.
#[derive(Clone, Debug, PartialEq)]
pub enum CurrencySource {
    Embedded,
    File(String),
}

impl CurrencySource {
    pub(crate) fn display(&self) -> String {
        match self {
            CurrencySource::Embedded => "built-in table".to_string(),
            CurrencySource::File(path) => path.clone(),
        }
    }
}

pub(crate) struct LogViewState {
    pub(crate) content: String,
    pub(crate) error: Option<String>,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self {
            content: "No quotes yet. Press Calculate to generate entries.".to_string(),
            error: None,
        }
    }
}

pub struct MargoApp {
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) section: GuiSection,
    pub(crate) currency_table: CurrencyTable,
    pub(crate) currency_source: CurrencySource,
    // Form state
    pub(crate) sheet: ExpenseSheet,
    pub(crate) selected_symbol: String,
    pub(crate) new_expense_label: String,
    pub(crate) markup_percent: f64,
    /// False until the first Calculate click; readouts show `<symbol>0`.
    pub(crate) has_calculated: bool,
    pub(crate) quote: Quote,
    pub(crate) projection: Vec<ProjectionPoint>,
    // Notifications
    pub(crate) notifications: VecDeque<NotificationEntry>,
    pub(crate) show_notifications_popup: bool,
    pub(crate) notification_toast_visible: bool,
    pub(crate) notification_toast_close_time: Option<std::time::Instant>,
    pub(crate) last_notification_count: usize,
    // Settings page editing state
    pub(crate) settings_pending_symbol: String,
    pub(crate) settings_pending_markup: f64,
    pub(crate) log_view: LogViewState,
}

impl MargoApp {
    fn new(
        config: Config,
        user_settings: UserSettings,
        currency_table: CurrencyTable,
        currency_source: CurrencySource,
        ctx: &egui::Context,
    ) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        // Prefer the saved default symbol when the active table still has it
        let selected_symbol = if currency_table.contains_symbol(&user_settings.default_symbol) {
            user_settings.default_symbol.clone()
        } else if currency_table.contains_symbol(&config.default_symbol) {
            config.default_symbol.clone()
        } else {
            DEFAULT_SYMBOL.to_string()
        };
        let markup_percent = user_settings.default_markup;

        let settings_pending_symbol = selected_symbol.clone();
        let settings_pending_markup = markup_percent;
        let quote = Quote::unset(&selected_symbol);
        let projection = projection_series(chrono::Local::now().date_naive());

        Self {
            user_settings,
            theme,
            section: GuiSection::Calculator,
            currency_table,
            currency_source,
            sheet: ExpenseSheet::seeded(),
            selected_symbol,
            new_expense_label: String::new(),
            markup_percent,
            has_calculated: false,
            quote,
            projection,
            notifications: VecDeque::with_capacity(20),
            show_notifications_popup: false,
            notification_toast_visible: false,
            notification_toast_close_time: None,
            last_notification_count: 0,
            settings_pending_symbol,
            settings_pending_markup,
            log_view: LogViewState::default(),
        }
    }

    /// Recompute the readouts from current state. Before the first Calculate
    /// click this is the distinct `<symbol>0` display, not a computed zero.
    pub(crate) fn refresh_quote(&mut self) {
        self.quote = if self.has_calculated {
            pricing::compute(
                &self.sheet.amount_texts(),
                self.markup_percent,
                &self.selected_symbol,
            )
        } else {
            Quote::unset(&self.selected_symbol)
        };
    }

    /// Add-row click: appends a row named after the new-expense field.
    pub(crate) fn on_add_row(&mut self) {
        let label = if self.new_expense_label.trim().is_empty() {
            "Expense".to_string()
        } else {
            self.new_expense_label.trim().to_string()
        };
        self.sheet.add_row(label);
        self.refresh_quote();
    }

    /// Remove-row click: drops the last row, no-op on an empty sheet.
    pub(crate) fn on_remove_row(&mut self) {
        self.sheet.remove_last_row();
        self.refresh_quote();
    }

    /// Per-row amount edit, addressed by stable row id.
    pub(crate) fn on_edit_amount(&mut self, id: RowId, text: String) {
        self.sheet.edit_amount(id, text);
        self.refresh_quote();
    }

    /// Currency choice: one click relabels the prefix of every row and the
    /// selector itself. Symbols outside the reference table are ignored.
    pub(crate) fn on_select_currency(&mut self, symbol: &str) {
        if !self.currency_table.contains_symbol(symbol) {
            tracing::warn!("Ignoring unknown currency symbol {:?}", symbol);
            return;
        }
        self.selected_symbol = symbol.to_string();
        self.refresh_quote();
    }

    /// Markup-value edit.
    pub(crate) fn on_edit_markup(&mut self) {
        self.refresh_quote();
    }

    /// Calculate click: from here on the readouts track the inputs live.
    pub(crate) fn on_calculate(&mut self) {
        self.has_calculated = true;
        self.refresh_quote();
        if let Err(e) = quote_log::append_quote(
            &self.selected_symbol,
            self.markup_percent,
            self.sheet.len(),
            &self.quote,
        ) {
            self.notifications
                .push_back(NotificationEntry::new(format!("Failed to log quote: {}", e)));
        }
    }

    /// Reload the quote log panel content.
    pub(crate) fn refresh_log(&mut self) {
        match quote_log::read_log() {
            Ok(content) if content.is_empty() => {
                self.log_view.content = "No quotes yet. Press Calculate to generate entries.".to_string();
                self.log_view.error = None;
            }
            Ok(content) => {
                self.log_view.content = content;
                self.log_view.error = None;
            }
            Err(e) => {
                self.log_view.error = Some(format!("Failed to read quote log: {}", e));
            }
        }
    }

    /// Render a consistent section header
    pub(crate) fn render_section_header(&self, ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(22.0).strong().color(self.theme.text_primary));
        let rect = ui
            .allocate_exact_size(egui::vec2(ui.available_width(), 2.0), egui::Sense::hover())
            .0;
        ui.painter().rect_filled(rect, 0.0, self.theme.primary);
    }

    fn render_notifications(&mut self, ctx: &egui::Context) {
        // Check for new notifications and trigger toast
        let current_notification_count = self.notifications.len();
        if current_notification_count > self.last_notification_count {
            self.notification_toast_visible = true;
            self.notification_toast_close_time =
                Some(std::time::Instant::now() + std::time::Duration::from_secs(5));
        }
        self.last_notification_count = current_notification_count;

        // Auto-close toast after timeout
        if let Some(close_time) = self.notification_toast_close_time {
            if std::time::Instant::now() >= close_time {
                self.notification_toast_visible = false;
                self.notification_toast_close_time = None;
            }
        }

        let notification_count = self.notifications.len();
        let has_notifications = notification_count > 0;
        let latest_notification = self.notifications.back().map(|n| n.message.clone());

        egui::Area::new(egui::Id::new("notification_overlay"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(self.theme.surface)
                    .rounding(6.0)
                    .stroke(egui::Stroke::new(1.0, self.theme.primary))
                    .inner_margin(egui::Margin::symmetric(8.0, 6.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let icon_color = if has_notifications {
                                self.theme.accent_amber
                            } else {
                                self.theme.text_secondary
                            };
                            if ui
                                .add(
                                    egui::Button::new(
                                        RichText::new("[!]").size(14.0).color(icon_color).strong(),
                                    )
                                    .fill(egui::Color32::TRANSPARENT)
                                    .stroke(egui::Stroke::NONE),
                                )
                                .on_hover_text("Click to view notification history")
                                .clicked()
                            {
                                self.show_notifications_popup = !self.show_notifications_popup;
                            }

                            if self.notification_toast_visible {
                                if let Some(ref msg) = latest_notification {
                                    ui.add_space(4.0);
                                    let display_text = truncate_message(msg, 48);
                                    ui.label(
                                        RichText::new(display_text)
                                            .size(12.0)
                                            .color(self.theme.text_primary),
                                    );
                                }
                            } else if has_notifications {
                                ui.add_space(2.0);
                                ui.label(
                                    RichText::new(format!("{}", notification_count))
                                        .size(10.0)
                                        .color(self.theme.accent_amber),
                                );
                            }
                        });
                    });
            });

        if self.show_notifications_popup {
            egui::Window::new("Notification History")
                .collapsible(false)
                .resizable(true)
                .default_width(420.0)
                .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -50.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{} notifications", self.notifications.len()))
                                .color(self.theme.text_secondary),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.add(self.theme.button_small("Close")).clicked() {
                                self.show_notifications_popup = false;
                            }
                            if ui.add(self.theme.button_small("Clear")).clicked() {
                                self.notifications.clear();
                            }
                        });
                    });
                    ui.add_space(self.theme.spacing_xs);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .max_height(280.0)
                        .show(ui, |ui| {
                            if self.notifications.is_empty() {
                                ui.label(
                                    RichText::new("No notifications yet.")
                                        .color(self.theme.text_secondary),
                                );
                            } else {
                                for notification in self.notifications.iter().rev() {
                                    ui.horizontal(|ui| {
                                        ui.label(
                                            RichText::new(format!("[{}]", notification.time_ago()))
                                                .size(11.0)
                                                .color(self.theme.text_secondary),
                                        );
                                        ui.label(
                                            RichText::new(&notification.message)
                                                .size(12.0)
                                                .color(self.theme.text_primary),
                                        );
                                    });
                                    ui.add_space(3.0);
                                }
                            }
                        });
                });
        }

        while self.notifications.len() > 50 {
            self.notifications.pop_front();
        }
    }
}

impl App for MargoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new("Margo")
                        .size(26.0)
                        .color(self.theme.primary)
                        .strong(),
                );
                ui.label(
                    RichText::new("Product Pricing & Profit Margin Calculator")
                        .size(14.0)
                        .color(self.theme.text_secondary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(12.0)
                            .color(self.theme.text_secondary),
                    );
                });
            });
            ui.add_space(6.0);
        });

        self.render_notifications(ctx);

        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(160.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.surface)
                    .stroke(egui::Stroke::new(1.0, self.theme.secondary)),
            )
            .show(ctx, |ui| {
                ui.add_space(self.theme.spacing_md);

                let nav_items = [
                    (GuiSection::Calculator, "[%] Calculator"),
                    (GuiSection::Settings, "[*] Settings"),
                ];

                for (section, label) in nav_items {
                    let selected = self.section == section;
                    ui.horizontal(|ui| {
                        if selected {
                            ui.add_space(2.0);
                            let (rect, _) = ui
                                .allocate_exact_size(egui::vec2(3.0, 20.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 0.0, self.theme.primary);
                            ui.add_space(4.0);
                        } else {
                            ui.add_space(9.0);
                        }

                        let text_color = if selected {
                            self.theme.text_primary
                        } else {
                            self.theme.text_secondary
                        };
                        let response = ui.add(
                            egui::Button::new(RichText::new(label).size(13.0).color(text_color))
                                .fill(egui::Color32::TRANSPARENT)
                                .stroke(egui::Stroke::NONE)
                                .sense(egui::Sense::click()),
                        );
                        if response.clicked() {
                            self.section = section;
                            // The log panel lives on Settings; keep it fresh on entry
                            if section == GuiSection::Settings {
                                self.refresh_log();
                            }
                        }
                    });
                    ui.add_space(self.theme.spacing_xs);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(self.theme.spacing_md);
            egui::ScrollArea::vertical().show(ui, |ui| match self.section {
                GuiSection::Calculator => self.view_calculator(ui),
                GuiSection::Settings => self.view_settings(ui),
            });
        });

        // The toast closes on a timer, not on input
        if self.notification_toast_visible {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

pub fn launch(config: Config) -> Result<()> {
    // One read of the settings file covers both the table path below and the
    // form defaults handed to the app.
    let user_settings = UserSettings::load();
    let table_path = config
        .currencies_path
        .clone()
        .or_else(|| user_settings.currencies_file.as_ref().map(Into::into));

    // Reference table load failure is fatal to startup
    let (currency_table, currency_source) = match &table_path {
        Some(path) => {
            let table = CurrencyTable::load_from_path(path)
                .with_context(|| format!("loading currency table {}", path.display()))?;
            (table, CurrencySource::File(path.display().to_string()))
        }
        None => (
            CurrencyTable::embedded().context("parsing embedded currency table")?,
            CurrencySource::Embedded,
        ),
    };
    tracing::info!(
        "Currency table ready: {} entries from {}",
        currency_table.len(),
        currency_source.display()
    );

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(MargoApp::new(
            config,
            user_settings,
            currency_table,
            currency_source,
            &cc.egui_ctx,
        )) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default().with_inner_size([1180.0, 760.0]);
    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Margo - Product Pricing & Profit Margin Calculator",
        native_options,
        Box::new(app_creator),
    )
    .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}

#[cfg(test)]
impl MargoApp {
    /// App state assembled directly so tests never touch the settings file.
    pub(crate) fn test_fixture() -> Self {
        let currency_table = CurrencyTable::embedded().unwrap();
        Self {
            user_settings: UserSettings::default(),
            theme: AppTheme::default(),
            section: GuiSection::Calculator,
            currency_table,
            currency_source: CurrencySource::Embedded,
            sheet: ExpenseSheet::seeded(),
            selected_symbol: DEFAULT_SYMBOL.to_string(),
            new_expense_label: String::new(),
            markup_percent: 50.0,
            has_calculated: false,
            quote: Quote::unset(DEFAULT_SYMBOL),
            projection: projection_series(
                chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            ),
            notifications: VecDeque::new(),
            show_notifications_popup: false,
            notification_toast_visible: false,
            notification_toast_close_time: None,
            last_notification_count: 0,
            settings_pending_symbol: DEFAULT_SYMBOL.to_string(),
            settings_pending_markup: 50.0,
            log_view: LogViewState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> MargoApp {
        MargoApp::test_fixture()
    }

    // ==================== construction tests ====================

    #[test]
    fn test_new_applies_passed_in_settings() {
        let settings = UserSettings {
            default_symbol: "€".to_string(),
            default_markup: 72.0,
            currencies_file: None,
        };
        let app = MargoApp::new(
            Config::new(),
            settings,
            CurrencyTable::embedded().unwrap(),
            CurrencySource::Embedded,
            &egui::Context::default(),
        );
        assert_eq!(app.selected_symbol, "€");
        assert_eq!(app.markup_percent, 72.0);
        assert_eq!(app.settings_pending_symbol, "€");
    }

    #[test]
    fn test_new_falls_back_when_saved_symbol_missing() {
        let settings = UserSettings {
            default_symbol: "not-a-symbol".to_string(),
            default_markup: 50.0,
            currencies_file: None,
        };
        let app = MargoApp::new(
            Config::new(),
            settings,
            CurrencyTable::embedded().unwrap(),
            CurrencySource::Embedded,
            &egui::Context::default(),
        );
        assert_eq!(app.selected_symbol, DEFAULT_SYMBOL);
    }

    // ==================== unset display tests ====================

    #[test]
    fn test_readouts_are_bare_zero_before_first_calculate() {
        let mut app = test_app();
        let id = app.sheet.rows()[0].id;
        app.on_edit_amount(id, "125".to_string());
        assert_eq!(app.quote.total, "$0");
        assert_eq!(app.quote.margin, "$0");
        assert_eq!(app.quote.price, "$0");
    }

    #[test]
    fn test_readouts_track_edits_after_calculate() {
        let mut app = test_app();
        let id = app.sheet.rows()[0].id;
        app.has_calculated = true;
        app.on_edit_amount(id, "10".to_string());
        assert_eq!(app.quote.total, "$10.00");
        assert_eq!(app.quote.margin, "$5.00");
        assert_eq!(app.quote.price, "$15.00");
    }

    // ==================== currency broadcast tests ====================

    #[test]
    fn test_currency_change_keeps_amount_texts() {
        let mut app = test_app();
        let id = app.sheet.rows()[1].id;
        app.on_edit_amount(id, "42.50".to_string());
        app.on_select_currency("€");
        // One selection relabels every row's prefix; the single source of
        // truth is the selected symbol, and the amounts are untouched
        assert_eq!(app.selected_symbol, "€");
        assert_eq!(app.sheet.get(id).unwrap().amount_text, "42.50");
        assert_eq!(app.quote.total, "€0");
    }

    #[test]
    fn test_unknown_currency_symbol_is_ignored() {
        let mut app = test_app();
        app.on_select_currency("not-a-symbol");
        assert_eq!(app.selected_symbol, "$");
    }

    // ==================== add/remove event tests ====================

    #[test]
    fn test_add_row_uses_new_expense_label() {
        let mut app = test_app();
        app.new_expense_label = "Packaging".to_string();
        app.on_add_row();
        assert_eq!(app.sheet.rows().last().unwrap().label, "Packaging");
    }

    #[test]
    fn test_add_row_blank_label_gets_placeholder() {
        let mut app = test_app();
        app.new_expense_label = "   ".to_string();
        app.on_add_row();
        assert_eq!(app.sheet.rows().last().unwrap().label, "Expense");
    }

    #[test]
    fn test_remove_row_on_empty_sheet_is_noop() {
        let mut app = test_app();
        app.sheet = ExpenseSheet::new();
        app.on_remove_row();
        assert!(app.sheet.is_empty());
    }

    #[test]
    fn test_stale_edit_after_remove_has_no_effect() {
        let mut app = test_app();
        app.has_calculated = true;
        let stale = app.sheet.rows().last().unwrap().id;
        app.on_remove_row();
        app.on_edit_amount(stale, "999".to_string());
        assert_eq!(app.quote.total, "$0.00");
    }
}
