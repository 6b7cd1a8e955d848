//! Centralized theme and styling system for the GUI
//!
//! Provides the AppTheme struct with colors, spacing, and styled widget factories.

use eframe::egui;

/// Centralized theme and styling system
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,

    // Accent colors
    pub accent_amber: egui::Color32,
    pub accent_teal: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
    pub button_large: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Dark slate-blue scheme with amber highlights
            background: egui::Color32::from_rgb(15, 32, 52),
            surface: egui::Color32::from_rgb(24, 44, 68),
            surface_hover: egui::Color32::from_rgb(32, 56, 84),
            surface_active: egui::Color32::from_rgb(42, 70, 102),
            panel_fill: egui::Color32::from_rgb(19, 38, 60),
            text_primary: egui::Color32::from_rgb(235, 235, 235),
            text_secondary: egui::Color32::from_rgb(150, 165, 180),

            primary: egui::Color32::from_rgb(223, 105, 26),
            secondary: egui::Color32::from_rgb(60, 80, 105),
            success: egui::Color32::from_rgb(92, 184, 92),
            warning: egui::Color32::from_rgb(255, 170, 0),
            error: egui::Color32::from_rgb(217, 83, 79),

            accent_amber: egui::Color32::from_rgb(255, 170, 0),
            accent_teal: egui::Color32::from_rgb(75, 180, 190),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,

            button_small: egui::vec2(48.0, 28.0),
            button_medium: egui::vec2(130.0, 34.0),
            button_large: egui::vec2(180.0, 44.0),
        }
    }
}

impl AppTheme {
    /// Create a themed button with consistent sizing and colors
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .strong(),
        )
        .fill(self.surface)
        .stroke(egui::Stroke::new(2.0, self.primary))
        .min_size(self.button_medium)
    }

    /// Create a themed secondary button (outlined style)
    pub fn button_secondary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface)
            .stroke(egui::Stroke::new(1.0, self.secondary))
            .min_size(self.button_medium)
    }

    /// Create a small themed button
    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.secondary)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
            .min_size(self.button_small)
    }

    /// Create a large themed button for the main call to action
    pub fn button_large(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .size(16.0)
                .strong(),
        )
        .fill(self.primary)
        .min_size(self.button_large)
    }

    /// Create a themed frame for surface elements
    pub fn frame_surface(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(4.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.secondary))
    }

    /// Create a themed frame for panels/cards
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(4.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.accent_teal))
    }

    /// Frame for the big readout cards (total, margin, price)
    pub fn frame_readout(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(4.0)
            .inner_margin(egui::Margin::symmetric(self.spacing_md, self.spacing_lg))
            .stroke(egui::Stroke::new(2.0, self.accent_amber))
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    // Input fields get a visible teal outline, brighter while editing
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.5, theme.accent_teal);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.accent_teal);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(24.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );

    ctx.set_style(style);
}
