//! GUI module for the Margo application
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main MargoApp struct, state types, and core application logic
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `helpers` - Markup classification and display helpers
//! - `notifications` - Notification entries and toast handling
//! - `views` - View rendering functions (calculator, settings)
//!
//! ## Usage
//!
//! ```no_run
//! use margo::config::Config;
//! use margo::gui;
//!
//! let config = Config::default();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod helpers;
pub mod notifications;
pub mod theme;
pub mod views;

// Re-export main public API
pub use app::{launch, GuiSection, MargoApp};

// Re-export commonly used types from submodules for convenience
pub use helpers::{markup_label, markup_warning};
pub use notifications::NotificationEntry;
pub use theme::{configure_style, AppTheme};
