//! View modules for the GUI
//!
//! This module organizes the different view implementations of the application.
//! Each submodule contains the rendering logic for a specific view/screen.
//!
//! ## Module Structure
//!
//! - `calculator` - The main form: expense list, markup/readouts, projection chart
//! - `settings` - Defaults, currency table management, quote log, about panel
//!
//! Each view module implements methods on `MargoApp` that take `&mut egui::Ui`
//! and are called from the main `App::update` method in `app.rs`.

pub mod calculator;
pub mod settings;
