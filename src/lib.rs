//! Margo - Product pricing and profit margin calculator.
//!
//! A small eframe/egui desktop application: enter named expense amounts, pick
//! a currency symbol, set a percentage markup, and read the computed total
//! expenses, profit margin and product price beside an illustrative markup
//! projection chart.

pub mod config;
pub mod currency;
pub mod expenses;
pub mod gui;
pub mod pricing;
pub mod projection;
pub mod quote_log;
pub mod user_settings;
