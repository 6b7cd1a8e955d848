//! Helper functions for the GUI
//!
//! Markup classification used by the form and the settings sliders.

/// Label for a markup percentage
pub fn markup_label(markup: f64) -> &'static str {
    if markup < 0.0 {
        "Below cost"
    } else if markup == 0.0 {
        "Break-even"
    } else if markup < 30.0 {
        "Low"
    } else if markup <= 100.0 {
        "Standard"
    } else {
        "Premium"
    }
}

/// Get a warning message for extreme markup values, if any
pub fn markup_warning(markup: f64) -> Option<&'static str> {
    if markup < 0.0 {
        Some("⚠ Negative markup: the product price will be below total expenses")
    } else if markup > 500.0 {
        Some("⚠ Very high markup: double-check the percentage")
    } else {
        None
    }
}

/// Shorten a message for the toast strip, cutting on a char boundary so
/// non-ASCII paths and currency names never split a character.
pub fn truncate_message(msg: &str, max_chars: usize) -> String {
    if msg.chars().count() <= max_chars {
        msg.to_string()
    } else {
        let mut out: String = msg.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== markup_label tests ====================

    #[test]
    fn test_markup_label_below_cost() {
        assert_eq!(markup_label(-10.0), "Below cost");
    }

    #[test]
    fn test_markup_label_break_even() {
        assert_eq!(markup_label(0.0), "Break-even");
    }

    #[test]
    fn test_markup_label_low() {
        assert_eq!(markup_label(10.0), "Low");
        assert_eq!(markup_label(29.9), "Low");
    }

    #[test]
    fn test_markup_label_standard() {
        assert_eq!(markup_label(30.0), "Standard");
        assert_eq!(markup_label(50.0), "Standard");
        assert_eq!(markup_label(100.0), "Standard");
    }

    #[test]
    fn test_markup_label_premium() {
        assert_eq!(markup_label(100.1), "Premium");
        assert_eq!(markup_label(240.0), "Premium");
    }

    // ==================== markup_warning tests ====================

    #[test]
    fn test_markup_warning_negative() {
        assert!(markup_warning(-5.0).is_some());
        assert!(markup_warning(-5.0).unwrap().contains("Negative"));
    }

    #[test]
    fn test_markup_warning_none_in_normal_range() {
        assert!(markup_warning(0.0).is_none());
        assert!(markup_warning(50.0).is_none());
        assert!(markup_warning(500.0).is_none());
    }

    #[test]
    fn test_markup_warning_very_high() {
        assert!(markup_warning(500.1).is_some());
        assert!(markup_warning(500.1).unwrap().contains("Very high"));
    }

    // ==================== truncate_message tests ====================

    #[test]
    fn test_truncate_message_short_passthrough() {
        assert_eq!(truncate_message("all good", 48), "all good");
    }

    #[test]
    fn test_truncate_message_long_ascii() {
        let msg = "x".repeat(60);
        let out = truncate_message(&msg, 48);
        assert_eq!(out.len(), 51);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_message_multibyte_at_boundary() {
        // A '€' straddling the cut point must not split mid-character
        let msg = format!("{}€ and more text to push past the limit", "a".repeat(47));
        let out = truncate_message(&msg, 48);
        assert!(out.ends_with("€..."));
        assert_eq!(out.chars().count(), 51);
    }

    #[test]
    fn test_truncate_message_all_multibyte() {
        let msg = "₹".repeat(60);
        let out = truncate_message(&msg, 48);
        assert_eq!(out.chars().count(), 51);
        assert!(out.starts_with('₹'));
    }
}
