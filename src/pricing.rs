//! Derived pricing metrics.
//!
//! Pure calculation from the entered amount texts, the markup percentage and
//! the selected currency symbol to the three formatted readouts: total
//! expenses, profit margin and product price. No state, no side effects.
//!
//! Amount texts that are blank or fail to parse as a finite decimal number
//! contribute zero to the total rather than failing the computation. The user
//! is mid-edit most of the time; a half-typed "12." must not blank the form.

/// The three formatted readouts shown on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub total: String,
    pub margin: String,
    pub price: String,
}

impl Quote {
    /// Display state before the first Calculate click: a bare `<symbol>0`
    /// in all three readouts, distinct from a computed `0.00`.
    pub fn unset(symbol: &str) -> Self {
        let blank = format!("{}0", symbol);
        Self {
            total: blank.clone(),
            margin: blank.clone(),
            price: blank,
        }
    }
}

/// Parse one amount text. Returns `None` for blank input and for anything
/// that is not a finite decimal number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a value as `<symbol><value to 2 decimal places>`.
pub fn format_money(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, value)
}

/// Sum the parseable amounts.
pub fn total_expenses<S: AsRef<str>>(amount_texts: &[S]) -> f64 {
    amount_texts
        .iter()
        .filter_map(|t| parse_amount(t.as_ref()))
        .sum()
}

/// Compute the formatted total/margin/price readouts.
///
/// margin = total × markup/100, price = total × (1 + markup/100). The markup
/// is taken as entered; negative values produce a negative margin and a price
/// below cost.
pub fn compute<S: AsRef<str>>(amount_texts: &[S], markup_percent: f64, symbol: &str) -> Quote {
    let total = total_expenses(amount_texts);
    let margin = total * (markup_percent / 100.0);
    let price = total * (1.0 + markup_percent / 100.0);
    Quote {
        total: format_money(symbol, total),
        margin: format_money(symbol, margin),
        price: format_money(symbol, price),
    }
}
