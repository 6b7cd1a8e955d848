//! Illustrative markup projection.
//!
//! Data for the static chart shown beside the form: 24 monthly buckets from
//! today, bar heights sweeping the markup range 10..240 in steps of 10. The
//! chart is decorative and does not depend on the entered expenses.

use chrono::{Datelike, Months, NaiveDate};

/// Number of monthly buckets shown.
pub const PROJECTION_MONTHS: usize = 24;

/// First bar height and step between bars, in markup percent.
pub const MARKUP_START: f64 = 10.0;
pub const MARKUP_STEP: f64 = 10.0;

/// One bar of the projection chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPoint {
    pub month: NaiveDate,
    pub markup_percent: f64,
}

impl ProjectionPoint {
    /// Axis label, e.g. "Mar '27".
    pub fn month_label(&self) -> String {
        format!("{} '{:02}", month_abbrev(self.month.month()), self.month.year() % 100)
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// Build the projection series starting from the given date.
pub fn projection_series(from: NaiveDate) -> Vec<ProjectionPoint> {
    (0..PROJECTION_MONTHS)
        .map(|i| {
            let month = from
                .checked_add_months(Months::new(i as u32))
                .unwrap_or(from);
            ProjectionPoint {
                month,
                markup_percent: MARKUP_START + MARKUP_STEP * i as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    // ==================== projection_series tests ====================

    #[test]
    fn test_projection_series_has_24_points() {
        assert_eq!(projection_series(start()).len(), PROJECTION_MONTHS);
    }

    #[test]
    fn test_projection_series_heights_sweep_markup_range() {
        let series = projection_series(start());
        assert_eq!(series[0].markup_percent, 10.0);
        assert_eq!(series[1].markup_percent, 20.0);
        assert_eq!(series[23].markup_percent, 240.0);
    }

    #[test]
    fn test_projection_series_months_advance() {
        let series = projection_series(start());
        assert_eq!(series[0].month, start());
        assert_eq!(series[1].month, NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
        assert_eq!(series[12].month, NaiveDate::from_ymd_opt(2027, 3, 15).unwrap());
    }

    #[test]
    fn test_projection_series_crosses_year_boundary() {
        let december = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        let series = projection_series(december);
        assert_eq!(series[1].month, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    // ==================== label tests ====================

    #[test]
    fn test_month_label_format() {
        let point = ProjectionPoint {
            month: NaiveDate::from_ymd_opt(2027, 3, 1).unwrap(),
            markup_percent: 10.0,
        };
        assert_eq!(point.month_label(), "Mar '27");
    }

    #[test]
    fn test_month_label_pads_single_digit_year() {
        let point = ProjectionPoint {
            month: NaiveDate::from_ymd_opt(2109, 11, 1).unwrap(),
            markup_percent: 10.0,
        };
        assert_eq!(point.month_label(), "Nov '09");
    }
}
