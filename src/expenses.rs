//! Expense sheet state.
//!
//! An ordered list of named expense rows. Rows are appended at the tail and
//! removed from the tail only; there is no reordering or arbitrary insertion.
//! Each row carries a stable generated [`RowId`] so that an edit addressed to
//! a row that has since been removed is simply dropped instead of landing on
//! whatever row now occupies that position.

/// Stable identifier assigned to a row at creation time. Never reused within
/// a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

impl RowId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// One expense entry: a label plus the user's amount text.
///
/// The amount is kept as entered; parsing happens in the pricing module so
/// that half-typed input never destroys what the user wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: RowId,
    pub label: String,
    pub amount_text: String,
}

/// Labels seeded into a fresh sheet, matching the classic cost breakdown the
/// form opens with.
pub const DEFAULT_EXPENSE_LABELS: &[&str] = &[
    "Material Expenses",
    "Labor Expenses",
    "Shipping Expenses",
    "Third-Party Market Fees",
    "Other Expenses",
];

/// Ordered expense rows with append/remove-last semantics.
#[derive(Debug, Clone, Default)]
pub struct ExpenseSheet {
    rows: Vec<ExpenseRow>,
    next_id: u64,
}

impl ExpenseSheet {
    /// An empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet pre-populated with [`DEFAULT_EXPENSE_LABELS`].
    pub fn seeded() -> Self {
        let mut sheet = Self::new();
        for label in DEFAULT_EXPENSE_LABELS {
            sheet.add_row(*label);
        }
        sheet
    }

    /// Append a row with an empty amount and return its id.
    pub fn add_row(&mut self, label: impl Into<String>) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(ExpenseRow {
            id,
            label: label.into(),
            amount_text: String::new(),
        });
        id
    }

    /// Remove the last row. No-op on an empty sheet. Returns the removed id.
    pub fn remove_last_row(&mut self) -> Option<RowId> {
        self.rows.pop().map(|row| row.id)
    }

    /// Set the amount text of the row with the given id. An unknown id (a row
    /// removed while the edit was in flight) is silently ignored.
    pub fn edit_amount(&mut self, id: RowId, text: impl Into<String>) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.amount_text = text.into();
        }
    }

    pub fn rows(&self) -> &[ExpenseRow] {
        &self.rows
    }

    pub fn get(&self, id: RowId) -> Option<&ExpenseRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Amount texts in row order, as fed to the pricing calculator.
    pub fn amount_texts(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.amount_text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== add/remove tests ====================

    #[test]
    fn test_add_row_appends_in_order() {
        let mut sheet = ExpenseSheet::new();
        sheet.add_row("Materials");
        sheet.add_row("Labor");
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows()[0].label, "Materials");
        assert_eq!(sheet.rows()[1].label, "Labor");
    }

    #[test]
    fn test_add_row_starts_with_empty_amount() {
        let mut sheet = ExpenseSheet::new();
        let id = sheet.add_row("Materials");
        assert_eq!(sheet.get(id).unwrap().amount_text, "");
    }

    #[test]
    fn test_remove_last_row_removes_tail() {
        let mut sheet = ExpenseSheet::new();
        sheet.add_row("Materials");
        let last = sheet.add_row("Labor");
        assert_eq!(sheet.remove_last_row(), Some(last));
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rows()[0].label, "Materials");
    }

    #[test]
    fn test_remove_last_row_on_empty_is_noop() {
        let mut sheet = ExpenseSheet::new();
        assert_eq!(sheet.remove_last_row(), None);
        assert_eq!(sheet.len(), 0);
    }

    #[test]
    fn test_row_count_matches_add_remove_balance() {
        // len after any sequence == max(0, adds - removes)
        let mut sheet = ExpenseSheet::new();
        let ops: &[(bool, usize)] = &[(true, 3), (false, 1), (true, 2), (false, 7), (true, 1)];
        let mut adds = 0i64;
        let mut removes = 0i64;
        for &(is_add, count) in ops {
            for _ in 0..count {
                if is_add {
                    sheet.add_row("x");
                    adds += 1;
                } else {
                    sheet.remove_last_row();
                    removes += 1;
                    // removes past empty do not go negative
                    if removes > adds {
                        removes = adds;
                    }
                }
            }
        }
        assert_eq!(sheet.len() as i64, (adds - removes).max(0));
    }

    // ==================== id tests ====================

    #[test]
    fn test_row_ids_are_unique_and_not_reused() {
        let mut sheet = ExpenseSheet::new();
        let a = sheet.add_row("a");
        let b = sheet.add_row("b");
        assert_ne!(a, b);
        sheet.remove_last_row();
        let c = sheet.add_row("c");
        assert_ne!(b, c);
    }

    // ==================== edit_amount tests ====================

    #[test]
    fn test_edit_amount_sets_text() {
        let mut sheet = ExpenseSheet::new();
        let id = sheet.add_row("Materials");
        sheet.edit_amount(id, "12.50");
        assert_eq!(sheet.get(id).unwrap().amount_text, "12.50");
    }

    #[test]
    fn test_edit_amount_stale_id_is_ignored() {
        let mut sheet = ExpenseSheet::new();
        sheet.add_row("Materials");
        let removed = sheet.add_row("Labor");
        sheet.remove_last_row();
        sheet.edit_amount(removed, "99");
        // surviving row untouched, nothing resurrected
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rows()[0].amount_text, "");
    }

    // ==================== seeded sheet tests ====================

    #[test]
    fn test_seeded_sheet_has_default_labels() {
        let sheet = ExpenseSheet::seeded();
        assert_eq!(sheet.len(), DEFAULT_EXPENSE_LABELS.len());
        assert_eq!(sheet.rows()[0].label, "Material Expenses");
        assert_eq!(sheet.rows()[4].label, "Other Expenses");
    }

    #[test]
    fn test_amount_texts_in_row_order() {
        let mut sheet = ExpenseSheet::new();
        let a = sheet.add_row("a");
        let b = sheet.add_row("b");
        sheet.edit_amount(b, "2");
        sheet.edit_amount(a, "1");
        assert_eq!(sheet.amount_texts(), vec!["1".to_string(), "2".to_string()]);
    }
}
