//! Currency reference table.
//!
//! The table maps a currency symbol to a country/currency display name. It is
//! loaded once at startup from a semicolon-delimited two-column file and is
//! read-only for the lifetime of the process. A default table ships embedded
//! in the binary; users can point at their own file instead (see Settings).

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Default currency table, embedded at compile time.
pub static DEFAULT_CURRENCIES_CSV: &str = include_str!("currencies.csv");

/// The symbol shown before any explicit selection has been made.
pub const DEFAULT_SYMBOL: &str = "$";

/// Errors raised while loading the currency reference table.
///
/// Any of these is fatal to startup: the application cannot render the
/// currency dropdown without a valid table.
#[derive(Debug, Error)]
pub enum CurrencyTableError {
    #[error("failed to read currency table {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed currency table record on line {line}: expected 2 fields, got {fields}")]
    Malformed { line: u64, fields: usize },
    #[error("failed to parse currency table: {0}")]
    Csv(#[from] csv::Error),
    #[error("currency table contains no entries")]
    Empty,
}

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyEntry {
    /// Symbol shown as the prefix of every amount field (e.g. "$", "€")
    pub symbol: String,
    /// Country and currency display name (e.g. "United States Dollar")
    pub name: String,
}

impl CurrencyEntry {
    /// Dropdown display text, e.g. "€ - Euro"
    pub fn display(&self) -> String {
        format!("{} - {}", self.symbol, self.name)
    }
}

/// Read-only currency reference table, in file order.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    entries: Vec<CurrencyEntry>,
}

impl CurrencyTable {
    /// Load the table embedded in the binary.
    pub fn embedded() -> Result<Self, CurrencyTableError> {
        Self::from_csv(DEFAULT_CURRENCIES_CSV)
    }

    /// Load a table from a file on disk.
    pub fn load_from_path(path: &Path) -> Result<Self, CurrencyTableError> {
        let content = fs::read_to_string(path).map_err(|source| CurrencyTableError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv(&content)
    }

    /// Parse semicolon-delimited `symbol;name` text with a header row.
    pub fn from_csv(content: &str) -> Result<Self, CurrencyTableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut entries = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if record.len() != 2 {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(CurrencyTableError::Malformed {
                    line,
                    fields: record.len(),
                });
            }
            let symbol = record.get(0).unwrap_or("").trim();
            let name = record.get(1).unwrap_or("").trim();
            if symbol.is_empty() || name.is_empty() {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(CurrencyTableError::Malformed {
                    line,
                    fields: record.len(),
                });
            }
            entries.push(CurrencyEntry {
                symbol: symbol.to_string(),
                name: name.to_string(),
            });
        }

        if entries.is_empty() {
            return Err(CurrencyTableError::Empty);
        }

        tracing::debug!("Loaded {} currency entries", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CurrencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its symbol.
    pub fn get(&self, symbol: &str) -> Option<&CurrencyEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_csv tests ====================

    #[test]
    fn test_from_csv_basic() {
        let table = CurrencyTable::from_csv("Symbol;Name\n$;US Dollar\n€;Euro\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].symbol, "$");
        assert_eq!(table.entries()[1].name, "Euro");
    }

    #[test]
    fn test_from_csv_preserves_file_order() {
        let table = CurrencyTable::from_csv("Symbol;Name\n€;Euro\n$;US Dollar\n").unwrap();
        assert_eq!(table.entries()[0].symbol, "€");
        assert_eq!(table.entries()[1].symbol, "$");
    }

    #[test]
    fn test_from_csv_trims_whitespace() {
        let table = CurrencyTable::from_csv("Symbol;Name\n $ ; US Dollar \n").unwrap();
        assert_eq!(table.entries()[0].symbol, "$");
        assert_eq!(table.entries()[0].name, "US Dollar");
    }

    #[test]
    fn test_from_csv_wrong_field_count_fails() {
        let result = CurrencyTable::from_csv("Symbol;Name\n$;US Dollar;extra\n");
        assert!(matches!(
            result,
            Err(CurrencyTableError::Malformed { fields: 3, .. })
        ));
    }

    #[test]
    fn test_from_csv_blank_symbol_fails() {
        let result = CurrencyTable::from_csv("Symbol;Name\n;US Dollar\n");
        assert!(matches!(result, Err(CurrencyTableError::Malformed { .. })));
    }

    #[test]
    fn test_from_csv_header_only_fails() {
        let result = CurrencyTable::from_csv("Symbol;Name\n");
        assert!(matches!(result, Err(CurrencyTableError::Empty)));
    }

    // ==================== embedded table tests ====================

    #[test]
    fn test_embedded_table_parses() {
        let table = CurrencyTable::embedded().unwrap();
        assert!(table.len() >= 10);
    }

    #[test]
    fn test_embedded_table_contains_default_symbol() {
        let table = CurrencyTable::embedded().unwrap();
        assert!(table.contains_symbol(DEFAULT_SYMBOL));
    }

    #[test]
    fn test_embedded_table_contains_euro() {
        let table = CurrencyTable::embedded().unwrap();
        let euro = table.get("€").unwrap();
        assert_eq!(euro.name, "Euro");
    }

    // ==================== lookup tests ====================

    #[test]
    fn test_get_unknown_symbol_is_none() {
        let table = CurrencyTable::from_csv("Symbol;Name\n$;US Dollar\n").unwrap();
        assert!(table.get("₿").is_none());
        assert!(!table.contains_symbol("₿"));
    }

    #[test]
    fn test_entry_display() {
        let entry = CurrencyEntry {
            symbol: "€".to_string(),
            name: "Euro".to_string(),
        };
        assert_eq!(entry.display(), "€ - Euro");
    }

    // ==================== load_from_path tests ====================

    #[test]
    fn test_load_from_path_missing_file_fails() {
        let result = CurrencyTable::load_from_path(Path::new("/nonexistent/currencies.csv"));
        assert!(matches!(result, Err(CurrencyTableError::Read { .. })));
    }
}
