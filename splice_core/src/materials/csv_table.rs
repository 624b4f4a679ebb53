//! Minimal comma-separated table reader shared by the beam and steel catalogs.
//!
//! Catalog files are plain exports without quoting, so a header lookup plus
//! `split(',')` per line is enough.

use std::str::FromStr;

use crate::errors::{SpliceError, SpliceResult};

pub(crate) struct CsvTable<'a> {
    headers: Vec<&'a str>,
    /// (1-based line number, fields)
    rows: Vec<(usize, Vec<&'a str>)>,
}

pub(crate) struct CsvRow<'t, 'a> {
    line: usize,
    fields: &'t [&'a str],
}

impl<'a> CsvTable<'a> {
    pub(crate) fn parse(text: &'a str) -> SpliceResult<Self> {
        let mut lines = text.lines().enumerate();

        let header_line = lines
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(_, line)| line)
            .ok_or_else(|| SpliceError::invalid_input("csv", "", "CSV text is empty"))?;

        let headers = header_line
            .split(',')
            .map(|h| h.trim().trim_start_matches('\u{feff}'))
            .collect();

        let rows = lines
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx + 1, line.split(',').map(str::trim).collect()))
            .collect();

        Ok(CsvTable { headers, rows })
    }

    /// Index of the first header matching any of `names` (case-insensitive).
    pub(crate) fn column(&self, names: &[&str]) -> SpliceResult<usize> {
        names
            .iter()
            .find_map(|name| {
                self.headers
                    .iter()
                    .position(|h| h.to_lowercase() == name.to_lowercase())
            })
            .ok_or_else(|| {
                SpliceError::invalid_input("csv", self.headers.join(","), format!("Missing '{}' column", names[0]))
            })
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = CsvRow<'_, 'a>> {
        self.rows.iter().map(|(line, fields)| CsvRow {
            line: *line,
            fields: fields.as_slice(),
        })
    }
}

impl CsvRow<'_, '_> {
    pub(crate) fn text(&self, idx: usize) -> &str {
        self.fields.get(idx).copied().unwrap_or("")
    }

    /// Parse a strictly positive number, reporting the field and line on failure.
    pub(crate) fn positive(&self, idx: usize, field: &str) -> SpliceResult<f64> {
        let raw = self.text(idx);
        match f64::from_str(raw) {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => Err(SpliceError::invalid_input(
                field,
                raw,
                format!("Expected a positive number on line {}", self.line),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_bom_and_blank_lines() {
        let table = CsvTable::parse("\u{feff}Сталь,Предел текучести\n\nС255, 240\n").unwrap();
        assert_eq!(table.column(&["Сталь"]).unwrap(), 0);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[0].positive(1, "yield").unwrap(), 240.0);
    }

    #[test]
    fn test_short_row_reads_empty() {
        let table = CsvTable::parse("a,b\n1\n").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.text(1), "");
        assert!(row.positive(1, "b").is_err());
    }

    #[test]
    fn test_empty_text() {
        assert!(CsvTable::parse("  \n").is_err());
    }
}
