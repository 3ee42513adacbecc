//! Spreadsheet export of scrape results.

use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use vinodb_core::{WineRecord, REPORT_COLUMNS};

const REPORT_PREFIX: &str = "PRECIOS COMPETENCIA";

/// `PRECIOS COMPETENCIA Nov 2025.xlsx` for any date in November 2025.
pub(crate) fn report_filename(date: NaiveDate) -> String {
    format!("{REPORT_PREFIX} {}.xlsx", date.format("%b %Y"))
}

/// Cell values for every record, in record order.
pub(crate) fn report_rows(records: &[WineRecord]) -> Vec<[String; 8]> {
    records.iter().map(WineRecord::to_row).collect()
}

/// Writes a single-sheet workbook: a header row of [`REPORT_COLUMNS`] and
/// one row per record. No index column.
pub(crate) fn write_report(path: &Path, records: &[WineRecord]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    for (col, title) in (0u16..).zip(REPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, cells) in (1u32..).zip(report_rows(records)) {
        for (col, cell) in (0u16..).zip(cells) {
            sheet.write_string(row, col, &cell)?;
        }
    }

    workbook.save(path)
}

#[cfg(test)]
mod tests {
    use vinodb_core::{DetailAttributes, ItemStub, NOT_AVAILABLE};

    use super::*;

    fn record(name: &str, listed: &str, current: Option<&str>) -> WineRecord {
        WineRecord::from_parts(
            ItemStub {
                name: name.to_owned(),
                detail_url: format!("https://shop.example/vinos/{name}"),
                listed_price: Some(listed.to_owned()),
                current_price: current.map(str::to_owned),
            },
            DetailAttributes::default(),
        )
    }

    #[test]
    fn filename_embeds_month_abbreviation_and_year() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        assert_eq!(report_filename(date), "PRECIOS COMPETENCIA Nov 2025.xlsx");
    }

    #[test]
    fn rows_keep_record_order_and_column_layout() {
        let records = vec![
            record("uno", "$10.000,00", Some("$8.000,00")),
            record("dos", "$5.000,00", None),
        ];
        let rows = report_rows(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "uno");
        assert_eq!(rows[0][5], "$10.000");
        assert_eq!(rows[0][6], "$8.000");
        assert_eq!(rows[0][7], "20%");
        assert_eq!(rows[1][0], "dos");
        assert_eq!(rows[1][6], NOT_AVAILABLE);
        assert_eq!(rows[1][7], "");
    }

    #[test]
    fn write_report_creates_workbook() {
        let path = std::env::temp_dir().join(format!(
            "vinodb-export-test-{}.xlsx",
            std::process::id()
        ));
        let records = vec![record("uno", "$10.000,00", Some("$8.000,00"))];

        write_report(&path, &records).expect("workbook should be written");

        let metadata = std::fs::metadata(&path).expect("workbook file should exist");
        assert!(metadata.len() > 0);
        std::fs::remove_file(&path).ok();
    }
}
