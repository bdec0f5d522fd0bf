#![cfg(not(tarpaulin_include))]

use crate::row::{MonthRow, COLUMNS};
use std::error::Error;

/// Convert the annotated budget table to CSV format
///
/// Produces one header row with the column names in table order, then one
/// row per month with the month label followed by the numeric columns.
/// Special characters in the label (commas, quotes, newlines) are escaped.
///
/// # Arguments
/// * `rows` - The annotated month rows, in chronological order
///
/// # Returns
/// * `Result<String, Box<dyn Error>>` - CSV content as a string or an error
pub fn to_csv(rows: &[MonthRow]) -> Result<String, Box<dyn Error>> {
    let mut csv_content = String::new();

    csv_content.push_str(&COLUMNS.join(","));
    csv_content.push('\n');

    for row in rows {
        csv_content.push_str(&escape_csv_field(&row.month.label()));
        for value in row.values() {
            csv_content.push(',');
            csv_content.push_str(&value.to_string());
        }
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Convert the annotated budget table to XLSX format
///
/// Exports the table to a single-sheet Excel workbook using the
/// rust_xlsxwriter library: a header row matching the table's column order,
/// then one row per month. The workbook is written to an in-memory buffer
/// suitable for a file download.
///
/// # Arguments
/// * `rows` - The annotated month rows, in chronological order
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
pub fn to_xlsx(rows: &[MonthRow]) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    for (c, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, c as u16, *header)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let excel_row = (r + 1) as u32;
        worksheet.write_string(excel_row, 0, row.month.label())?;
        for (c, value) in row.values().iter().enumerate() {
            worksheet.write_number(excel_row, (c + 1) as u16, *value)?;
        }
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

/// Escape a CSV field if it contains commas, quotes, or newlines.
fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{seed_table, STARTING_BALANCE};
    use crate::simulator::simulate;

    #[test]
    fn csv_header_matches_column_order() {
        let mut rows = seed_table();
        simulate(&mut rows, STARTING_BALANCE);

        let csv = to_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        // One line per month.
        assert_eq!(lines.count(), rows.len());
    }

    #[test]
    fn csv_rows_start_with_the_month_label() {
        let mut rows = seed_table();
        simulate(&mut rows, STARTING_BALANCE);

        let csv = to_csv(&rows).unwrap();
        let first_data_line = csv.lines().nth(1).unwrap();
        assert!(first_data_line.starts_with("Aug 2025,"));
        assert_eq!(first_data_line.split(',').count(), COLUMNS.len());
    }

    #[test]
    fn xlsx_export_produces_a_workbook() {
        let mut rows = seed_table();
        simulate(&mut rows, STARTING_BALANCE);

        let bytes = to_xlsx(&rows).unwrap();
        // XLSX files are zip archives; check the magic bytes.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn labels_with_separators_are_escaped() {
        assert_eq!(escape_csv_field("Aug 2025"), "Aug 2025");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
