use chrono::FixedOffset;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::model::attendance::AttendanceLog;
use crate::stats::{format_date, format_time};

pub const SHEET_NAME: &str = "Attendance";
pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header title and column width (characters).
const COLUMNS: [(&str, f64); 4] = [
    ("Name", 20.0),
    ("Date", 12.0),
    ("Time", 10.0),
    ("Synced At", 20.0),
];

/// Renders events as a single-sheet `.xlsx` workbook. Ingestion timestamps
/// are shown in `offset`.
pub fn render(logs: &[AttendanceLog], offset: FixedOffset) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, *width)?;
    }

    for (i, log) in logs.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, log.name.as_str())?;
        sheet.write_string(row, 1, format_date(log.date))?;
        sheet.write_string(row, 2, format_time(log.time))?;
        sheet.write_string(
            row,
            3,
            log.synced_at
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        )?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::stats::{parse_date, parse_time};
    use calamine::{Reader, Xlsx, open_workbook_from_rs};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    /// Reads every sheet row back as text.
    pub(crate) fn read_rows(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn log(name: &str, date: &str, time: &str) -> AttendanceLog {
        AttendanceLog {
            id: format!("{name}-{date}-{time}"),
            name: name.to_string(),
            date: parse_date(date).unwrap(),
            time: parse_time(time).unwrap(),
            kind: None,
            synced_at: Utc.with_ymd_and_hms(2026, 1, 5, 23, 30, 0).unwrap(),
        }
    }

    #[test]
    fn rows_read_back_unchanged() {
        let logs = vec![
            log("Ana", "2026-01-06", "18:30:00"),
            log("=SUM(A1)", "2026-01-05", "9:05"),
        ];
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();

        let rows = read_rows(render(&logs, offset).unwrap());

        assert_eq!(
            rows,
            vec![
                vec!["Name", "Date", "Time", "Synced At"],
                vec!["Ana", "2026-01-06", "18:30:00", "2026-01-06 04:30:00"],
                vec!["=SUM(A1)", "2026-01-05", "09:05:00", "2026-01-06 04:30:00"],
            ]
        );
    }

    #[test]
    fn empty_export_has_header_only() {
        let rows = read_rows(render(&[], FixedOffset::east_opt(0).unwrap()).unwrap());
        assert_eq!(rows, vec![vec!["Name", "Date", "Time", "Synced At"]]);
    }
}
