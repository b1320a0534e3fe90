// Form workbook import (xlsx, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use payverify_recon::form::FormSheet;

use crate::error::IoError;

/// Read every sheet as strings. The first used row of each sheet is its
/// header row; sheet order is preserved.
pub fn read_form_workbook(path: &Path) -> Result<Vec<FormSheet>, IoError> {
    let workbook_err = |message: String| IoError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_err(e.to_string()))?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(workbook_err("workbook contains no sheets".into()));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| workbook_err(format!("cannot read sheet '{sheet_name}': {e}")))?;

        let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let headers = rows.next().unwrap_or_default();
        let rows: Vec<Vec<String>> = rows.collect();

        tracing::debug!(sheet = %sheet_name, columns = headers.len(), rows = rows.len(), "read sheet");

        sheets.push(FormSheet {
            name: sheet_name.clone(),
            headers,
            rows,
        });
    }

    Ok(sheets)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Format nicely: integers without decimals
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => format!("{n}"),
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn reads_sheets_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.xlsx");

        let mut wb = Workbook::new();
        for (tier, name) in [("Tier 2", "Kim Min"), ("Tier 1", "Jane Doe")] {
            let ws = wb.add_worksheet();
            ws.set_name(tier).unwrap();
            ws.write_string(0, 0, "Full name").unwrap();
            ws.write_string(0, 1, "Payment").unwrap();
            ws.write_string(0, 2, "Guests").unwrap();
            ws.write_string(1, 0, name).unwrap();
            ws.write_string(1, 1, "Zelle").unwrap();
            ws.write_number(1, 2, 2.0).unwrap();
            ws.write_string(2, 0, "Lee Park").unwrap();
            ws.write_number(2, 2, 1.5).unwrap();
        }
        wb.save(&path).unwrap();

        let sheets = read_form_workbook(&path).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Tier 2");
        assert_eq!(sheets[1].name, "Tier 1");
        assert_eq!(sheets[0].headers, ["Full name", "Payment", "Guests"]);
        assert_eq!(sheets[0].rows[0], ["Kim Min", "Zelle", "2"]);
        assert_eq!(sheets[0].rows[1], ["Lee Park", "", "1.5"]);
    }

    #[test]
    fn missing_workbook() {
        let err = read_form_workbook(Path::new("/nonexistent/responses.xlsx")).unwrap_err();
        assert!(matches!(err, IoError::Workbook { .. }));
    }
}
