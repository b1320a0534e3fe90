// Verification report export (xlsx)

use std::path::Path;

use payverify_recon::amount::cents_to_f64;
use payverify_recon::model::{UnresolvedRegistration, Verdict};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::IoError;

pub const VERDICT_HEADERS: [&str; 8] = [
    "Name",
    "Email",
    "Tier",
    "Expected Amount",
    "Status",
    "Received Amount",
    "Difference",
    "Notes",
];

pub const UNRESOLVED_HEADERS: [&str; 5] = ["Name", "Email", "Tier", "Expected Amount", "Payment Method"];

const MONEY_FORMAT: &str = "0.00";

/// Write one provider's verdicts. Absent amounts are left blank.
pub fn write_verdicts(path: &Path, sheet_name: &str, verdicts: &[Verdict]) -> Result<(), IoError> {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format(MONEY_FORMAT);

    fill_verdicts(workbook.add_worksheet(), sheet_name, verdicts, &money).map_err(|e| write_err(path, e))?;
    workbook.save(path).map_err(|e| write_err(path, e))?;

    tracing::debug!(path = %path.display(), rows = verdicts.len(), "wrote verdict report");
    Ok(())
}

/// Write registrations whose payment method matched neither provider.
pub fn write_unresolved(
    path: &Path,
    sheet_name: &str,
    unresolved: &[UnresolvedRegistration],
) -> Result<(), IoError> {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format(MONEY_FORMAT);

    fill_unresolved(workbook.add_worksheet(), sheet_name, unresolved, &money)
        .map_err(|e| write_err(path, e))?;
    workbook.save(path).map_err(|e| write_err(path, e))?;

    tracing::debug!(path = %path.display(), rows = unresolved.len(), "wrote unresolved report");
    Ok(())
}

fn write_err(path: &Path, e: XlsxError) -> IoError {
    IoError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn write_header(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        worksheet.set_column_width(col as u16, column_width(header))?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Excel has no empty-string cells; leave those blank.
fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str) -> Result<(), XlsxError> {
    if !text.is_empty() {
        worksheet.write_string(row, col, text)?;
    }
    Ok(())
}

fn column_width(header: &str) -> f64 {
    match header {
        "Name" | "Email" | "Payment Method" => 28.0,
        _ => (header.chars().count() as f64 + 4.0).max(10.0),
    }
}

fn fill_verdicts(
    worksheet: &mut Worksheet,
    sheet_name: &str,
    verdicts: &[Verdict],
    money: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(sheet_name)?;
    write_header(worksheet, &VERDICT_HEADERS)?;

    for (idx, v) in verdicts.iter().enumerate() {
        let row = idx as u32 + 1;
        write_text(worksheet, row, 0, &v.name)?;
        write_text(worksheet, row, 1, v.email.as_deref().unwrap_or(""))?;
        write_text(worksheet, row, 2, &v.tier)?;
        worksheet.write_number_with_format(row, 3, cents_to_f64(v.expected_cents), money)?;
        write_text(worksheet, row, 4, &v.status.to_string())?;
        if let Some(received) = v.received_cents {
            worksheet.write_number_with_format(row, 5, cents_to_f64(received), money)?;
        }
        if let Some(diff) = v.difference_cents {
            worksheet.write_number_with_format(row, 6, cents_to_f64(diff), money)?;
        }
        write_text(worksheet, row, 7, &v.note.to_string())?;
    }

    Ok(())
}

fn fill_unresolved(
    worksheet: &mut Worksheet,
    sheet_name: &str,
    unresolved: &[UnresolvedRegistration],
    money: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(sheet_name)?;
    write_header(worksheet, &UNRESOLVED_HEADERS)?;

    for (idx, u) in unresolved.iter().enumerate() {
        let row = idx as u32 + 1;
        write_text(worksheet, row, 0, &u.name)?;
        write_text(worksheet, row, 1, u.email.as_deref().unwrap_or(""))?;
        write_text(worksheet, row, 2, &u.tier)?;
        worksheet.write_number_with_format(row, 3, cents_to_f64(u.expected_cents), money)?;
        write_text(worksheet, row, 4, &u.raw_method)?;
    }

    Ok(())
}
