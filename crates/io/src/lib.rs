// File I/O: notification logs, statements, form workbooks, xlsx reports

pub mod error;
pub mod report;
pub mod text;
pub mod workbook;

pub use error::IoError;
pub use report::{write_unresolved, write_verdicts};
pub use text::read_file_as_utf8;
pub use workbook::read_form_workbook;
