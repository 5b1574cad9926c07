pub mod period;
pub mod spreadsheet;
