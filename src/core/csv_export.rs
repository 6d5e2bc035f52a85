use crate::domain::model::{CsvExport, MovieRecord, CSV_FILE_NAME, CSV_MIME_TYPE};
use regex::Regex;
use std::sync::OnceLock;

pub const CSV_HEADER: &str = "Title,Year,Rating10,WatchedDate";

fn year_suffix() -> &'static Regex {
    static YEAR_SUFFIX: OnceLock<Regex> = OnceLock::new();
    YEAR_SUFFIX.get_or_init(|| Regex::new(r"\s*\(\d{4}\)$").expect("year suffix pattern is valid"))
}

/// Title as exported: trailing "(YYYY)" removed, quoted, inner quotes doubled.
pub fn export_title(title: &str) -> String {
    let clean = year_suffix().replace(title, "");
    format!("\"{}\"", clean.trim().replace('"', "\"\""))
}

fn render_row(record: &MovieRecord) -> String {
    format!(
        "{},{},{},{}",
        export_title(&record.title),
        record.year.as_deref().unwrap_or(""),
        record
            .rating
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        record.watched_date.as_deref().unwrap_or("")
    )
}

/// Renders records as CSV in their current order.
///
/// Only the title is quoted; the other columns are written verbatim. Comment,
/// favorite flag and list type are not part of the export.
pub fn to_csv(records: &[MovieRecord]) -> Vec<u8> {
    let rows: Vec<String> = records.iter().map(render_row).collect();
    format!("{}\n{}", CSV_HEADER, rows.join("\n")).into_bytes()
}

/// The downloadable file, or `None` when there is nothing to export.
pub fn export(records: &[MovieRecord]) -> Option<CsvExport> {
    if records.is_empty() {
        return None;
    }

    Some(CsvExport {
        file_name: CSV_FILE_NAME.to_string(),
        mime_type: CSV_MIME_TYPE.to_string(),
        bytes: to_csv(records),
    })
}
