use crate::domain::model::MovieRecord;

const PLACEHOLDER: &str = "—";

/// Rating as shown for review: "8" becomes "8/10", values that already carry a scale are kept.
pub fn display_rating(record: &MovieRecord) -> String {
    let value = record
        .rating
        .as_ref()
        .map(|rating| rating.to_string().trim().to_string())
        .unwrap_or_default();

    if value.is_empty() || value == "undefined" || value == "null" {
        PLACEHOLDER.to_string()
    } else if value.contains('/') {
        value
    } else {
        format!("{}/10", value)
    }
}

/// Plain-text review table, one line per record, prefixed with the position
/// used to remove that row.
pub fn render_table(records: &[MovieRecord]) -> String {
    if records.is_empty() {
        return "No items detected for processing.".to_string();
    }

    let title_width = records
        .iter()
        .map(|record| record.title.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 48);

    let mut lines = vec![format!(
        "{:>4}  {:<title_width$}  {:<6}  {:<7}  {}",
        "#", "Title", "Year", "Rating", "Comment"
    )];

    for (index, record) in records.iter().enumerate() {
        let title: String = record.title.chars().take(title_width).collect();
        let comment = record
            .comment
            .as_deref()
            .filter(|comment| !comment.is_empty())
            .map(|comment| format!("\"{}\"", comment.replace('\n', " ")))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let favorite = if record.is_favorite { " ♥" } else { "" };

        lines.push(format!(
            "{:>4}  {:<title_width$}  {:<6}  {:<7}  {}{}",
            index,
            title,
            record.year.as_deref().unwrap_or(PLACEHOLDER),
            display_rating(record),
            comment,
            favorite
        ));
    }

    lines.join("\n")
}
