use crate::models::RiskRecord;

/// Suggested download name for the heatmap export
pub const EXPORT_FILE_NAME: &str = "risk-exposure-heatmap.csv";

pub const CSV_HEADER: &str =
    "Risk Category,Exposure Level,Impact Level,Mitigation Status,Risk Level,Last Updated";

/// Render records as heatmap CSV, header first, one row per record.
///
/// Fields are joined as-is with no quoting; category names and timestamps
/// never contain commas.
pub fn to_csv<'a>(records: impl IntoIterator<Item = &'a RiskRecord>) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    lines.extend(records.into_iter().map(csv_row));
    lines.join("\n")
}

fn csv_row(record: &RiskRecord) -> String {
    format!(
        "{},{}%,{}%,{}%,{},{}",
        record.category,
        record.exposure,
        record.impact,
        record.mitigation,
        record.risk_level.label(),
        record.last_updated
    )
}
