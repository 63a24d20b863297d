use crate::record::KeywordRecord;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "Keyword,Search Volume,Competition";

/// Serialize records to CSV: keyword double-quoted with internal quotes
/// doubled, numeric fields bare. The caller passes the full
/// filtered-and-sorted set, not just the visible page.
pub fn csv_string(records: &[KeywordRecord]) -> String {
    let mut csv = String::from(CSV_HEADER);
    for record in records {
        csv.push('\n');
        csv.push_str(&format!(
            "\"{}\",{},{}",
            record.keyword.replace('"', "\"\""),
            record.search_volume,
            record.competition
        ));
    }
    csv
}

/// `<topic with whitespace runs collapsed to "_">_keywords.csv`.
pub fn file_name(topic: &str) -> String {
    let mut name = String::with_capacity(topic.len() + 13);
    let mut in_gap = false;
    for ch in topic.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                name.push('_');
                in_gap = true;
            }
        } else {
            name.push(ch);
            in_gap = false;
        }
    }
    name.push_str("_keywords.csv");
    name
}

pub fn write_file(dir: &Path, topic: &str, records: &[KeywordRecord]) -> anyhow::Result<PathBuf> {
    let path = dir.join(file_name(topic));
    std::fs::write(&path, csv_string(records))
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("exported {} records to {}", records.len(), path.display());
    Ok(path)
}
