// src/records.rs
use chrono::{DateTime, NaiveDateTime};

use crate::models::ImageRecord;
use crate::tumor::TumorTag;

/// Cards per row on the records screen.
pub const ROW_WIDTH: usize = 2;

const NOT_AVAILABLE: &str = "N/A";

/// Keeps records whose prediction carries `tag`. With no tag, returns every
/// record in its original order. Records without a prediction never match a
/// tag.
pub fn filter_records(records: &[ImageRecord], tag: Option<TumorTag>) -> Vec<&ImageRecord> {
    match tag {
        None => records.iter().collect(),
        Some(tag) => records
            .iter()
            .filter(|record| {
                record
                    .information
                    .as_ref()
                    .and_then(|info| info.tumor_type.as_deref())
                    .is_some_and(|tumor_type| tumor_type.eq_ignore_ascii_case(tag.as_str()))
            })
            .collect(),
    }
}

/// One display row. A short final row keeps an empty second slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordRow<'a> {
    pub first: &'a ImageRecord,
    pub second: Option<&'a ImageRecord>,
}

impl<'a> RecordRow<'a> {
    pub fn slots(&self) -> [Option<&'a ImageRecord>; ROW_WIDTH] {
        [Some(self.first), self.second]
    }

    pub fn records(&self) -> impl Iterator<Item = &'a ImageRecord> + use<'a> {
        self.slots().into_iter().flatten()
    }
}

/// Groups records into rows of [`ROW_WIDTH`], preserving order.
pub fn chunk_rows<'a>(records: &[&'a ImageRecord]) -> Vec<RecordRow<'a>> {
    records
        .chunks(ROW_WIDTH)
        .map(|chunk| RecordRow {
            first: chunk[0],
            second: chunk.get(1).copied(),
        })
        .collect()
}

/// Text shown on one record card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCard {
    pub title: String,
    pub confidence: String,
    pub uploaded_on: String,
    pub image_url: String,
    pub has_prediction: bool,
}

impl From<&ImageRecord> for RecordCard {
    fn from(record: &ImageRecord) -> Self {
        let info = record.information.as_ref();
        RecordCard {
            title: info
                .and_then(|i| i.tumor_type.as_deref())
                .map(title_case)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            confidence: info
                .and_then(|i| i.confidence)
                .map(|c| format!("{:.2}%", c * 100.0))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            uploaded_on: format_upload_date(&record.uploaded_at)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            image_url: record.url.clone(),
            has_prediction: info.is_some(),
        }
    }
}

fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats the server timestamp as e.g. `March 5, 2025`. The server usually
/// sends RFC 3339 with microseconds and an offset; a naive timestamp is also
/// accepted.
pub fn format_upload_date(uploaded_at: &str) -> Option<String> {
    let raw = uploaded_at.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .ok()?;
    Some(date.format("%B %-d, %Y").to_string())
}
