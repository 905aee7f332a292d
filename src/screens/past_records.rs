// src/screens/past_records.rs
use log::{error, info, warn};

use crate::client::PredictionApi;
use crate::errors::Result;
use crate::models::{HistoryPage, ImageRecord};
use crate::navigation::{ResultParams, Screen};
use crate::records::{RecordRow, chunk_rows, filter_records};
use crate::tumor::TumorTag;

pub const EMPTY_MESSAGE: &str = "No records found for the selected filter.";

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Loaded(Vec<ImageRecord>),
    Failed(String),
}

/// What the records screen renders right now.
#[derive(Debug, PartialEq)]
pub enum RecordsView<'a> {
    Loading,
    /// Offers a retry.
    Failed(&'a str),
    /// Fetched fine, nothing to show. `filter_active` controls whether a
    /// "clear filter" action is offered.
    Empty { filter_active: bool },
    Rows(Vec<RecordRow<'a>>),
}

/// The records screen. The filter lives beside the fetch state and survives
/// reloads.
#[derive(Debug)]
pub struct PastRecordsScreen {
    fetch: FetchState,
    filter: Option<TumorTag>,
}

impl Default for PastRecordsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PastRecordsScreen {
    /// A fresh screen starts out loading.
    pub fn new() -> Self {
        PastRecordsScreen {
            fetch: FetchState::Loading,
            filter: None,
        }
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn filter(&self) -> Option<TumorTag> {
        self.filter
    }

    /// Records the result of a fetch.
    pub fn apply_fetch(&mut self, result: Result<HistoryPage>) {
        self.fetch = match result {
            Ok(page) => {
                info!("Loaded {} past records ({})", page.records.len(), page.message);
                FetchState::Loaded(page.records)
            }
            Err(e) => {
                error!("Failed to fetch records: {e}");
                FetchState::Failed(format!("Failed to fetch records: {e}"))
            }
        };
    }

    /// Fetches the history and applies it.
    pub async fn load<A: PredictionApi>(&mut self, api: &A) {
        self.fetch = FetchState::Loading;
        let result = api.list_past_records().await;
        self.apply_fetch(result);
    }

    /// Re-enters `Loading` from `Failed`. Returns `false` in any other state.
    pub fn retry(&mut self) -> bool {
        if matches!(self.fetch, FetchState::Failed(_)) {
            self.fetch = FetchState::Loading;
            true
        } else {
            false
        }
    }

    /// Tapping the active chip turns the filter off.
    pub fn toggle_filter(&mut self, tag: TumorTag) {
        self.filter = if self.filter == Some(tag) {
            None
        } else {
            Some(tag)
        };
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn view(&self) -> RecordsView<'_> {
        match &self.fetch {
            FetchState::Loading => RecordsView::Loading,
            FetchState::Failed(message) => RecordsView::Failed(message),
            FetchState::Loaded(records) => {
                let visible = filter_records(records, self.filter);
                if visible.is_empty() {
                    RecordsView::Empty {
                        filter_active: self.filter.is_some(),
                    }
                } else {
                    RecordsView::Rows(chunk_rows(&visible))
                }
            }
        }
    }

    /// Opens a record on the result screen. Records without a prediction are
    /// not openable.
    pub fn open_record(&self, record: &ImageRecord) -> Option<Screen> {
        let info = record.information.as_ref()?;
        match serde_json::to_string(info) {
            Ok(prediction_json) => Some(Screen::Result(ResultParams {
                prediction_json: Some(prediction_json),
                image_uri: Some(record.url.clone()),
            })),
            Err(e) => {
                warn!("Failed to encode record {} for the result screen: {e}", record.id);
                None
            }
        }
    }
}
