// src/screens/tumor_detail.rs
use log::warn;

use crate::navigation::Screen;
use crate::tumor::TumorReference;

pub const NOT_FOUND_MESSAGE: &str = "Tumor information not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumorDetailScreen {
    Found(&'static TumorReference),
    /// The name was missing or matched nothing. The only way out is back to
    /// the dashboard.
    NotFound,
}

impl TumorDetailScreen {
    pub fn open(tumor_name: Option<&str>) -> Self {
        match tumor_name.and_then(TumorReference::find) {
            Some(entry) => TumorDetailScreen::Found(entry),
            None => {
                warn!("No tumor reference for {:?}", tumor_name);
                TumorDetailScreen::NotFound
            }
        }
    }

    pub fn reference(&self) -> Option<&'static TumorReference> {
        match self {
            TumorDetailScreen::Found(entry) => Some(entry),
            TumorDetailScreen::NotFound => None,
        }
    }

    /// Back from either state returns to the dashboard.
    pub fn back(&self) -> Screen {
        Screen::Dashboard
    }
}
