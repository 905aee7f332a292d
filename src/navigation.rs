// src/navigation.rs
use std::fmt;

use log::debug;

pub const PARAM_TUMOR_NAME: &str = "tumor_name";
pub const PARAM_PREDICTION_JSON: &str = "prediction_json";
pub const PARAM_IMAGE_URI: &str = "image_uri";

/// Parameters handed to the result screen. Both are opaque strings; the
/// result screen does its own parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultParams {
    pub prediction_json: Option<String>,
    pub image_uri: Option<String>,
}

impl ResultParams {
    pub fn image_only(image_uri: impl Into<String>) -> Self {
        ResultParams {
            prediction_json: None,
            image_uri: Some(image_uri.into()),
        }
    }

    /// Key/value view of the parameters that are actually set.
    pub fn extras(&self) -> Vec<(&'static str, &str)> {
        let mut extras = Vec::with_capacity(2);
        if let Some(json) = &self.prediction_json {
            extras.push((PARAM_PREDICTION_JSON, json.as_str()));
        }
        if let Some(uri) = &self.image_uri {
            extras.push((PARAM_IMAGE_URI, uri.as_str()));
        }
        extras
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Dashboard,
    TumorDetail { tumor_name: String },
    Upload,
    PastRecords,
    Result(ResultParams),
}

impl Screen {
    /// Screens that share identity regardless of their parameters.
    fn same_kind(&self, other: &Screen) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => write!(f, "Home"),
            Screen::Dashboard => write!(f, "Dashboard"),
            Screen::TumorDetail { tumor_name } => {
                write!(f, "TumorDetail({PARAM_TUMOR_NAME}={tumor_name})")
            }
            Screen::Upload => write!(f, "Upload"),
            Screen::PastRecords => write!(f, "PastRecords"),
            Screen::Result(params) => {
                let keys: Vec<&str> = params.extras().iter().map(|(k, _)| *k).collect();
                write!(f, "Result({})", keys.join(", "))
            }
        }
    }
}

/// Entries of the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomNavItem {
    Dashboard,
    Upload,
    PastRecords,
}

impl BottomNavItem {
    pub const ALL: [BottomNavItem; 3] = [
        BottomNavItem::Dashboard,
        BottomNavItem::Upload,
        BottomNavItem::PastRecords,
    ];

    pub fn screen(self) -> Screen {
        match self {
            BottomNavItem::Dashboard => Screen::Dashboard,
            BottomNavItem::Upload => Screen::Upload,
            BottomNavItem::PastRecords => Screen::PastRecords,
        }
    }

    /// The centre button is the upload action.
    pub fn is_central(self) -> bool {
        self == BottomNavItem::Upload
    }
}

/// Tracks the active screen and the back stack behind it.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            stack: vec![Screen::Home],
        }
    }

    pub fn current(&self) -> &Screen {
        // The stack is never empty: `back` refuses to pop the last entry.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes `screen` on top of the current one.
    pub fn navigate(&mut self, screen: Screen) {
        debug!("Navigating {} -> {}", self.current(), screen);
        self.stack.push(screen);
    }

    /// Brings `screen` to the top, dropping everything above an existing
    /// instance of the same kind. Pushes it when there is none.
    pub fn navigate_clear_top(&mut self, screen: Screen) {
        match self.stack.iter().rposition(|s| s.same_kind(&screen)) {
            Some(index) => {
                debug!("Clearing back to {}", self.stack[index]);
                self.stack.truncate(index + 1);
                self.stack[index] = screen;
            }
            None => self.navigate(screen),
        }
    }

    /// Returns `false` when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Selecting the active entry is a no-op.
    pub fn select(&mut self, item: BottomNavItem) {
        let target = item.screen();
        if self.current().same_kind(&target) {
            return;
        }
        self.navigate_clear_top(target);
    }

    /// Which bottom bar entry to highlight, if any.
    pub fn selected_item(&self) -> Option<BottomNavItem> {
        BottomNavItem::ALL
            .into_iter()
            .find(|item| self.current().same_kind(&item.screen()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home_and_cannot_pop_root() {
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), &Screen::Home);
        assert!(!nav.back());
        assert_eq!(nav.selected_item(), None);
    }

    #[test]
    fn bottom_bar_clears_back_to_existing_instance() {
        let mut nav = Navigator::new();
        nav.navigate(Screen::Dashboard);
        nav.navigate(Screen::TumorDetail {
            tumor_name: "Glioma".to_string(),
        });
        nav.select(BottomNavItem::Upload);
        assert_eq!(nav.depth(), 4);

        nav.select(BottomNavItem::Dashboard);
        assert_eq!(nav.current(), &Screen::Dashboard);
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.selected_item(), Some(BottomNavItem::Dashboard));

        nav.select(BottomNavItem::Dashboard);
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn result_display_lists_only_present_params() {
        let screen = Screen::Result(ResultParams::image_only("content://scan/1"));
        assert_eq!(screen.to_string(), "Result(image_uri)");
    }
}
