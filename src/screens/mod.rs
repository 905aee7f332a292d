// src/screens/mod.rs
//! Per-screen state and controllers. Each screen owns its transient state as
//! a single value and hands back the [`Screen`](crate::navigation::Screen) to
//! move to; nothing is shared between screens.

pub mod dashboard;
pub mod home;
pub mod past_records;
pub mod result;
pub mod tumor_detail;
pub mod upload;

pub use dashboard::DashboardScreen;
pub use home::HomeScreen;
pub use past_records::{FetchState, PastRecordsScreen, RecordsView};
pub use result::ResultScreen;
pub use tumor_detail::TumorDetailScreen;
pub use upload::{UploadOutcome, UploadScreen, UploadState};
