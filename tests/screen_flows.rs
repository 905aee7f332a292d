// tests/screen_flows.rs
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use neuroview::client::{ImageUpload, PredictionApi};
use neuroview::errors::{NeuroError, Result};
use neuroview::interpret::ResultOutcome;
use neuroview::models::{Ack, HistoryPage, ImageRecord, PredictionResult, UploadResponse};
use neuroview::navigation::{BottomNavItem, Navigator, Screen};
use neuroview::screens::{
    DashboardScreen, HomeScreen, PastRecordsScreen, RecordsView, ResultScreen,
    TumorDetailScreen, UploadOutcome, UploadScreen, UploadState,
};
use neuroview::tumor::TumorTag;
use pretty_assertions::assert_eq;

/// Serves canned responses and counts calls.
#[derive(Default)]
struct FakeApi {
    upload_response: Mutex<Option<Result<UploadResponse>>>,
    history_responses: Mutex<VecDeque<Result<HistoryPage>>>,
    uploads: Mutex<Vec<ImageUpload>>,
    upload_calls: AtomicUsize,
    history_calls: AtomicUsize,
}

impl FakeApi {
    fn with_upload(response: Result<UploadResponse>) -> Self {
        let api = FakeApi::default();
        *api.upload_response.lock().unwrap() = Some(response);
        api
    }

    fn with_history(responses: Vec<Result<HistoryPage>>) -> Self {
        let api = FakeApi::default();
        *api.history_responses.lock().unwrap() = responses.into();
        api
    }
}

impl PredictionApi for FakeApi {
    async fn create_record(&self, name: &str) -> Result<Ack> {
        Ok(Ack {
            message: format!("created {name}"),
        })
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadResponse> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(upload);
        self.upload_response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Err(NeuroError::ApiError {
                    status: 500,
                    body: "no canned response".to_string(),
                })
            })
    }

    async fn list_past_records(&self) -> Result<HistoryPage> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(NeuroError::ApiError {
                    status: 500,
                    body: "no canned response".to_string(),
                })
            })
    }
}

fn scan_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.jpg");
    std::fs::write(&path, b"jpeg bytes").unwrap();
    (dir, path)
}

fn glioma_prediction() -> PredictionResult {
    PredictionResult {
        success: true,
        predicted_class: Some(0),
        tumor_type: Some("glioma".to_string()),
        confidence: Some(0.96875),
        class_probabilities: Some(
            [
                ("glioma".to_string(), 0.96875),
                ("meningioma".to_string(), 0.015625),
                ("notumor".to_string(), 0.0078125),
                ("pituitary".to_string(), 0.0078125),
            ]
            .into_iter()
            .collect(),
        ),
        ..Default::default()
    }
}

fn record(id: &str, information: Option<PredictionResult>) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        name: format!("{id}.jpg"),
        url: format!("https://cdn.example/{id}.jpg"),
        uploaded_at: "2025-06-01T08:30:00.000000+00:00".to_string(),
        information,
    }
}

#[tokio::test]
async fn successful_upload_lands_on_result_screen() {
    let (_dir, path) = scan_file();
    let api = FakeApi::with_upload(Ok(UploadResponse {
        success: true,
        prediction: Some(glioma_prediction()),
        ..Default::default()
    }));

    let mut nav = Navigator::new();
    nav.navigate(HomeScreen.get_started());
    nav.select(BottomNavItem::Upload);

    let mut screen = UploadScreen::new();
    screen.select_image(&path, None);
    let outcome = screen.upload(&api).await.unwrap();

    assert_eq!(outcome.notice(), "Analysis completed successfully!");
    assert_eq!(screen.state(), &UploadState::Idle);

    let sent = api.uploads.lock().unwrap().pop().unwrap();
    assert_eq!(sent.file_name, "scan.jpg");
    assert_eq!(sent.display_name, "scan.jpg");
    assert_eq!(sent.mime_type, "image/jpeg");

    let Some(Screen::Result(params)) = outcome.next_screen() else {
        panic!("expected the result screen");
    };
    nav.navigate(Screen::Result(params.clone()));
    assert_eq!(nav.selected_item(), None);

    let result = ResultScreen::open(params.clone());
    assert_eq!(result.image_uri(), Some(path.display().to_string().as_str()));
    let ResultOutcome::Success(summary) = result.outcome() else {
        panic!("expected a successful prediction");
    };
    assert_eq!(summary.headline(), "Glioma");
    assert_eq!(summary.probabilities[0].class_name, "glioma");
    assert_eq!(summary.probabilities[0].percent(), 96);
    assert_eq!(summary.insights.len(), 6);
}

#[tokio::test]
async fn unreadable_image_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::default();

    let mut screen = UploadScreen::new();
    screen.select_image(&dir.path().join("deleted.jpg"), None);
    let outcome = screen.upload(&api).await.unwrap();

    assert!(matches!(
        outcome,
        UploadOutcome::Failed {
            error: NeuroError::ImageRead { .. }
        }
    ));
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
    assert!(screen.can_upload());
}

#[tokio::test]
async fn server_error_keeps_selection_and_does_not_navigate() {
    let (_dir, path) = scan_file();
    let api = FakeApi::with_upload(Err(NeuroError::ApiError {
        status: 500,
        body: "model crashed".to_string(),
    }));

    let mut screen = UploadScreen::new();
    screen.select_image(&path, Some("Follow-up"));
    let outcome = screen.upload(&api).await.unwrap();

    assert_eq!(outcome.next_screen(), None);
    assert_eq!(outcome.notice(), "Upload failed: Server returned 500: model crashed");
    assert_eq!(
        screen.selected().map(|s| s.display_name.as_str()),
        Some("Follow-up")
    );
    assert!(screen.can_upload());
}

#[tokio::test]
async fn upload_without_prediction_shows_no_data() {
    let (_dir, path) = scan_file();
    let api = FakeApi::with_upload(Ok(UploadResponse {
        success: true,
        message: Some("ok".to_string()),
        ..Default::default()
    }));

    let mut screen = UploadScreen::new();
    screen.select_image(&path, None);
    let outcome = screen.upload(&api).await.unwrap();
    assert_eq!(
        outcome.notice(),
        "Upload successful, but analysis failed: No prediction data received from server"
    );

    let Some(Screen::Result(params)) = outcome.next_screen() else {
        panic!("expected the result screen");
    };
    assert_eq!(params.prediction_json, None);
    assert_eq!(ResultScreen::open(params.clone()).outcome(), &ResultOutcome::NoData);
}

#[tokio::test]
async fn no_upload_without_selection() {
    let api = FakeApi::default();
    let mut screen = UploadScreen::new();
    assert!(screen.upload(&api).await.is_none());
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn past_records_retry_filter_and_open() {
    let api = FakeApi::with_history(vec![
        Err(NeuroError::ApiError {
            status: 503,
            body: "warming up".to_string(),
        }),
        Ok(HistoryPage {
            count: 3,
            records: vec![
                record("a", Some(glioma_prediction())),
                record("b", None),
                record("c", Some(glioma_prediction())),
            ],
            message: "found".to_string(),
            success: true,
        }),
    ]);

    let mut screen = PastRecordsScreen::new();
    screen.load(&api).await;
    assert!(matches!(screen.view(), RecordsView::Failed(_)));

    assert!(screen.retry());
    assert_eq!(screen.view(), RecordsView::Loading);
    screen.load(&api).await;
    assert_eq!(api.history_calls.load(Ordering::SeqCst), 2);

    let RecordsView::Rows(rows) = screen.view() else {
        panic!("expected rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].first.id, "c");
    assert_eq!(rows[1].second, None);

    screen.toggle_filter(TumorTag::Glioma);
    let RecordsView::Rows(rows) = screen.view() else {
        panic!("expected rows");
    };
    let ids: Vec<&str> = rows.iter().flat_map(|r| r.records()).map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let target = screen.open_record(rows[0].first).unwrap();
    let Screen::Result(params) = target else {
        panic!("expected the result screen");
    };
    assert_eq!(params.image_uri.as_deref(), Some("https://cdn.example/a.jpg"));
    let reopened = ResultScreen::open(params);
    assert!(reopened.outcome().is_success());

    screen.toggle_filter(TumorTag::NoTumor);
    assert_eq!(screen.view(), RecordsView::Empty { filter_active: true });
    screen.clear_filter();
    assert!(matches!(screen.view(), RecordsView::Rows(_)));
}

#[test]
fn learn_flow_and_not_found_recovery() {
    let mut nav = Navigator::new();
    nav.navigate(HomeScreen.get_started());

    let dashboard = DashboardScreen;
    let cards = dashboard.cards();
    let target = dashboard.open_tumor(&cards[0]);
    nav.navigate(target.clone());

    let Screen::TumorDetail { tumor_name } = &target else {
        panic!("expected tumor detail");
    };
    let detail = TumorDetailScreen::open(Some(tumor_name.as_str()));
    assert_eq!(detail.reference().map(|t| t.symptoms.len()), Some(8));

    let missing = TumorDetailScreen::open(Some("Ependymoma"));
    assert_eq!(missing, TumorDetailScreen::NotFound);
    nav.navigate_clear_top(missing.back());
    assert_eq!(nav.current(), &Screen::Dashboard);
    assert_eq!(nav.depth(), 2);
}

#[test]
fn malformed_prediction_param_is_not_no_data() {
    let screen = ResultScreen::open(neuroview::navigation::ResultParams {
        prediction_json: Some("{not valid json".to_string()),
        image_uri: None,
    });
    assert!(matches!(screen.outcome(), ResultOutcome::Malformed(_)));
    assert!(
        screen
            .outcome()
            .explanation()
            .unwrap()
            .starts_with("Prediction data was received but failed to parse.")
    );
}
