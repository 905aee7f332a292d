use std::path::Path;
use std::process::ExitCode;

use neuroview::banner;
use neuroview::client::{PredictionApi, PredictionClient};
use neuroview::config::AppConfig;
use neuroview::interpret::ResultOutcome;
use neuroview::navigation::{BottomNavItem, Navigator, ResultParams, Screen};
use neuroview::records::RecordCard;
use neuroview::screens::past_records::EMPTY_MESSAGE;
use neuroview::screens::result::DISCLAIMER;
use neuroview::screens::tumor_detail::NOT_FOUND_MESSAGE;
use neuroview::screens::{
    DashboardScreen, HomeScreen, PastRecordsScreen, RecordsView, ResultScreen,
    TumorDetailScreen, UploadScreen,
};
use neuroview::tumor::TumorTag;

const USAGE: &str = "usage: neuroview <command>

commands:
  learn [name]                 list tumor types, or show one
  upload <path> [name]         upload an image and show its result
  records [tag]                list past records (tags: glioma, meningioma, pituitary, notumor)
  create <name>                create an empty record
  show <prediction-json>       interpret a prediction payload";

#[tokio::main]
async fn main() -> ExitCode {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let client = match PredictionClient::from_config(config.api.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut nav = Navigator::new();
    nav.navigate(HomeScreen.get_started());

    let ok = match (command.as_str(), &args[1..]) {
        ("learn", []) => {
            learn_list();
            true
        }
        ("learn", [name, ..]) => learn_one(&mut nav, name),
        ("upload", [path, rest @ ..]) => {
            upload(&mut nav, &client, Path::new(path), rest.first().map(String::as_str)).await
        }
        ("records", rest) => records(&mut nav, &client, rest.first().map(String::as_str)).await,
        ("create", [name, ..]) => match client.create_record(name).await {
            Ok(ack) => {
                println!("✅ {}", ack.message);
                true
            }
            Err(e) => {
                eprintln!("❌ {e}");
                false
            }
        },
        ("show", [json, ..]) => {
            show_result(&ResultScreen::open(ResultParams {
                prediction_json: Some(json.clone()),
                image_uri: None,
            }));
            true
        }
        _ => {
            eprintln!("{USAGE}");
            false
        }
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn learn_list() {
    println!("LEARN");
    for card in DashboardScreen.cards() {
        println!("  {:<12} {}", card.name, card.short_description);
    }
}

fn learn_one(nav: &mut Navigator, name: &str) -> bool {
    nav.navigate(Screen::TumorDetail {
        tumor_name: name.to_string(),
    });
    match TumorDetailScreen::open(Some(name)) {
        TumorDetailScreen::Found(entry) => {
            println!("{}\n\n{}\n\nCommon Symptoms", entry.name, entry.detailed_description);
            for symptom in entry.symptoms {
                println!("  • {symptom}");
            }
            println!("\nTreatment\n{}", entry.treatment);
            true
        }
        TumorDetailScreen::NotFound => {
            eprintln!("{NOT_FOUND_MESSAGE}: {name}");
            nav.navigate_clear_top(Screen::Dashboard);
            learn_list();
            false
        }
    }
}

async fn upload(
    nav: &mut Navigator,
    client: &PredictionClient,
    path: &Path,
    display_name: Option<&str>,
) -> bool {
    nav.select(BottomNavItem::Upload);

    let mut screen = UploadScreen::new();
    screen.select_image(path, display_name);
    let Some(outcome) = screen.upload(client).await else {
        eprintln!("❌ Nothing to upload");
        return false;
    };
    println!("{}", outcome.notice());

    match outcome.next_screen() {
        Some(Screen::Result(params)) => {
            nav.navigate(Screen::Result(params.clone()));
            show_result(&ResultScreen::open(params.clone()));
            true
        }
        _ => false,
    }
}

async fn records(nav: &mut Navigator, client: &PredictionClient, tag: Option<&str>) -> bool {
    nav.select(BottomNavItem::PastRecords);

    let mut screen = PastRecordsScreen::new();
    if let Some(raw) = tag {
        match TumorTag::parse(raw) {
            Some(tag) => screen.toggle_filter(tag),
            None => {
                eprintln!("❌ Unknown tag {raw:?}");
                return false;
            }
        }
    }
    screen.load(client).await;

    println!("COLLECTIONS");
    match screen.view() {
        RecordsView::Loading => {
            println!("Loading...");
            false
        }
        RecordsView::Failed(message) => {
            eprintln!("❌ {message}\n   Run the command again to retry.");
            false
        }
        RecordsView::Empty { filter_active } => {
            println!("{EMPTY_MESSAGE}");
            if filter_active {
                println!("Run without a tag to clear the filter.");
            }
            true
        }
        RecordsView::Rows(rows) => {
            for row in rows {
                let cells: Vec<String> = row
                    .slots()
                    .iter()
                    .map(|slot| match slot {
                        Some(record) => {
                            let card = RecordCard::from(*record);
                            format!(
                                "{:<12} {:>8}  {:<18}",
                                card.title, card.confidence, card.uploaded_on
                            )
                        }
                        None => String::new(),
                    })
                    .collect();
                println!("  {}", cells.join(" | "));
            }
            true
        }
    }
}

fn show_result(screen: &ResultScreen) {
    println!("RESULT");
    if let Some(uri) = screen.image_uri() {
        println!("Input image: {uri}");
    }

    match screen.outcome() {
        ResultOutcome::Success(summary) => {
            println!("\n{}", summary.headline());
            if !summary.probabilities.is_empty() {
                println!("\nCONFIDENCE SCORES");
                for row in &summary.probabilities {
                    println!("  {:<12} {:>3}%", row.label(), row.percent());
                }
            }
            println!("\nINSIGHTS");
            for line in &summary.insights {
                println!("  {line}");
            }
        }
        other => {
            println!("\nNo Analysis Available");
            if let Some(explanation) = other.explanation() {
                println!("{explanation}");
            }
            println!("\nDebug Information:");
            for line in screen.debug_info().lines {
                println!("  {line}");
            }
        }
    }

    println!("\n{DISCLAIMER}");
}
